//! Registry events
//!
//! Every successful mutating call appends one event to a bounded journal so
//! an outer layer (persistence, audit, transport) can pick changes up with
//! `drain`. Sequence numbers are monotonic and survive draining.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A successful registry mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistryEvent {
    RegionAdded {
        region: String,
        places: Vec<String>,
        replaced: bool,
    },
    CarrierAdded {
        carrier: String,
        regions: Vec<String>,
        replaced: bool,
    },
    RequestAdded {
        request_id: String,
        place: String,
        product_id: String,
    },
    OfferAdded {
        offer_id: String,
        place: String,
        product_id: String,
    },
    TransactionCreated {
        transaction_id: String,
        carrier: String,
        request_id: String,
        offer_id: String,
        replaced: bool,
    },
    TransactionScored {
        transaction_id: String,
        score: u8,
    },
}

impl RegistryEvent {
    pub fn event_type_label(&self) -> &'static str {
        match self {
            RegistryEvent::RegionAdded { .. } => "REGION_ADDED",
            RegistryEvent::CarrierAdded { .. } => "CARRIER_ADDED",
            RegistryEvent::RequestAdded { .. } => "REQUEST_ADDED",
            RegistryEvent::OfferAdded { .. } => "OFFER_ADDED",
            RegistryEvent::TransactionCreated { .. } => "TRANSACTION_CREATED",
            RegistryEvent::TransactionScored { .. } => "TRANSACTION_SCORED",
        }
    }
}

/// Journal entry with its sequence number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    pub sequence: u64,
    pub event: RegistryEvent,
}

/// Bounded journal of registry events; oldest entries are evicted first.
#[derive(Debug)]
pub struct EventJournal {
    next_sequence: u64,
    entries: VecDeque<SequencedEvent>,
    capacity: usize,
    evicted: u64,
}

impl EventJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            next_sequence: 1,
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            evicted: 0,
        }
    }

    /// Append an event and return its sequence number
    pub fn record(&mut self, event: RegistryEvent) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if self.capacity == 0 {
            self.evicted += 1;
            return sequence;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(SequencedEvent { sequence, event });
        sequence
    }

    /// Remove and return all retained events in sequence order
    pub fn drain(&mut self) -> Vec<SequencedEvent> {
        self.entries.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of events dropped because the journal was full
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}
