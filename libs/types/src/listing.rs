//! Buyer requests and seller offers
//!
//! Both sides reference a place by name and carry the product they ask for
//! or supply. They are immutable once recorded.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A buyer's demand for a product at a place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub request_id: String,
    pub place: String,
    pub product_id: ProductId,
}

impl Request {
    pub fn new(
        request_id: impl Into<String>,
        place: impl Into<String>,
        product_id: impl Into<ProductId>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            place: place.into(),
            product_id: product_id.into(),
        }
    }
}

/// A seller's supply of a product at a place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub offer_id: String,
    pub place: String,
    pub product_id: ProductId,
}

impl Offer {
    pub fn new(
        offer_id: impl Into<String>,
        place: impl Into<String>,
        product_id: impl Into<ProductId>,
    ) -> Self {
        Self {
            offer_id: offer_id.into(),
            place: place.into(),
            product_id: product_id.into(),
        }
    }

    /// Check whether this offer supplies what the request asks for
    pub fn matches_product(&self, request: &Request) -> bool {
        self.product_id == request.product_id
    }
}
