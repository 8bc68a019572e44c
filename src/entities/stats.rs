use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::ComparisonResult;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_saved: Decimal,
    pub comparisons_count: i64,
    pub favorites_count: i64,
}

/// Outcome of one restaurant inside a batch comparison.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonEntry {
    pub restaurant_id: String,
    pub comparison: Option<ComparisonResult>,
    pub error: Option<String>,
}

impl ComparisonEntry {
    pub fn new(restaurant_id: String, result: Result<ComparisonResult, crate::error::Error>) -> Self {
        match result {
            Ok(comparison) => Self {
                restaurant_id,
                comparison: Some(comparison),
                error: None,
            },
            Err(err) => Self {
                restaurant_id,
                comparison: None,
                error: Some(err.message),
            },
        }
    }
}
