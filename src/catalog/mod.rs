mod seed;

use async_trait::async_trait;

use crate::entities::{RawQuote, Restaurant, SearchQuery};
use crate::error::Error;

pub use seed::SeedCatalog;

/// Read-only restaurant metadata.
pub trait Catalog {
    fn find_restaurant(&self, id: &str) -> Option<Restaurant>;
    fn search(&self, query: &SearchQuery) -> Vec<Restaurant>;
}

/// Per-platform price retrieval. A restaurant missing from some platforms
/// yields fewer quotes, possibly none.
#[async_trait]
pub trait QuoteSource {
    async fn fetch_quotes(&self, restaurant_id: &str) -> Result<Vec<RawQuote>, Error>;
}

pub type DynCatalog = std::sync::Arc<dyn Catalog + Send + Sync>;
pub type DynQuoteSource = std::sync::Arc<dyn QuoteSource + Send + Sync>;
