use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RestaurantAPI,
    entities::{Restaurant, SearchQuery},
    error::{not_found_error, Error},
};

#[async_trait]
impl RestaurantAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn search_restaurants(&self, query: SearchQuery) -> Result<Vec<Restaurant>, Error> {
        Ok(self.catalog.search(&query))
    }

    #[tracing::instrument(skip(self))]
    async fn find_restaurant(&self, id: String) -> Result<Restaurant, Error> {
        self.catalog.find_restaurant(&id).ok_or_else(not_found_error)
    }
}
