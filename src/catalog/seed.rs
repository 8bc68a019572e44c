use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::{Catalog, QuoteSource};
use crate::entities::{RawQuote, Restaurant, SearchQuery};
use crate::error::Error;

/// Restaurants and quotes bundled with the binary, used when no remote quote
/// feed is configured.
#[derive(Debug, Deserialize)]
pub struct SeedCatalog {
    restaurants: Vec<Restaurant>,
    quotes: HashMap<String, Vec<RawQuote>>,
}

impl SeedCatalog {
    pub fn load() -> Result<Self, Error> {
        Self::from_json(include_str!("seed.json"))
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        let catalog: SeedCatalog = serde_json::from_str(data)?;

        tracing::info!(
            restaurants = catalog.restaurants.len(),
            "loaded seed catalog"
        );

        Ok(catalog)
    }
}

impl Catalog for SeedCatalog {
    fn find_restaurant(&self, id: &str) -> Option<Restaurant> {
        self.restaurants.iter().find(|r| r.id == id).cloned()
    }

    fn search(&self, query: &SearchQuery) -> Vec<Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl QuoteSource for SeedCatalog {
    async fn fetch_quotes(&self, restaurant_id: &str) -> Result<Vec<RawQuote>, Error> {
        Ok(self
            .quotes
            .get(restaurant_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
fn query(q: Option<&str>, cuisine: Option<&str>, location: Option<&str>) -> SearchQuery {
    SearchQuery {
        q: q.map(String::from),
        cuisine: cuisine.map(String::from),
        location: location.map(String::from),
    }
}

#[test]
fn empty_query_returns_everything_in_order_test() {
    let catalog = SeedCatalog::load().unwrap();

    let ids: Vec<String> = catalog
        .search(&SearchQuery::default())
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
}

#[test]
fn filters_are_case_insensitive_and_combined_test() {
    let catalog = SeedCatalog::load().unwrap();

    let pizza = catalog.search(&query(None, Some("pizza"), None));
    assert_eq!(pizza.len(), 2);

    let downtown_fast_food = catalog.search(&query(None, Some("FAST"), Some("downtown")));
    let names: Vec<&str> = downtown_fast_food.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["McDonald's", "Burger King", "KFC"]);

    let by_name = catalog.search(&query(Some("king"), None, None));
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "3");

    assert!(catalog.search(&query(Some("sushi"), None, None)).is_empty());
}

#[test]
fn blank_filter_matches_everything_test() {
    let catalog = SeedCatalog::load().unwrap();

    assert_eq!(catalog.search(&query(Some("  "), Some(""), None)).len(), 8);
}

#[test]
fn unknown_restaurant_is_none_test() {
    let catalog = SeedCatalog::load().unwrap();

    assert!(catalog.find_restaurant("42").is_none());
    assert_eq!(catalog.find_restaurant("4").unwrap().name, "Subway");
}

#[test]
fn every_seeded_restaurant_compares_test() {
    use crate::entities::compare;

    let catalog = SeedCatalog::load().unwrap();

    for restaurant in catalog.search(&SearchQuery::default()) {
        let quotes = tokio_test::block_on(catalog.fetch_quotes(&restaurant.id)).unwrap();
        let result = compare(restaurant, &quotes).unwrap();

        assert!(result.prices.contains(&result.best_deal));
    }
}

#[test]
fn seeded_best_deal_test() {
    use crate::entities::compare;

    let catalog = SeedCatalog::load().unwrap();
    let restaurant = catalog.find_restaurant("1").unwrap();
    let quotes = tokio_test::block_on(catalog.fetch_quotes("1")).unwrap();

    let result = compare(restaurant, &quotes).unwrap();

    assert_eq!(result.best_deal.platform, "Foody");
    assert_eq!(result.best_deal.total.to_string(), "17.50");
    assert_eq!(result.max_savings.to_string(), "2.35");
}

#[test]
fn restaurant_missing_from_a_platform_test() {
    let catalog = SeedCatalog::load().unwrap();

    let quotes = tokio_test::block_on(catalog.fetch_quotes("7")).unwrap();
    assert_eq!(quotes.len(), 2);

    let quotes = tokio_test::block_on(catalog.fetch_quotes("99")).unwrap();
    assert!(quotes.is_empty());
}
