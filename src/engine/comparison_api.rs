use super::helpers::record_comparison;
use super::Engine;

use async_trait::async_trait;
use futures::future::join_all;

use crate::{
    api::ComparisonAPI,
    auth::User,
    entities::{compare, ComparisonEntry, ComparisonResult},
    error::{invalid_input_error, not_found_error, Error},
};

const MAX_BATCH_SIZE: usize = 20;

#[async_trait]
impl ComparisonAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn compare_prices(
        &self,
        user: Option<User>,
        restaurant_id: String,
    ) -> Result<ComparisonResult, Error> {
        let restaurant = self
            .catalog
            .find_restaurant(&restaurant_id)
            .ok_or_else(not_found_error)?;

        // quotes are fully assembled before comparing
        let quotes = self.quotes.fetch_quotes(&restaurant_id).await?;

        let comparison = compare(restaurant, &quotes)?;

        if let Some(user) = user {
            let recorded = match self.pool.acquire().await {
                Ok(mut conn) => record_comparison(&mut conn, &user.id, &comparison).await,
                Err(err) => Err(err.into()),
            };

            if let Err(err) = recorded {
                tracing::warn!(error = %err, "failed to record comparison");
            }
        }

        Ok(comparison)
    }

    #[tracing::instrument(skip(self))]
    async fn compare_many(
        &self,
        user: Option<User>,
        restaurant_ids: Vec<String>,
    ) -> Result<Vec<ComparisonEntry>, Error> {
        if restaurant_ids.is_empty() || restaurant_ids.len() > MAX_BATCH_SIZE {
            return Err(invalid_input_error());
        }

        let comparisons = restaurant_ids.into_iter().map(|restaurant_id| {
            let user = user.clone();

            async move {
                let result = self.compare_prices(user, restaurant_id.clone()).await;
                ComparisonEntry::new(restaurant_id, result)
            }
        });

        Ok(join_all(comparisons).await)
    }
}

#[cfg(test)]
struct FixedQuotes(std::collections::HashMap<String, Vec<crate::entities::RawQuote>>);

#[cfg(test)]
#[async_trait]
impl crate::catalog::QuoteSource for FixedQuotes {
    async fn fetch_quotes(
        &self,
        restaurant_id: &str,
    ) -> Result<Vec<crate::entities::RawQuote>, Error> {
        Ok(self.0.get(restaurant_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
fn fixed_engine() -> Engine {
    use crate::entities::RawQuote;
    use std::sync::Arc;

    let mut quotes = std::collections::HashMap::new();
    quotes.insert(
        "1".to_string(),
        vec![
            RawQuote::new("Wolt", 12.0, 2.0, 0.5, 0.5),
            RawQuote::new("Foody", 11.0, 1.0, 0.7, 0.5),
        ],
    );
    quotes.insert(
        "2".to_string(),
        vec![
            RawQuote::new("Wolt", 12.0, 2.0, 0.5, 0.5),
            RawQuote::new("Bolt", 12.0, -1.0, 0.5, 0.5),
        ],
    );

    let source: crate::catalog::DynQuoteSource = Arc::new(FixedQuotes(quotes));

    super::lazy_engine(Some(source))
}

#[test]
fn compare_prices_test() {
    use tokio_test::block_on;

    block_on(async {
        let engine = fixed_engine();

        let comparison = engine.compare_prices(None, "1".into()).await.unwrap();
        assert_eq!(comparison.restaurant.id, "1");
        assert_eq!(comparison.best_deal.platform, "Foody");
        assert_eq!(comparison.max_savings.to_string(), "1.80");
    });
}

#[test]
fn compare_prices_unknown_restaurant_test() {
    use tokio_test::block_on;

    block_on(async {
        let engine = fixed_engine();

        let err = engine.compare_prices(None, "99".into()).await.unwrap_err();
        assert_eq!(err.code, 104);
    });
}

#[test]
fn compare_prices_without_quotes_test() {
    use tokio_test::block_on;

    block_on(async {
        let engine = fixed_engine();

        // restaurant 3 is in the catalog but no platform quotes it
        let err = engine.compare_prices(None, "3".into()).await.unwrap_err();
        assert!(err.is_empty_quote_set_error());

        let err = engine.compare_prices(None, "2".into()).await.unwrap_err();
        assert!(err.is_invalid_quote_error());
    });
}

#[test]
fn compare_many_batch_size_test() {
    use tokio_test::block_on;

    block_on(async {
        let engine = super::lazy_engine(None);

        let err = engine.compare_many(None, vec![]).await.unwrap_err();
        assert_eq!(err.code, 101);

        let too_many: Vec<String> = (0..MAX_BATCH_SIZE + 1).map(|_| "1".to_string()).collect();
        let err = engine.compare_many(None, too_many).await.unwrap_err();
        assert_eq!(err.code, 101);

        let ids: Vec<String> = (0..MAX_BATCH_SIZE)
            .map(|i| ((i % 8) + 1).to_string())
            .collect();
        let entries = engine.compare_many(None, ids).await.unwrap();
        assert_eq!(entries.len(), MAX_BATCH_SIZE);
        assert!(entries.iter().all(|entry| entry.comparison.is_some()));
    });
}

#[test]
fn compare_many_isolates_failures_test() {
    use tokio_test::block_on;

    block_on(async {
        let engine = fixed_engine();

        let ids = vec!["1".into(), "2".into(), "3".into(), "99".into()];
        let entries = engine.compare_many(None, ids).await.unwrap();

        let restaurant_ids: Vec<&str> = entries.iter().map(|e| e.restaurant_id.as_str()).collect();
        assert_eq!(restaurant_ids, vec!["1", "2", "3", "99"]);

        let first = entries[0].comparison.as_ref().unwrap();
        assert_eq!(first.best_deal.platform, "Foody");
        assert!(entries[0].error.is_none());

        assert!(entries[1].comparison.is_none());
        assert_eq!(
            entries[1].error.as_deref(),
            Some("invalid quote from Bolt: delivery_fee is negative")
        );
        assert_eq!(entries[2].error.as_deref(), Some("no quotes available"));
        assert_eq!(entries[3].error.as_deref(), Some("not found"));
    });
}
