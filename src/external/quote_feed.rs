use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::QuoteSource,
    entities::RawQuote,
    error::{invalid_input_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    quotes: Vec<RawQuote>,
}

/// Quote source backed by a remote price feed.
pub struct HttpQuoteSource {
    api_base: String,
    client: reqwest::Client,
}

impl HttpQuoteSource {
    pub fn new(api_base: String, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { api_base, client })
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    #[tracing::instrument(skip(self))]
    async fn fetch_quotes(&self, restaurant_id: &str) -> Result<Vec<RawQuote>, Error> {
        let url = format!(
            "https://{}/restaurants/{}/quotes",
            self.api_base, restaurant_id
        );

        let res = self.client.get(url).send().await?;

        if !listed(res.status().as_u16())? {
            return Ok(vec![]);
        }

        let data: Response = res.json().await?;

        Ok(data.quotes)
    }
}

/// Maps a feed status to whether a quote body follows; `false` means the
/// restaurant is not listed on any platform.
fn listed(status_code: u16) -> Result<bool, Error> {
    match status_code {
        200 => Ok(true),
        404 => Ok(false),
        400..=499 => Err(invalid_input_error()),
        _ => {
            tracing::warn!(status_code, "quote feed returned an error");
            Err(upstream_error())
        }
    }
}

#[test]
fn listed_test() {
    assert_eq!(listed(200).unwrap(), true);
    assert_eq!(listed(404).unwrap(), false);

    assert_eq!(listed(400).unwrap_err().code, 101);
    assert_eq!(listed(429).unwrap_err().code, 101);

    assert_eq!(listed(500).unwrap_err().code, 4);
    assert_eq!(listed(503).unwrap_err().code, 4);
    assert_eq!(listed(204).unwrap_err().code, 4);
}
