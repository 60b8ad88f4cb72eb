use std::num::NonZeroU32;
use std::sync::Arc;

use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::abucoins::EXCHANGE_NAME;
use crate::abucoins::dto::{AbucoinsOrderBook, AbucoinsTicker, AbucoinsTrade};
use crate::error::ExchangeError;
use crate::service::RawMarketDataClient;

pub const ABUCOINS_BASE_URL: &str = "https://api.abucoins.com";
/// Used when the config does not set `requests_per_second`.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 5;
const ORDER_BOOK_LEVEL: &str = "2";

/// Public REST client for Abucoins market data.
pub struct AbucoinsHttpClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AbucoinsHttpClient {
    pub fn new(base_url: impl Into<String>, requests_per_second: NonZeroU32) -> Self {
        let quota = Quota::per_second(requests_per_second);
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, Report<ExchangeError>> {
        // Wait for rate limiter before making the request
        self.rate_limiter.until_ready().await;

        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .change_context(ExchangeError::Request {
                exchange: EXCHANGE_NAME.into(),
            })
            .attach_with(|| format!("url: {url}"))?;

        if !response.status().is_success() {
            return Err(Report::new(ExchangeError::Request {
                exchange: EXCHANGE_NAME.into(),
            })
            .attach(format!("HTTP status: {}", response.status()))
            .attach(format!("url: {url}")));
        }

        response
            .json()
            .await
            .change_context(ExchangeError::ResponseParse {
                exchange: EXCHANGE_NAME.into(),
            })
            .attach_with(|| format!("url: {url}"))
    }
}

impl Default for AbucoinsHttpClient {
    fn default() -> Self {
        Self::new(ABUCOINS_BASE_URL, nonzero!(5u32))
    }
}

impl RawMarketDataClient for AbucoinsHttpClient {
    fn get_abucoins_ticker(
        &self,
        product_id: &str,
    ) -> BoxFuture<'_, Result<AbucoinsTicker, Report<ExchangeError>>> {
        let path = format!("/products/{product_id}/ticker");
        Box::pin(async move {
            let ticker: AbucoinsTicker = self.get_json(&path, &[]).await?;
            Ok(ticker)
        })
    }

    fn get_abucoins_trades(
        &self,
        product_id: &str,
    ) -> BoxFuture<'_, Result<Vec<AbucoinsTrade>, Report<ExchangeError>>> {
        let path = format!("/products/{product_id}/trades");
        Box::pin(async move {
            let trades: Vec<AbucoinsTrade> = self.get_json(&path, &[]).await?;
            info!(path = %path, fetched = trades.len(), "abucoins trades fetch complete");
            Ok(trades)
        })
    }

    fn get_abucoins_order_book(
        &self,
        product_id: &str,
    ) -> BoxFuture<'_, Result<AbucoinsOrderBook, Report<ExchangeError>>> {
        let path = format!("/products/{product_id}/book");
        Box::pin(async move {
            let book: AbucoinsOrderBook = self
                .get_json(&path, &[("level", ORDER_BOOK_LEVEL)])
                .await?;
            Ok(book)
        })
    }
}
