use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use tracing::debug;

use crate::abucoins::EXCHANGE_NAME;
use crate::abucoins::adapters::{adapt_order_book, adapt_ticker, adapt_trades};
use crate::error::ExchangeError;
use crate::model::{CurrencyPair, OrderBook, Ticker, Trades};
use crate::service::{MarketDataService, RawMarketDataClient};
use crate::timestamp::TimestampNormalizer;

/// Generic market-data service backed by a raw Abucoins client.
pub struct AbucoinsMarketDataService<C> {
    raw: C,
    normalizer: TimestampNormalizer,
}

impl<C: RawMarketDataClient> AbucoinsMarketDataService<C> {
    pub fn new(raw: C, normalizer: TimestampNormalizer) -> Self {
        Self { raw, normalizer }
    }
}

impl<C: RawMarketDataClient> MarketDataService for AbucoinsMarketDataService<C> {
    fn get_ticker(&self, pair: &CurrencyPair) -> BoxFuture<'_, Result<Ticker, Report<ExchangeError>>> {
        let pair = pair.clone();
        Box::pin(async move {
            let raw = self.raw.get_abucoins_ticker(&pair.product_id()).await?;
            adapt_ticker(&raw, &pair, &self.normalizer).change_context(ExchangeError::Adapt {
                exchange: EXCHANGE_NAME.into(),
            })
        })
    }

    fn get_trades(&self, pair: &CurrencyPair) -> BoxFuture<'_, Result<Trades, Report<ExchangeError>>> {
        let pair = pair.clone();
        Box::pin(async move {
            let raw = self.raw.get_abucoins_trades(&pair.product_id()).await?;
            let trades = adapt_trades(&raw, &pair, &self.normalizer);
            debug!(pair = %pair, trades = trades.trades.len(), "abucoins trades adapted");
            Ok(trades)
        })
    }

    fn get_order_book(
        &self,
        pair: &CurrencyPair,
    ) -> BoxFuture<'_, Result<OrderBook, Report<ExchangeError>>> {
        let pair = pair.clone();
        Box::pin(async move {
            let raw = self.raw.get_abucoins_order_book(&pair.product_id()).await?;
            let book = adapt_order_book(&raw, &pair);
            debug!(
                pair = %pair,
                asks = book.asks.len(),
                bids = book.bids.len(),
                "abucoins order book adapted"
            );
            Ok(book)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;
    use crate::abucoins::dto::{
        AbucoinsLimitOrder, AbucoinsOrderBook, AbucoinsTicker, AbucoinsTrade,
    };
    use crate::model::OrderType;

    /// Serves canned responses and remembers which product ids were asked for.
    #[derive(Default)]
    struct FakeMarket {
        requested: Mutex<Vec<String>>,
        ticker_time: Option<String>,
    }

    impl FakeMarket {
        fn record(&self, product_id: &str) {
            self.requested.lock().unwrap().push(product_id.to_owned());
        }
    }

    impl RawMarketDataClient for FakeMarket {
        fn get_abucoins_ticker(
            &self,
            product_id: &str,
        ) -> BoxFuture<'_, Result<AbucoinsTicker, Report<ExchangeError>>> {
            self.record(product_id);
            let ticker = AbucoinsTicker {
                trade_id: None,
                price: Decimal::from(10),
                size: None,
                bid: Decimal::from(9),
                ask: Decimal::from(11),
                volume: Decimal::from(100),
                time: self.ticker_time.clone(),
            };
            Box::pin(async move { Ok(ticker) })
        }

        fn get_abucoins_trades(
            &self,
            product_id: &str,
        ) -> BoxFuture<'_, Result<Vec<AbucoinsTrade>, Report<ExchangeError>>> {
            self.record(product_id);
            let trades = vec![AbucoinsTrade {
                time: "2021-01-01T00:00:00.5Z".into(),
                trade_id: "1".into(),
                price: Decimal::from(10),
                size: Decimal::from_str("0.1").unwrap(),
                side: "sell".into(),
            }];
            Box::pin(async move { Ok(trades) })
        }

        fn get_abucoins_order_book(
            &self,
            product_id: &str,
        ) -> BoxFuture<'_, Result<AbucoinsOrderBook, Report<ExchangeError>>> {
            self.record(product_id);
            let book = AbucoinsOrderBook {
                sequence: Some(3),
                asks: Some(vec![AbucoinsLimitOrder(Decimal::from(11), Decimal::ONE, 1)]),
                bids: None,
            };
            Box::pin(async move { Ok(book) })
        }
    }

    fn pair() -> CurrencyPair {
        CurrencyPair::parse("ETH/BTC").unwrap()
    }

    fn service(ticker_time: Option<&str>) -> AbucoinsMarketDataService<FakeMarket> {
        let raw = FakeMarket {
            ticker_time: ticker_time.map(str::to_owned),
            ..FakeMarket::default()
        };
        AbucoinsMarketDataService::new(raw, TimestampNormalizer::default())
    }

    #[tokio::test]
    async fn ticker_uses_product_id() {
        let svc = service(Some("2021-01-01T00:00:00Z"));

        let ticker = svc.get_ticker(&pair()).await.unwrap();

        assert_eq!(ticker.last, Decimal::from(10));
        assert_eq!(ticker.pair, pair());
        assert_eq!(*svc.raw.requested.lock().unwrap(), ["ETH-BTC"]);
    }

    #[tokio::test]
    async fn ticker_without_time_is_adapt_error() {
        let err = service(None).get_ticker(&pair()).await.unwrap_err();
        assert!(matches!(err.current_context(), ExchangeError::Adapt { .. }));
    }

    #[tokio::test]
    async fn trades_adapted() {
        let trades = service(None).get_trades(&pair()).await.unwrap();
        assert_eq!(trades.trades.len(), 1);
        assert_eq!(trades.trades[0].side, OrderType::Ask);
        assert!(trades.trades[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn order_book_missing_side_is_empty() {
        let book = service(None).get_order_book(&pair()).await.unwrap();
        assert_eq!(book.asks.len(), 1);
        assert!(book.bids.is_empty());
    }
}
