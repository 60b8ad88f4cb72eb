//! Service contracts.
//!
//! `Raw*` traits expose an exchange's native calls; the generic services are
//! composed on top of them and speak only the shared model.
//!
//! Uses `BoxFuture` (from `futures` crate) instead of `async fn` in trait
//! to keep the traits object-safe (`dyn AccountService`).

use error_stack::Report;
use futures::future::BoxFuture;
use rust_decimal::Decimal;

use crate::abucoins::dto::{AbucoinsAccount, AbucoinsOrderBook, AbucoinsTicker, AbucoinsTrade};
use crate::error::ExchangeError;
use crate::model::{
    AccountInfo, Currency, CurrencyPair, FundingRecord, OrderBook, Ticker, TradeHistoryParams,
    Trades, WithdrawFundsParams,
};

/// Native Abucoins account calls.
pub trait RawAccountClient: Send + Sync {
    fn get_abucoins_accounts(
        &self,
    ) -> BoxFuture<'_, Result<Vec<AbucoinsAccount>, Report<ExchangeError>>>;
}

/// Native Abucoins public market-data calls, keyed by product id (`BTC-PLN`).
pub trait RawMarketDataClient: Send + Sync {
    fn get_abucoins_ticker(
        &self,
        product_id: &str,
    ) -> BoxFuture<'_, Result<AbucoinsTicker, Report<ExchangeError>>>;

    fn get_abucoins_trades(
        &self,
        product_id: &str,
    ) -> BoxFuture<'_, Result<Vec<AbucoinsTrade>, Report<ExchangeError>>>;

    fn get_abucoins_order_book(
        &self,
        product_id: &str,
    ) -> BoxFuture<'_, Result<AbucoinsOrderBook, Report<ExchangeError>>>;
}

/// Exchange-agnostic account operations.
pub trait AccountService: Send + Sync {
    fn get_account_info(&self) -> BoxFuture<'_, Result<AccountInfo, Report<ExchangeError>>>;

    /// Returns the deposit address for `currency`.
    fn request_deposit_address(
        &self,
        currency: &Currency,
        arguments: &[String],
    ) -> BoxFuture<'_, Result<String, Report<ExchangeError>>>;

    /// Returns the exchange's withdrawal id.
    fn withdraw_funds(
        &self,
        params: &WithdrawFundsParams,
    ) -> BoxFuture<'_, Result<String, Report<ExchangeError>>>;

    fn withdraw_funds_to(
        &self,
        currency: &Currency,
        amount: Decimal,
        address: &str,
    ) -> BoxFuture<'_, Result<String, Report<ExchangeError>>>;

    fn create_funding_history_params(&self) -> Result<TradeHistoryParams, Report<ExchangeError>>;

    fn get_funding_history(
        &self,
        params: &TradeHistoryParams,
    ) -> BoxFuture<'_, Result<Vec<FundingRecord>, Report<ExchangeError>>>;
}

/// Exchange-agnostic public market data.
pub trait MarketDataService: Send + Sync {
    fn get_ticker(&self, pair: &CurrencyPair) -> BoxFuture<'_, Result<Ticker, Report<ExchangeError>>>;

    fn get_trades(&self, pair: &CurrencyPair) -> BoxFuture<'_, Result<Trades, Report<ExchangeError>>>;

    fn get_order_book(
        &self,
        pair: &CurrencyPair,
    ) -> BoxFuture<'_, Result<OrderBook, Report<ExchangeError>>>;
}
