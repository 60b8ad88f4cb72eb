use std::fmt;

use chrono::{DateTime, Utc};
use error_stack::{Report, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AdaptError;

const MAX_CURRENCY_CODE_LEN: usize = 10;

/// A currency identified by its upper-case ticker code (e.g. `"BTC"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Look up a currency by exchange code.
    ///
    /// Codes are case-insensitive; `XBT` is folded into `BTC`. Empty codes
    /// and codes with anything other than ASCII letters and digits are
    /// rejected.
    pub fn from_code(code: &str) -> Result<Self, Report<AdaptError>> {
        let trimmed = code.trim();
        if trimmed.is_empty()
            || trimmed.len() > MAX_CURRENCY_CODE_LEN
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            bail!(AdaptError::InvalidCurrency {
                code: code.to_owned(),
            });
        }

        let upper = trimmed.to_ascii_uppercase();
        let canonical = match upper.as_str() {
            "XBT" => "BTC".to_owned(),
            _ => upper,
        };
        Ok(Self(canonical))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base/counter pair, displayed as `BASE/COUNTER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub counter: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, counter: Currency) -> Self {
        Self { base, counter }
    }

    /// Parse `BTC/PLN` or an Abucoins product id such as `BTC-PLN`.
    pub fn parse(s: &str) -> Result<Self, Report<AdaptError>> {
        let (base, counter) = s
            .split_once('/')
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| {
                Report::new(AdaptError::InvalidCurrency { code: s.to_owned() })
                    .attach("expected BASE/COUNTER or BASE-COUNTER")
            })?;
        Ok(Self::new(Currency::from_code(base)?, Currency::from_code(counter)?))
    }

    /// Abucoins product id, e.g. `BTC-PLN`.
    pub fn product_id(&self) -> String {
        format!("{}-{}", self.base, self.counter)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

/// Side of a trade or resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Bid,
    Ask,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub side: OrderType,
    pub amount: Decimal,
    pub pair: CurrencyPair,
    pub price: Decimal,
    /// `None` when the exchange timestamp could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
    pub id: String,
}

/// Ordering the producer of a [`Trades`] collection claims for it.
///
/// This is a label only; nothing sorts on its behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeSortType {
    SortByTimestamp,
    SortById,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trades {
    pub trades: Vec<Trade>,
    pub last_id: i64,
    pub sort_type: TradeSortType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticker {
    pub pair: CurrencyPair,
    pub last: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub volume: Decimal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitOrder {
    pub side: OrderType,
    pub original_amount: Decimal,
    pub pair: CurrencyPair,
    pub id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub limit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBook {
    pub timestamp: DateTime<Utc>,
    pub asks: Vec<LimitOrder>,
    pub bids: Vec<LimitOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub currency: Currency,
    pub total: Decimal,
    pub available: Decimal,
    pub frozen: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub balances: Vec<Balance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountInfo {
    pub id: String,
    pub wallets: Vec<Wallet>,
}

/// Parameters for the withdrawal call shape that takes a bundled request.
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawFundsParams {
    pub currency: Currency,
    pub amount: Decimal,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeHistoryParams {
    pub currency: Option<Currency>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingRecord {
    pub currency: Currency,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
    pub address: Option<String>,
}
