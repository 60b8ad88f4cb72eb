use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

// ── Market data ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbucoinsTrade {
    pub time: String,
    pub trade_id: String,
    pub price: Decimal,
    pub size: Decimal,
    /// `"buy"` or `"sell"` as reported by the exchange.
    pub side: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbucoinsTicker {
    #[serde(default)]
    pub trade_id: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub size: Option<Decimal>,
    pub bid: Decimal,
    pub ask: Decimal,
    pub volume: Decimal,
    #[serde(default)]
    pub time: Option<String>,
}

impl fmt::Display for AbucoinsTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AbucoinsTicker[trade_id={}, price={}, bid={}, ask={}, volume={}, time={}]",
            self.trade_id.as_deref().unwrap_or("-"),
            self.price,
            self.bid,
            self.ask,
            self.volume,
            self.time.as_deref().unwrap_or("-"),
        )
    }
}

/// Level-2 book snapshot. Either side may be missing from the response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbucoinsOrderBook {
    #[serde(default)]
    pub sequence: Option<u64>,
    #[serde(default)]
    pub asks: Option<Vec<AbucoinsLimitOrder>>,
    #[serde(default)]
    pub bids: Option<Vec<AbucoinsLimitOrder>>,
}

/// One aggregated book level, sent as `[price, size, num_orders]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbucoinsLimitOrder(pub Decimal, pub Decimal, pub u32);

impl AbucoinsLimitOrder {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn size(&self) -> Decimal {
        self.1
    }

    pub fn num_orders(&self) -> u32 {
        self.2
    }
}

// ── Account ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbucoinsAccount {
    pub id: String,
    pub currency: String,
    pub balance: Decimal,
    pub available: Decimal,
    pub hold: Decimal,
    pub profile_id: i64,
}
