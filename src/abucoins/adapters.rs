//! Conversions from Abucoins REST shapes into the generic model.

use chrono::Utc;
use error_stack::{Report, ResultExt};

use crate::abucoins::dto::{
    AbucoinsAccount, AbucoinsLimitOrder, AbucoinsOrderBook, AbucoinsTicker, AbucoinsTrade,
};
use crate::error::AdaptError;
use crate::model::{
    AccountInfo, Balance, Currency, CurrencyPair, LimitOrder, OrderBook, OrderType, Ticker,
    Trade, TradeSortType, Trades, Wallet,
};
use crate::timestamp::TimestampNormalizer;

/// Abucoins does not report a usable last trade id for a page of trades.
const LAST_TRADE_ID: i64 = 0;

/// Adapt a single trade. Only the exact side string `"buy"` is a bid.
///
/// An unparsable trade time leaves `timestamp` empty; the rejection has
/// already gone to the normalizer's diagnostics sink.
pub fn adapt_trade(
    trade: &AbucoinsTrade,
    pair: &CurrencyPair,
    normalizer: &TimestampNormalizer,
) -> Trade {
    let side = if trade.side == "buy" {
        OrderType::Bid
    } else {
        OrderType::Ask
    };

    Trade {
        side,
        amount: trade.size,
        pair: pair.clone(),
        price: trade.price,
        timestamp: normalizer.normalize(&trade.time).ok(),
        id: trade.trade_id.clone(),
    }
}

/// Adapt a page of trades, keeping the exchange's order.
pub fn adapt_trades(
    trades: &[AbucoinsTrade],
    pair: &CurrencyPair,
    normalizer: &TimestampNormalizer,
) -> Trades {
    let trades = trades
        .iter()
        .map(|trade| adapt_trade(trade, pair, normalizer))
        .collect();

    Trades {
        trades,
        last_id: LAST_TRADE_ID,
        sort_type: TradeSortType::SortByTimestamp,
    }
}

/// Adapt a ticker. A ticker is never built without a valid timestamp.
pub fn adapt_ticker(
    ticker: &AbucoinsTicker,
    pair: &CurrencyPair,
    normalizer: &TimestampNormalizer,
) -> Result<Ticker, Report<AdaptError>> {
    let Some(raw_time) = ticker.time.as_deref() else {
        return Err(Report::new(AdaptError::MissingTimestamp {
            record: ticker.to_string(),
        }));
    };

    let timestamp = normalizer
        .normalize(raw_time)
        .change_context(AdaptError::InvalidTimestamp {
            record: ticker.to_string(),
        })?;

    Ok(Ticker {
        pair: pair.clone(),
        last: ticker.price,
        bid: ticker.bid,
        ask: ticker.ask,
        volume: ticker.volume,
        timestamp,
    })
}

/// Adapt a level-2 book. The snapshot carries no time of its own, so the
/// result is stamped with the conversion time.
pub fn adapt_order_book(book: &AbucoinsOrderBook, pair: &CurrencyPair) -> OrderBook {
    let asks = create_orders(pair, OrderType::Ask, book.asks.as_deref());
    let bids = create_orders(pair, OrderType::Bid, book.bids.as_deref());

    OrderBook {
        timestamp: Utc::now(),
        asks,
        bids,
    }
}

pub fn adapt_account_info(accounts: &[AbucoinsAccount]) -> Result<AccountInfo, Report<AdaptError>> {
    let wallets = accounts
        .iter()
        .map(adapt_wallet)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AccountInfo {
        id: String::new(),
        wallets,
    })
}

/// One wallet per account, holding one balance in the account's currency.
pub fn adapt_wallet(account: &AbucoinsAccount) -> Result<Wallet, Report<AdaptError>> {
    let currency = Currency::from_code(&account.currency)
        .attach_with(|| format!("account id: {}", account.id))?;

    let balance = Balance {
        currency,
        total: account.balance,
        available: account.available,
        frozen: account.hold,
    };

    Ok(Wallet {
        id: account.id.clone(),
        name: account.profile_id.to_string(),
        balances: vec![balance],
    })
}

/// Build limit orders for one side of the book. A missing side is empty.
pub fn create_orders(
    pair: &CurrencyPair,
    side: OrderType,
    orders: Option<&[AbucoinsLimitOrder]>,
) -> Vec<LimitOrder> {
    let Some(orders) = orders else {
        return Vec::new();
    };

    orders
        .iter()
        .map(|order| create_order(pair, order, side))
        .collect()
}

pub fn create_order(pair: &CurrencyPair, level: &AbucoinsLimitOrder, side: OrderType) -> LimitOrder {
    LimitOrder {
        side,
        original_amount: level.size(),
        pair: pair.clone(),
        id: String::new(),
        timestamp: None,
        limit_price: level.price(),
    }
}
