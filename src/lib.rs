//! Adapters from the Abucoins REST API into a shared, exchange-agnostic
//! trading model: trades, tickers, level-2 books and account balances.

pub mod abucoins;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod service;
pub mod timestamp;
