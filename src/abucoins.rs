pub mod account;
pub mod adapters;
pub mod dto;
pub mod http;
pub mod market_data;
pub mod snapshot;

/// Name used in error contexts and log fields.
pub const EXCHANGE_NAME: &str = "abucoins";
