use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config file")]
    ReadFile,
    #[display("failed to parse config: {reason}")]
    Parse { reason: String },
    #[display("invalid config: {field}")]
    Validation { field: String },
}

/// A raw exchange timestamp that could not be repaired into the canonical
/// `yyyy-MM-ddTHH:mm:ss.SSS` form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unable to parse timestamp raw={raw:?} modified={modified:?}: {reason}")]
pub struct TimestampParseFailure {
    pub raw: String,
    pub modified: String,
    pub reason: String,
}

#[derive(Debug, Display, Error)]
pub enum AdaptError {
    #[display("missing timestamp for {record}")]
    MissingTimestamp { record: String },
    #[display("invalid timestamp for {record}")]
    InvalidTimestamp { record: String },
    #[display("invalid currency code {code:?}")]
    InvalidCurrency { code: String },
}

#[derive(Debug, Display, Error)]
pub enum ExchangeError {
    #[display("request to {exchange} failed")]
    Request { exchange: String },
    #[display("failed to parse response from {exchange}")]
    ResponseParse { exchange: String },
    #[display("failed to adapt response from {exchange}")]
    Adapt { exchange: String },
    #[display("{operation} is not available from {exchange}")]
    NotAvailable { exchange: String, operation: String },
    #[display("{operation} is not yet implemented for {exchange}")]
    NotYetImplemented { exchange: String, operation: String },
}
