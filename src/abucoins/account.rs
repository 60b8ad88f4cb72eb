use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use rust_decimal::Decimal;
use tracing::debug;

use crate::abucoins::EXCHANGE_NAME;
use crate::abucoins::adapters::adapt_account_info;
use crate::error::ExchangeError;
use crate::model::{AccountInfo, Currency, FundingRecord, TradeHistoryParams, WithdrawFundsParams};
use crate::service::{AccountService, RawAccountClient};

/// Generic account service backed by a raw Abucoins client.
///
/// Only account balances are supported; every funding operation fails
/// with a permanent capability error.
pub struct AbucoinsAccountService<C> {
    raw: C,
}

impl<C: RawAccountClient> AbucoinsAccountService<C> {
    pub fn new(raw: C) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &C {
        &self.raw
    }
}

fn not_available(operation: &str) -> Report<ExchangeError> {
    Report::new(ExchangeError::NotAvailable {
        exchange: EXCHANGE_NAME.into(),
        operation: operation.into(),
    })
}

fn not_yet_implemented(operation: &str) -> Report<ExchangeError> {
    Report::new(ExchangeError::NotYetImplemented {
        exchange: EXCHANGE_NAME.into(),
        operation: operation.into(),
    })
}

impl<C: RawAccountClient> AccountService for AbucoinsAccountService<C> {
    fn get_account_info(&self) -> BoxFuture<'_, Result<AccountInfo, Report<ExchangeError>>> {
        Box::pin(async move {
            let accounts = self.raw.get_abucoins_accounts().await?;
            let info = adapt_account_info(&accounts).change_context(ExchangeError::Adapt {
                exchange: EXCHANGE_NAME.into(),
            })?;

            debug!(wallets = info.wallets.len(), "abucoins account info adapted");
            Ok(info)
        })
    }

    fn request_deposit_address(
        &self,
        _currency: &Currency,
        _arguments: &[String],
    ) -> BoxFuture<'_, Result<String, Report<ExchangeError>>> {
        Box::pin(async { Err(not_available("request_deposit_address")) })
    }

    fn withdraw_funds(
        &self,
        _params: &WithdrawFundsParams,
    ) -> BoxFuture<'_, Result<String, Report<ExchangeError>>> {
        Box::pin(async { Err(not_available("withdraw_funds")) })
    }

    fn withdraw_funds_to(
        &self,
        _currency: &Currency,
        _amount: Decimal,
        _address: &str,
    ) -> BoxFuture<'_, Result<String, Report<ExchangeError>>> {
        Box::pin(async { Err(not_available("withdraw_funds")) })
    }

    fn create_funding_history_params(&self) -> Result<TradeHistoryParams, Report<ExchangeError>> {
        Err(not_available("create_funding_history_params"))
    }

    fn get_funding_history(
        &self,
        _params: &TradeHistoryParams,
    ) -> BoxFuture<'_, Result<Vec<FundingRecord>, Report<ExchangeError>>> {
        Box::pin(async { Err(not_yet_implemented("get_funding_history")) })
    }
}
