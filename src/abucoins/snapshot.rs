use std::path::{Path, PathBuf};

use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use tracing::info;

use crate::abucoins::EXCHANGE_NAME;
use crate::abucoins::dto::AbucoinsAccount;
use crate::error::ExchangeError;
use crate::service::RawAccountClient;

/// Serves accounts from a saved `GET /accounts` response body.
///
/// Request signing is not implemented, so this is the only way to feed
/// account data into [`AbucoinsAccountService`](super::account::AbucoinsAccountService).
pub struct SnapshotAccountClient {
    path: PathBuf,
}

impl SnapshotAccountClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decode an `/accounts` response body.
pub fn parse_accounts(body: &str) -> Result<Vec<AbucoinsAccount>, Report<ExchangeError>> {
    serde_json::from_str(body).change_context(ExchangeError::ResponseParse {
        exchange: EXCHANGE_NAME.into(),
    })
}

impl RawAccountClient for SnapshotAccountClient {
    fn get_abucoins_accounts(
        &self,
    ) -> BoxFuture<'_, Result<Vec<AbucoinsAccount>, Report<ExchangeError>>> {
        Box::pin(async move {
            let body = tokio::fs::read_to_string(&self.path)
                .await
                .change_context(ExchangeError::Request {
                    exchange: EXCHANGE_NAME.into(),
                })
                .attach_with(|| format!("path: {}", self.path.display()))?;

            let accounts = parse_accounts(&body)
                .attach_with(|| format!("path: {}", self.path.display()))?;

            info!(
                path = %self.path.display(),
                accounts = accounts.len(),
                "abucoins account snapshot loaded"
            );
            Ok(accounts)
        })
    }
}
