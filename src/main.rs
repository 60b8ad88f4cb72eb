use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use derive_more::{Display, Error};
use error_stack::{Report, ResultExt};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use abucoins_adapter::abucoins::account::AbucoinsAccountService;
use abucoins_adapter::abucoins::http::AbucoinsHttpClient;
use abucoins_adapter::abucoins::market_data::AbucoinsMarketDataService;
use abucoins_adapter::abucoins::snapshot::SnapshotAccountClient;
use abucoins_adapter::config::{self, AppConfig};
use abucoins_adapter::diagnostics::TracingDiagnostics;
use abucoins_adapter::model::CurrencyPair;
use abucoins_adapter::service::{AccountService, MarketDataService};
use abucoins_adapter::timestamp::TimestampNormalizer;

#[derive(Debug, Display, Error)]
pub enum AppError {
    #[display("configuration error")]
    Config,
    #[display("invalid argument")]
    Argument,
    #[display("exchange error")]
    Exchange,
    #[display("output error")]
    Output,
}

#[derive(Parser)]
#[command(name = "abucoins-adapter", about = "Abucoins data in the shared trading model")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Latest ticker for a pair (`BTC/PLN` or `BTC-PLN`)
    Ticker { pair: String },
    /// Recent public trades for a pair
    Trades { pair: String },
    /// Level-2 order book for a pair
    Book { pair: String },
    /// Wallets from a saved `/accounts` response
    Accounts {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(report) = run().await {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Report<AppError>> {
    let cli = Cli::parse();
    let config = load_config(Path::new(&cli.config))?;

    init_tracing(&config);

    let normalizer = TimestampNormalizer::new(Arc::new(TracingDiagnostics));

    match cli.command {
        Command::Ticker { pair } => {
            let service = market_data_service(&config, normalizer)?;
            let pair = parse_pair(&pair)?;
            let ticker = service
                .get_ticker(&pair)
                .await
                .change_context(AppError::Exchange)?;
            print_json(&ticker)
        }
        Command::Trades { pair } => {
            let service = market_data_service(&config, normalizer)?;
            let pair = parse_pair(&pair)?;
            let trades = service
                .get_trades(&pair)
                .await
                .change_context(AppError::Exchange)?;
            print_json(&trades)
        }
        Command::Book { pair } => {
            let service = market_data_service(&config, normalizer)?;
            let pair = parse_pair(&pair)?;
            let book = service
                .get_order_book(&pair)
                .await
                .change_context(AppError::Exchange)?;
            print_json(&book)
        }
        Command::Accounts { file } => {
            let service = AbucoinsAccountService::new(SnapshotAccountClient::new(file));
            let info = service
                .get_account_info()
                .await
                .change_context(AppError::Exchange)?;
            info!(wallets = info.wallets.len(), "account info ready");
            print_json(&info)
        }
    }
}

/// A missing config file at the default location means "use defaults".
fn load_config(path: &Path) -> Result<AppConfig, Report<AppError>> {
    if !path.exists() && path == Path::new("config.toml") {
        return config::parse("").change_context(AppError::Config);
    }
    config::load(path).change_context(AppError::Config)
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::new(&config.general.log_level);
    match config.general.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn market_data_service(
    config: &AppConfig,
    normalizer: TimestampNormalizer,
) -> Result<AbucoinsMarketDataService<AbucoinsHttpClient>, Report<AppError>> {
    let rate = config.exchange.rate().change_context(AppError::Config)?;
    let client = AbucoinsHttpClient::new(config.exchange.base_url.clone(), rate);
    Ok(AbucoinsMarketDataService::new(client, normalizer))
}

fn parse_pair(raw: &str) -> Result<CurrencyPair, Report<AppError>> {
    CurrencyPair::parse(raw)
        .change_context(AppError::Argument)
        .attach_with(|| format!("pair: {raw}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Report<AppError>> {
    let json = serde_json::to_string_pretty(value).change_context(AppError::Output)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_pair_subcommand() {
        let cli = Cli::try_parse_from(["abucoins-adapter", "ticker", "BTC-PLN"]).unwrap();
        assert_eq!(cli.config, "config.toml");
        assert!(matches!(cli.command, Command::Ticker { ref pair } if pair == "BTC-PLN"));
    }

    #[test]
    fn cli_accounts_requires_file() {
        assert!(Cli::try_parse_from(["abucoins-adapter", "accounts"]).is_err());
        let cli =
            Cli::try_parse_from(["abucoins-adapter", "-c", "x.toml", "accounts", "--file", "a.json"])
                .unwrap();
        assert_eq!(cli.config, "x.toml");
        assert!(matches!(cli.command, Command::Accounts { .. }));
    }

    #[test]
    fn parse_pair_rejects_garbage() {
        let err = parse_pair("BTCPLN").unwrap_err();
        assert!(matches!(err.current_context(), AppError::Argument));
    }
}
