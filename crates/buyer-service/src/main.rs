use anyhow::{Context, Result};
use buyer_config::{BuyerConfig, ConfigLoader};
use buyer_orders::implementations::memory::StaticOrderProvider;
use buyer_service::{AssetBuyer, BuyQuoteOptions};
use buyer_types::{Address, U256};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "asset-buyer")]
#[command(about = "Quotes asset purchases against open order liquidity", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/buyer.toml")]
	config: PathBuf,

	/// Overrides `buyer.log_level` from the configuration file
	#[arg(long, env = "BUYER_LOG_LEVEL")]
	log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Quote buying an amount of an asset
	Quote {
		/// Asset to buy
		#[arg(long)]
		asset: Address,
		/// Amount to buy, in base units
		#[arg(long)]
		amount: U256,
		/// Affiliate fee percentage, e.g. 0.01
		#[arg(long)]
		fee_percentage: Option<Decimal>,
		/// Slippage percentage, e.g. 0.2
		#[arg(long)]
		slippage_percentage: Option<Decimal>,
		/// Refetch orders even if cached ones are fresh
		#[arg(long)]
		force_refresh: bool,
	},
	/// List the assets that can be bought
	Assets,
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	setup_tracing(log_level(cli.log_level.as_deref(), &config))?;

	match cli.command {
		Commands::Quote {
			asset,
			amount,
			fee_percentage,
			slippage_percentage,
			force_refresh,
		} => {
			let buyer = build_buyer(config).await?;
			let quote = buyer
				.get_buy_quote(
					asset,
					amount,
					BuyQuoteOptions {
						fee_percentage,
						slippage_percentage,
						should_force_order_refresh: force_refresh,
					},
				)
				.await
				.context("Failed to build quote")?;
			println!("{}", serde_json::to_string_pretty(&quote)?);
		}
		Commands::Assets => {
			let buyer = build_buyer(config).await?;
			for asset in buyer.available_assets().await? {
				println!("{}", asset);
			}
		}
		Commands::Validate => {
			info!("Configuration is valid");
			info!("Buyer name: {}", config.buyer.name);
			info!("Currency asset: {}", config.assets.currency_asset);
			info!("Fee asset: {}", config.assets.fee_asset);
		}
	}

	Ok(())
}

async fn build_buyer(config: BuyerConfig) -> Result<AssetBuyer> {
	let orders_file = config
		.orders
		.orders_file
		.clone()
		.context("No orders_file configured")?;
	let provider = StaticOrderProvider::from_file(&orders_file)
		.await
		.with_context(|| format!("Failed to load orders from {:?}", orders_file))?;
	info!("Loaded {} orders from {:?}", provider.len(), orders_file);

	Ok(AssetBuyer::new(Arc::new(provider), config))
}

fn log_level<'a>(flag: Option<&'a str>, config: &'a BuyerConfig) -> &'a str {
	flag.unwrap_or(&config.buyer.log_level)
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_log_level_falls_back_to_config() {
		let mut config = BuyerConfig::default();
		config.buyer.log_level = "warn".to_string();

		assert_eq!(log_level(None, &config), "warn");
		assert_eq!(log_level(Some("trace"), &config), "trace");
	}

	#[test]
	fn test_cli_parses_quote_arguments() {
		let cli = Cli::try_parse_from([
			"asset-buyer",
			"quote",
			"--asset",
			"0x6b175474e89094c44da98b954eedeac495271d0f",
			"--amount",
			"1000",
			"--slippage-percentage",
			"0.05",
		])
		.unwrap();

		match cli.command {
			Commands::Quote {
				amount,
				slippage_percentage,
				fee_percentage,
				force_refresh,
				..
			} => {
				assert_eq!(amount, U256::from(1000));
				assert_eq!(slippage_percentage, Some(Decimal::new(5, 2)));
				assert_eq!(fee_percentage, None);
				assert!(!force_refresh);
			}
			_ => panic!("expected the quote command"),
		}
	}
}
