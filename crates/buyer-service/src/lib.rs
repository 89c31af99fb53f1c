//! Asset buyer facade.
//!
//! Ties the order fetcher to the quote engine: pools are fetched for the
//! requested asset and for the fee asset, both against the configured
//! currency asset, and handed to [`buyer_quote::calculate`].

use buyer_config::BuyerConfig;
use buyer_orders::{FetcherSettings, OrderFetcher, OrderProvider, OrderProviderError};
use buyer_quote::QuoteRequest;
use buyer_types::{Address, AssetPair, OrderPool, Quote, QuoteError, U256};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum BuyerError {
	#[error("Quote error: {0}")]
	Quote(#[from] QuoteError),

	#[error("Order source error: {0}")]
	Orders(#[from] OrderProviderError),
}

/// Per-request overrides. Unset values fall back to the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct BuyQuoteOptions {
	pub fee_percentage: Option<Decimal>,
	pub slippage_percentage: Option<Decimal>,
	pub should_force_order_refresh: bool,
}

pub struct AssetBuyer {
	fetcher: OrderFetcher,
	config: BuyerConfig,
}

impl AssetBuyer {
	pub fn new(provider: Arc<dyn OrderProvider>, config: BuyerConfig) -> Self {
		let fetcher = OrderFetcher::new(
			provider,
			FetcherSettings {
				fee_asset: config.assets.fee_asset,
				refresh_interval: config.orders.refresh_interval(),
				expiry_buffer_secs: config.orders.expiry_buffer_secs,
			},
		);
		Self { fetcher, config }
	}

	pub fn config(&self) -> &BuyerConfig {
		&self.config
	}

	/// Quotes buying `amount` of `asset` with the currency asset.
	pub async fn get_buy_quote(
		&self,
		asset: Address,
		amount: U256,
		options: BuyQuoteOptions,
	) -> Result<Quote, BuyerError> {
		let assets = &self.config.assets;
		let is_fee_asset = asset == assets.fee_asset;
		let force = options.should_force_order_refresh;

		// the target pool is sorted against the fee pool, which the fetcher
		// resolves first; the second lookup is then served from its cache
		let target_pair = AssetPair::new(asset, assets.currency_asset);
		let target_pool = self.fetcher.get_pool(target_pair, force).await?;
		let fee_pool = if is_fee_asset {
			OrderPool::default()
		} else {
			let fee_pair = AssetPair::new(assets.fee_asset, assets.currency_asset);
			self.fetcher.get_pool(fee_pair, false).await?
		};
		debug!(
			"Quoting {} of {} against {} target and {} fee orders",
			amount,
			asset,
			target_pool.len(),
			fee_pool.len()
		);

		let request = QuoteRequest::new(asset, amount)
			.with_fee_percentage(
				options
					.fee_percentage
					.unwrap_or(self.config.quote.fee_percentage),
			)
			.with_slippage_percentage(
				options
					.slippage_percentage
					.unwrap_or(self.config.quote.slippage_percentage),
			)
			.buying_fee_asset(is_fee_asset);

		match buyer_quote::calculate(&target_pool, &fee_pool, &request) {
			Ok(quote) => {
				info!(
					"Quoted {} of {}: best {} worst {}",
					amount,
					asset,
					quote.best_case_quote_info().total_currency_amount(),
					quote.worst_case_quote_info().total_currency_amount()
				);
				Ok(quote)
			}
			Err(e) => {
				if e.is_liquidity_error() {
					warn!("Cannot quote {} of {}: {}", amount, asset, e);
				}
				Err(e.into())
			}
		}
	}

	/// Maker assets that can be bought with the currency asset.
	pub async fn available_assets(&self) -> Result<Vec<Address>, BuyerError> {
		let assets = self
			.fetcher
			.provider()
			.available_maker_assets(self.config.assets.currency_asset)
			.await?;
		Ok(assets)
	}
}
