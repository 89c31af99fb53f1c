//! Configuration types for the asset buyer.

use alloy_primitives::address;
use buyer_types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyerConfig {
	#[serde(default)]
	pub buyer: BuyerSettings,
	#[serde(default)]
	pub assets: AssetsConfig,
	#[serde(default)]
	pub quote: QuoteDefaults,
	#[serde(default)]
	pub orders: OrderSourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerSettings {
	pub name: String,
	pub log_level: String,
}

impl Default for BuyerSettings {
	fn default() -> Self {
		Self {
			name: "asset-buyer".to_string(),
			log_level: "info".to_string(),
		}
	}
}

/// Assets every quote involves besides the one being bought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
	/// Asset the taker pays with (wrapped ether on mainnet).
	pub currency_asset: Address,
	/// Asset protocol fees are denominated in.
	pub fee_asset: Address,
}

impl Default for AssetsConfig {
	fn default() -> Self {
		Self {
			currency_asset: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
			fee_asset: address!("e41d2489571d322189246dafa5ebde1f4699f498"),
		}
	}
}

/// Defaults applied when a quote request leaves an option unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDefaults {
	pub fee_percentage: Decimal,
	pub slippage_percentage: Decimal,
}

impl Default for QuoteDefaults {
	fn default() -> Self {
		Self {
			fee_percentage: Decimal::ZERO,
			slippage_percentage: Decimal::new(2, 1),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSourceConfig {
	/// JSON file of orders served by the static provider.
	pub orders_file: Option<PathBuf>,
	pub refresh_interval_ms: u64,
	/// Orders expiring within this window are never quoted.
	pub expiry_buffer_secs: u64,
}

impl Default for OrderSourceConfig {
	fn default() -> Self {
		Self {
			orders_file: None,
			refresh_interval_ms: 10_000,
			expiry_buffer_secs: 120,
		}
	}
}

impl OrderSourceConfig {
	pub fn refresh_interval(&self) -> Duration {
		Duration::from_millis(self.refresh_interval_ms)
	}
}
