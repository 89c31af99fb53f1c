//! Common types used throughout the asset buyer.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used ethereum types
pub use alloy_primitives::{Address, Bytes, U256};

/// Timestamp (Unix seconds)
pub type Timestamp = u64;

/// A pair of assets identified by their token contract addresses.
///
/// Orders in a pool all offer `maker_asset` in exchange for `taker_asset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPair {
	/// Asset the makers sell.
	pub maker_asset: Address,
	/// Asset the taker pays with.
	pub taker_asset: Address,
}

impl AssetPair {
	pub fn new(maker_asset: Address, taker_asset: Address) -> Self {
		Self {
			maker_asset,
			taker_asset,
		}
	}
}

impl fmt::Display for AssetPair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.maker_asset, self.taker_asset)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_asset_pair_display() {
		let pair = AssetPair::new(Address::repeat_byte(0x11), Address::repeat_byte(0x22));
		let rendered = pair.to_string();
		assert!(rendered.contains('/'));
		assert!(rendered.starts_with("0x1111"));
	}
}
