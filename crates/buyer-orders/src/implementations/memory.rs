//! Order provider backed by a fixed list of orders.
//!
//! The list can be supplied directly or loaded from a JSON file holding an
//! array of orders, each optionally wrapped with its remaining fillable
//! amount.

use async_trait::async_trait;
use buyer_types::{Address, FillableOrder, Order};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::{OrderProvider, OrderProviderError, OrdersRequest, OrdersResponse};

#[derive(Deserialize)]
#[serde(untagged)]
enum OrderEntry {
	Fillable(FillableOrder),
	Bare(Order),
}

impl From<OrderEntry> for FillableOrder {
	fn from(entry: OrderEntry) -> Self {
		match entry {
			OrderEntry::Fillable(fillable) => fillable,
			OrderEntry::Bare(order) => FillableOrder::fully_fillable(order),
		}
	}
}

/// In-memory order provider.
///
/// Returns every stored order matching the requested pair, in the order the
/// orders were supplied.
#[derive(Debug, Clone, Default)]
pub struct StaticOrderProvider {
	orders: Vec<FillableOrder>,
}

impl StaticOrderProvider {
	pub fn new(orders: Vec<FillableOrder>) -> Self {
		Self { orders }
	}

	/// Creates a provider from orders whose fillable amounts are unknown.
	pub fn from_orders(orders: Vec<Order>) -> Self {
		Self::new(orders.into_iter().map(FillableOrder::fully_fillable).collect())
	}

	/// Parses a JSON array of orders.
	pub fn from_json(contents: &str) -> Result<Self, OrderProviderError> {
		let entries: Vec<OrderEntry> =
			serde_json::from_str(contents).map_err(|e| OrderProviderError::Parse(e.to_string()))?;
		Ok(Self::new(entries.into_iter().map(Into::into).collect()))
	}

	/// Loads a JSON array of orders from a file.
	pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OrderProviderError> {
		let path = path.as_ref();
		let contents = tokio::fs::read_to_string(path).await?;
		let provider = Self::from_json(&contents)?;
		debug!("Loaded {} orders from {:?}", provider.orders.len(), path);
		Ok(provider)
	}

	pub fn len(&self) -> usize {
		self.orders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.orders.is_empty()
	}
}

#[async_trait]
impl OrderProvider for StaticOrderProvider {
	async fn get_orders(
		&self,
		request: &OrdersRequest,
	) -> Result<OrdersResponse, OrderProviderError> {
		let orders = self
			.orders
			.iter()
			.filter(|entry| entry.order.asset_pair() == request.asset_pair)
			.cloned()
			.collect();
		Ok(OrdersResponse { orders })
	}

	async fn available_maker_assets(
		&self,
		taker_asset: Address,
	) -> Result<Vec<Address>, OrderProviderError> {
		let mut assets = Vec::new();
		for entry in &self.orders {
			let order = &entry.order;
			if order.taker_asset == taker_asset && !assets.contains(&order.maker_asset) {
				assets.push(order.maker_asset);
			}
		}
		Ok(assets)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use buyer_types::{AssetPair, Bytes, U256};
	use std::io::Write;

	const WETH: Address = Address::repeat_byte(0xee);

	fn order(maker_asset: Address, maker: u64) -> Order {
		Order {
			maker_address: Address::repeat_byte(0x01),
			taker_address: Address::ZERO,
			fee_recipient_address: Address::ZERO,
			maker_asset,
			taker_asset: WETH,
			maker_asset_amount: U256::from(maker),
			taker_asset_amount: U256::from(maker / 2),
			maker_fee: U256::ZERO,
			taker_fee: U256::ZERO,
			expiration_time_seconds: 2_000_000_000,
			salt: U256::from(maker),
			signature: Bytes::new(),
		}
	}

	#[tokio::test]
	async fn test_filters_by_pair() {
		let dai = Address::repeat_byte(0xda);
		let zrx = Address::repeat_byte(0xfe);
		let provider =
			StaticOrderProvider::from_orders(vec![order(dai, 100), order(zrx, 50), order(dai, 10)]);

		let response = provider
			.get_orders(&OrdersRequest {
				asset_pair: AssetPair::new(dai, WETH),
			})
			.await
			.unwrap();
		assert_eq!(response.orders.len(), 2);
		assert_eq!(
			response.orders[0].remaining(),
			U256::from(100),
			"unknown fillability defaults to the full maker amount"
		);

		let assets = provider.available_maker_assets(WETH).await.unwrap();
		assert_eq!(assets, vec![dai, zrx]);
		assert!(provider.available_maker_assets(dai).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_from_file_accepts_both_layouts() {
		let dai = Address::repeat_byte(0xda);
		let fillable = FillableOrder::new(order(dai, 100), U256::from(40));
		let json = serde_json::json!([fillable, order(dai, 80)]).to_string();

		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(json.as_bytes()).unwrap();

		let provider = StaticOrderProvider::from_file(file.path()).await.unwrap();
		assert_eq!(provider.len(), 2);
		assert_eq!(provider.orders[0].remaining(), U256::from(40));
		assert_eq!(provider.orders[1].remaining(), U256::from(80));
	}

	#[test]
	fn test_invalid_json() {
		let result = StaticOrderProvider::from_json("{\"not\": \"a list\"}");
		assert!(matches!(result, Err(OrderProviderError::Parse(_))));
	}

	#[test]
	fn test_relayer_order_layout() {
		let json = r#"[{
			"makerAddress": "0x1111111111111111111111111111111111111111",
			"takerAddress": "0x0000000000000000000000000000000000000000",
			"feeRecipientAddress": "0x0000000000000000000000000000000000000000",
			"makerAsset": "0xdadadadadadadadadadadadadadadadadadadada",
			"takerAsset": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
			"makerAssetAmount": "1000000000000000000",
			"takerAssetAmount": "2000000000000000",
			"makerFee": "0",
			"takerFee": "0",
			"expirationTimeSeconds": "1700000000",
			"salt": "42",
			"signature": "0x1b"
		}]"#;
		let provider = StaticOrderProvider::from_json(json).unwrap();
		assert_eq!(provider.orders[0].order.expiration_time_seconds, 1_700_000_000);
		assert_eq!(provider.orders[0].order.taker_asset, WETH);
	}
}
