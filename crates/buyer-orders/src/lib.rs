//! Order sources for the asset buyer.
//!
//! The quote engine never fetches orders itself. An [`OrderProvider`] is
//! injected instead, and the [`fetcher::OrderFetcher`] turns its raw
//! responses into sorted, cached [`OrderPool`](buyer_types::OrderPool)s.

use async_trait::async_trait;
use buyer_types::{Address, AssetPair, FillableOrder};
use thiserror::Error;

pub mod fetcher;
pub mod processor;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

pub use fetcher::{FetcherSettings, OrderFetcher};
pub use processor::{fee_rate, process_response, FeeRate, PoolKind};

/// Errors that can occur while fetching orders.
#[derive(Debug, Error)]
pub enum OrderProviderError {
	/// Error that occurs when an order source cannot be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when order data cannot be decoded.
	#[error("Parse error: {0}")]
	Parse(String),
	/// Error reported by the provider backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Request for the open orders of one asset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdersRequest {
	pub asset_pair: AssetPair,
}

/// Orders returned by a provider, with whatever fillability it knows about.
///
/// Providers may return orders for other pairs, expired orders or unsorted
/// orders; [`process_response`] cleans them up.
#[derive(Debug, Clone, Default)]
pub struct OrdersResponse {
	pub orders: Vec<FillableOrder>,
}

/// Trait defining the interface for order sources.
///
/// Implementations might query a relayer order book, read a static list or
/// wrap an on-chain validator that fills in true remaining amounts.
#[async_trait]
pub trait OrderProvider: Send + Sync {
	/// Returns the open orders for the requested pair.
	async fn get_orders(&self, request: &OrdersRequest)
		-> Result<OrdersResponse, OrderProviderError>;

	/// Returns the maker assets that can be bought with `taker_asset`.
	async fn available_maker_assets(
		&self,
		taker_asset: Address,
	) -> Result<Vec<Address>, OrderProviderError>;
}
