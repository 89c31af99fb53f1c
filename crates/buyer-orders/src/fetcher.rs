//! Cached access to processed order pools.
//!
//! One pool is cached per asset pair. A cached pool is served until it is
//! older than the refresh interval or the caller forces a refresh.

use buyer_types::{Address, AssetPair, OrderPool, Timestamp};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::processor::{fee_rate, process_response, PoolKind};
use crate::{OrderProvider, OrderProviderError, OrdersRequest};

/// Settings for an [`OrderFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherSettings {
	/// Protocol fee asset. Pools selling it are sorted by net rate; other
	/// pools price their taker fees in at the best fee order's rate.
	pub fee_asset: Address,
	/// How long a fetched pool stays fresh.
	pub refresh_interval: Duration,
	/// Orders expiring within this many seconds are dropped.
	pub expiry_buffer_secs: u64,
}

struct CachedPool {
	pool: OrderPool,
	fetched_at: Instant,
}

/// Fetches, processes and caches order pools from an [`OrderProvider`].
pub struct OrderFetcher {
	provider: Arc<dyn OrderProvider>,
	settings: FetcherSettings,
	cache: DashMap<AssetPair, CachedPool>,
}

impl OrderFetcher {
	pub fn new(provider: Arc<dyn OrderProvider>, settings: FetcherSettings) -> Self {
		Self {
			provider,
			settings,
			cache: DashMap::new(),
		}
	}

	pub fn provider(&self) -> &Arc<dyn OrderProvider> {
		&self.provider
	}

	/// Returns the processed pool for `pair`, fetching it if the cached copy
	/// is missing, stale, or `force_refresh` is set.
	///
	/// Target pools are sorted by a rate that prices in their taker fees, so
	/// the fee pool for the same taker asset is resolved first, under the
	/// same refresh rules.
	pub async fn get_pool(
		&self,
		pair: AssetPair,
		force_refresh: bool,
	) -> Result<OrderPool, OrderProviderError> {
		if pair.maker_asset == self.settings.fee_asset {
			return self.fetch_pool(pair, PoolKind::Fee, force_refresh).await;
		}

		let fee_pair = AssetPair::new(self.settings.fee_asset, pair.taker_asset);
		let fee_pool = self
			.fetch_pool(fee_pair, PoolKind::Fee, force_refresh)
			.await?;
		let kind = PoolKind::Target {
			fee_rate: fee_rate(&fee_pool),
		};
		self.fetch_pool(pair, kind, force_refresh).await
	}

	async fn fetch_pool(
		&self,
		pair: AssetPair,
		kind: PoolKind,
		force_refresh: bool,
	) -> Result<OrderPool, OrderProviderError> {
		if !force_refresh {
			if let Some(cached) = self.cache.get(&pair) {
				if cached.fetched_at.elapsed() < self.settings.refresh_interval {
					debug!("Serving cached orders for {}", pair);
					return Ok(cached.pool.clone());
				}
			}
		}

		let response = self
			.provider
			.get_orders(&OrdersRequest { asset_pair: pair })
			.await?;
		let fetched = response.orders.len();

		let pool = process_response(
			response,
			&pair,
			current_timestamp(),
			self.settings.expiry_buffer_secs,
			kind,
		);

		info!(
			"Refreshed orders for {}: {} usable of {} fetched",
			pair,
			pool.len(),
			fetched
		);

		self.cache.insert(
			pair,
			CachedPool {
				pool: pool.clone(),
				fetched_at: Instant::now(),
			},
		);

		Ok(pool)
	}

	/// Drops the cached pool for `pair`, if any.
	pub fn invalidate(&self, pair: &AssetPair) {
		self.cache.remove(pair);
	}
}

fn current_timestamp() -> Timestamp {
	u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}
