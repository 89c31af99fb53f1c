//! Turns raw provider responses into order pools the quote engine accepts.

use alloy_primitives::Uint;
use buyer_types::{AssetPair, FillableOrder, OrderPool, Timestamp, U256};
use std::cmp::Ordering;

use crate::OrdersResponse;

/// Wide enough for `(taker * a + fee * b) * maker` over 256-bit terms.
type Wide = Uint<1024, 16>;

/// Currency paid per unit of fee asset, as `currency / fee_asset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRate {
	pub currency: U256,
	pub fee_asset: U256,
}

/// Rate of the cheapest usable order in a fee pool sorted best first.
pub fn fee_rate(fee_pool: &OrderPool) -> Option<FeeRate> {
	fee_pool.orders().find_map(|order| {
		let net = order.net_maker_asset_amount();
		(!net.is_zero()).then_some(FeeRate {
			currency: order.taker_asset_amount,
			fee_asset: net,
		})
	})
}

/// Which rate an order pool is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
	/// Orders selling an arbitrary asset. The taker fee is converted into
	/// currency at `fee_rate`:
	/// `(taker + taker_fee * fee_rate) / maker`. Without a fee rate the fee
	/// is left out.
	Target { fee_rate: Option<FeeRate> },
	/// Orders selling the fee asset, whose taker fee is paid out of the
	/// maker asset: `taker / (maker - taker_fee)`.
	Fee,
}

/// Cleans up a provider response.
///
/// Drops orders for other pairs, orders expiring within `expiry_buffer_secs`
/// of `now`, orders with a zero maker amount and orders with nothing left to
/// fill. Remaining amounts are capped at the maker amount. The result is
/// sorted best rate first; orders with equal rates keep their relative
/// order.
pub fn process_response(
	response: OrdersResponse,
	pair: &AssetPair,
	now: Timestamp,
	expiry_buffer_secs: u64,
	kind: PoolKind,
) -> OrderPool {
	let mut orders: Vec<FillableOrder> = response
		.orders
		.into_iter()
		.filter(|entry| entry.order.asset_pair() == *pair)
		.filter(|entry| !entry.order.expires_within(now, expiry_buffer_secs))
		.filter(|entry| !entry.order.maker_asset_amount.is_zero())
		.map(|entry| {
			let capped = entry.remaining().min(entry.order.maker_asset_amount);
			FillableOrder::new(entry.order, capped)
		})
		.filter(|entry| !entry.remaining().is_zero())
		.collect();

	orders.sort_by(|a, b| compare_rates(a, b, kind));
	OrderPool::new(orders)
}

fn widen(value: U256) -> Wide {
	Wide::from_limbs_slice(value.as_limbs())
}

/// Effective rate of an order as `(numerator, denominator)`.
fn rate_terms(entry: &FillableOrder, kind: PoolKind) -> (Wide, Wide) {
	let order = &entry.order;
	match kind {
		PoolKind::Target { fee_rate: None } => (
			widen(order.taker_asset_amount),
			widen(order.maker_asset_amount),
		),
		// the fee rate's own denominator is shared by every order and cancels
		// out of the comparison
		PoolKind::Target {
			fee_rate: Some(rate),
		} => (
			widen(order.taker_asset_amount) * widen(rate.fee_asset)
				+ widen(order.taker_fee) * widen(rate.currency),
			widen(order.maker_asset_amount),
		),
		PoolKind::Fee => (
			widen(order.taker_asset_amount),
			widen(order.net_maker_asset_amount()),
		),
	}
}

/// Orders by currency paid per unit received, cheapest first.
fn compare_rates(a: &FillableOrder, b: &FillableOrder, kind: PoolKind) -> Ordering {
	let (a_num, a_den) = rate_terms(a, kind);
	let (b_num, b_den) = rate_terms(b, kind);

	// a zero denominator yields nothing, so it sorts last
	match (a_den.is_zero(), b_den.is_zero()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => (a_num * b_den).cmp(&(b_num * a_den)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use buyer_types::{Address, Bytes, Order};

	const DAI: Address = Address::repeat_byte(0xda);
	const WETH: Address = Address::repeat_byte(0xee);

	fn entry(maker: u64, taker: u64, taker_fee: u64, remaining: u64, expires: u64) -> FillableOrder {
		let order = Order {
			maker_address: Address::repeat_byte(0x01),
			taker_address: Address::ZERO,
			fee_recipient_address: Address::ZERO,
			maker_asset: DAI,
			taker_asset: WETH,
			maker_asset_amount: U256::from(maker),
			taker_asset_amount: U256::from(taker),
			maker_fee: U256::ZERO,
			taker_fee: U256::from(taker_fee),
			expiration_time_seconds: expires,
			salt: U256::from(taker),
			signature: Bytes::new(),
		};
		FillableOrder::new(order, U256::from(remaining))
	}

	fn takers(pool: &OrderPool) -> Vec<U256> {
		pool.orders().map(|order| order.taker_asset_amount).collect()
	}

	#[test]
	fn test_sorts_best_rate_first() {
		let response = OrdersResponse {
			orders: vec![
				entry(100, 30, 0, 100, 10_000),
				entry(100, 10, 0, 100, 10_000),
				entry(200, 40, 0, 200, 10_000),
				entry(100, 20, 0, 100, 10_000),
			],
		};
		let pool = process_response(
			response,
			&AssetPair::new(DAI, WETH),
			1_000,
			0,
			PoolKind::Target { fee_rate: None },
		);

		// 40/200 and 20/100 tie and keep their input order
		assert_eq!(
			takers(&pool),
			vec![U256::from(10), U256::from(40), U256::from(20), U256::from(30)]
		);
	}

	#[test]
	fn test_fee_pools_sort_by_net_rate() {
		let response = OrdersResponse {
			orders: vec![
				entry(100, 50, 50, 100, 10_000),
				entry(100, 60, 0, 100, 10_000),
				entry(100, 10, 100, 100, 10_000),
			],
		};
		let pair = AssetPair::new(DAI, WETH);

		let fee_sorted = process_response(response.clone(), &pair, 1_000, 0, PoolKind::Fee);
		assert_eq!(
			takers(&fee_sorted),
			vec![U256::from(60), U256::from(50), U256::from(10)]
		);

		let target_sorted = process_response(
			response,
			&pair,
			1_000,
			0,
			PoolKind::Target { fee_rate: None },
		);
		assert_eq!(
			takers(&target_sorted),
			vec![U256::from(10), U256::from(50), U256::from(60)]
		);
	}

	#[test]
	fn test_drops_unusable_orders() {
		let mut other_pair = entry(100, 10, 0, 100, 10_000);
		other_pair.order.maker_asset = WETH;
		other_pair.order.taker_asset = DAI;

		let response = OrdersResponse {
			orders: vec![
				entry(100, 10, 0, 100, 1_100),
				entry(100, 11, 0, 0, 10_000),
				entry(0, 12, 0, 0, 10_000),
				other_pair,
				entry(100, 13, 0, 500, 10_000),
				entry(100, 14, 0, 60, 1_121),
			],
		};
		let pool = process_response(
			response,
			&AssetPair::new(DAI, WETH),
			1_000,
			120,
			PoolKind::Target { fee_rate: None },
		);

		assert_eq!(takers(&pool), vec![U256::from(13), U256::from(14)]);
		assert_eq!(pool.entries()[0].remaining(), U256::from(100));
		assert_eq!(pool.entries()[1].remaining(), U256::from(60));
		assert!(pool.validate().is_ok());
	}

	#[test]
	fn test_target_pools_price_in_taker_fees() {
		let response = OrdersResponse {
			orders: vec![
				entry(100, 10, 100, 100, 10_000),
				entry(100, 20, 0, 100, 10_000),
				entry(100, 15, 8, 100, 10_000),
			],
		};
		let pair = AssetPair::new(DAI, WETH);
		// one currency unit buys two fee units
		let fee_rate = FeeRate {
			currency: U256::from(1),
			fee_asset: U256::from(2),
		};

		// effective costs per 100: 10 + 50, 20 + 0, 15 + 4
		let pool = process_response(
			response.clone(),
			&pair,
			1_000,
			0,
			PoolKind::Target {
				fee_rate: Some(fee_rate),
			},
		);
		assert_eq!(
			takers(&pool),
			vec![U256::from(15), U256::from(20), U256::from(10)]
		);

		let unpriced = process_response(
			response,
			&pair,
			1_000,
			0,
			PoolKind::Target { fee_rate: None },
		);
		assert_eq!(
			takers(&unpriced),
			vec![U256::from(10), U256::from(15), U256::from(20)]
		);
	}

	#[test]
	fn test_fee_rate_skips_orders_eaten_by_their_fee() {
		let pool = OrderPool::new(vec![
			entry(100, 10, 100, 100, 10_000),
			entry(100, 60, 20, 100, 10_000),
		]);
		assert_eq!(
			fee_rate(&pool),
			Some(FeeRate {
				currency: U256::from(60),
				fee_asset: U256::from(80),
			})
		);
		assert_eq!(fee_rate(&OrderPool::default()), None);
	}
}
