//! Fixture builders shared by the unit tests.

use buyer_types::{Address, Bytes, FillableOrder, Order, OrderPool, U256};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const TARGET_ASSET: Address = Address::repeat_byte(0xaa);
pub const FEE_ASSET: Address = Address::repeat_byte(0xfe);
pub const CURRENCY_ASSET: Address = Address::repeat_byte(0xee);

pub fn u(value: u64) -> U256 {
	U256::from(value)
}

pub fn dec(value: &str) -> Decimal {
	Decimal::from_str(value).unwrap()
}

pub fn order(maker_asset: Address, maker: u64, taker: u64, taker_fee: u64) -> Order {
	Order {
		maker_address: Address::repeat_byte(0x01),
		taker_address: Address::ZERO,
		fee_recipient_address: Address::ZERO,
		maker_asset,
		taker_asset: CURRENCY_ASSET,
		maker_asset_amount: u(maker),
		taker_asset_amount: u(taker),
		maker_fee: U256::ZERO,
		taker_fee: u(taker_fee),
		expiration_time_seconds: 2_000_000_000,
		salt: u(maker ^ taker),
		signature: Bytes::new(),
	}
}

/// Target pool from `(maker, taker, taker_fee, remaining)` tuples.
pub fn target_pool(entries: &[(u64, u64, u64, u64)]) -> OrderPool {
	pool_of(TARGET_ASSET, entries)
}

/// Fee pool from `(maker, taker, taker_fee, remaining)` tuples.
pub fn fee_pool(entries: &[(u64, u64, u64, u64)]) -> OrderPool {
	pool_of(FEE_ASSET, entries)
}

fn pool_of(asset: Address, entries: &[(u64, u64, u64, u64)]) -> OrderPool {
	entries
		.iter()
		.map(|&(maker, taker, fee, remaining)| {
			FillableOrder::new(order(asset, maker, taker, fee), u(remaining))
		})
		.collect()
}

/// Remaining amounts of a pool, in order.
pub fn amounts(pool: &OrderPool) -> Vec<U256> {
	pool.iter().map(FillableOrder::remaining).collect()
}
