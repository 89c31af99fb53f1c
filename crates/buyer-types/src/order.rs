//! Order and order pool types.
//!
//! An [`Order`] is a signed off-chain offer produced upstream by a relayer or
//! by the caller. An [`OrderPool`] pairs every order with the amount of its
//! maker asset that is still fillable, in fill-priority order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::serde_helpers::{u256_string, u64_string};
use crate::{Address, AssetPair, Bytes, Timestamp, U256};

/// Errors raised when an order pool violates its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
	/// Parallel order and amount sequences have different lengths.
	#[error("Pool length mismatch: {orders} orders, {amounts} fillable amounts")]
	LengthMismatch { orders: usize, amounts: usize },
	/// An order offers nothing, so its rates are undefined.
	#[error("Order at index {index} has a zero maker asset amount")]
	ZeroMakerAssetAmount { index: usize },
	/// An order claims more fillable maker asset than it offers.
	#[error("Order at index {index} has remaining fillable amount {remaining} above maker asset amount {maker_asset_amount}")]
	RemainingExceedsMakerAmount {
		index: usize,
		remaining: U256,
		maker_asset_amount: U256,
	},
}

/// A signed exchange order.
///
/// The maker offers `maker_asset_amount` of `maker_asset` for
/// `taker_asset_amount` of `taker_asset`. Fees are denominated in the
/// protocol fee asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	pub maker_address: Address,
	#[serde(default)]
	pub taker_address: Address,
	#[serde(default)]
	pub fee_recipient_address: Address,
	pub maker_asset: Address,
	pub taker_asset: Address,
	#[serde(with = "u256_string")]
	pub maker_asset_amount: U256,
	#[serde(with = "u256_string")]
	pub taker_asset_amount: U256,
	#[serde(with = "u256_string")]
	pub maker_fee: U256,
	#[serde(with = "u256_string")]
	pub taker_fee: U256,
	#[serde(with = "u64_string")]
	pub expiration_time_seconds: Timestamp,
	#[serde(with = "u256_string")]
	pub salt: U256,
	#[serde(default)]
	pub signature: Bytes,
}

impl Order {
	/// Returns the asset pair this order trades.
	pub fn asset_pair(&self) -> AssetPair {
		AssetPair::new(self.maker_asset, self.taker_asset)
	}

	/// Returns true if the order expires before `now + buffer_secs`.
	pub fn expires_within(&self, now: Timestamp, buffer_secs: u64) -> bool {
		self.expiration_time_seconds <= now.saturating_add(buffer_secs)
	}

	/// Maker asset left to the taker after paying a taker fee denominated in
	/// the maker asset itself. Zero when the fee swallows the whole order.
	pub fn net_maker_asset_amount(&self) -> U256 {
		self.maker_asset_amount.saturating_sub(self.taker_fee)
	}
}

/// An order together with the amount of its maker asset still fillable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillableOrder {
	pub order: Order,
	#[serde(with = "u256_string")]
	pub remaining_fillable_maker_asset_amount: U256,
}

impl FillableOrder {
	pub fn new(order: Order, remaining_fillable_maker_asset_amount: U256) -> Self {
		Self {
			order,
			remaining_fillable_maker_asset_amount,
		}
	}

	/// Wraps an order whose fillable amount is unknown, assuming it is
	/// entirely fillable.
	pub fn fully_fillable(order: Order) -> Self {
		let remaining = order.maker_asset_amount;
		Self::new(order, remaining)
	}

	/// Returns a copy of this entry with a different usable amount.
	pub fn with_remaining(&self, amount: U256) -> Self {
		Self::new(self.order.clone(), amount)
	}

	pub fn remaining(&self) -> U256 {
		self.remaining_fillable_maker_asset_amount
	}
}

/// An ordered sequence of fillable orders.
///
/// The position of an entry is its fill priority: index 0 is filled first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderPool {
	entries: Vec<FillableOrder>,
}

impl OrderPool {
	pub fn new(entries: Vec<FillableOrder>) -> Self {
		Self { entries }
	}

	/// Builds a pool from orders whose fillable amounts are unknown.
	pub fn from_orders(orders: Vec<Order>) -> Self {
		orders.into_iter().map(FillableOrder::fully_fillable).collect()
	}

	/// Builds a pool from parallel order and fillable amount sequences.
	pub fn from_parallel(orders: Vec<Order>, amounts: Vec<U256>) -> Result<Self, PoolError> {
		if orders.len() != amounts.len() {
			return Err(PoolError::LengthMismatch {
				orders: orders.len(),
				amounts: amounts.len(),
			});
		}

		Ok(orders
			.into_iter()
			.zip(amounts)
			.map(|(order, amount)| FillableOrder::new(order, amount))
			.collect())
	}

	/// Splits the pool back into parallel sequences.
	pub fn into_parts(self) -> (Vec<Order>, Vec<U256>) {
		self.entries
			.into_iter()
			.map(|entry| (entry.order, entry.remaining_fillable_maker_asset_amount))
			.unzip()
	}

	/// Checks that every order has a positive maker amount and that no
	/// remaining amount exceeds it.
	pub fn validate(&self) -> Result<(), PoolError> {
		for (index, entry) in self.entries.iter().enumerate() {
			let maker_asset_amount = entry.order.maker_asset_amount;
			if maker_asset_amount.is_zero() {
				return Err(PoolError::ZeroMakerAssetAmount { index });
			}
			if entry.remaining() > maker_asset_amount {
				return Err(PoolError::RemainingExceedsMakerAmount {
					index,
					remaining: entry.remaining(),
					maker_asset_amount,
				});
			}
		}
		Ok(())
	}

	pub fn entries(&self) -> &[FillableOrder] {
		&self.entries
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FillableOrder> {
		self.entries.iter()
	}

	pub fn orders(&self) -> impl Iterator<Item = &Order> {
		self.entries.iter().map(|entry| &entry.order)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Sum of all remaining fillable amounts, `None` on overflow.
	pub fn total_fillable(&self) -> Option<U256> {
		self.entries
			.iter()
			.try_fold(U256::ZERO, |acc, entry| acc.checked_add(entry.remaining()))
	}

	/// Returns a copy of the pool in reverse priority order.
	pub fn reversed(&self) -> Self {
		self.entries.iter().rev().cloned().collect()
	}
}

impl FromIterator<FillableOrder> for OrderPool {
	fn from_iter<I: IntoIterator<Item = FillableOrder>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl IntoIterator for OrderPool {
	type Item = FillableOrder;
	type IntoIter = std::vec::IntoIter<FillableOrder>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl<'a> IntoIterator for &'a OrderPool {
	type Item = &'a FillableOrder;
	type IntoIter = std::slice::Iter<'a, FillableOrder>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn order(maker: u64, taker: u64) -> Order {
		Order {
			maker_address: Address::repeat_byte(1),
			taker_address: Address::ZERO,
			fee_recipient_address: Address::ZERO,
			maker_asset: Address::repeat_byte(2),
			taker_asset: Address::repeat_byte(3),
			maker_asset_amount: U256::from(maker),
			taker_asset_amount: U256::from(taker),
			maker_fee: U256::ZERO,
			taker_fee: U256::ZERO,
			expiration_time_seconds: 1_000,
			salt: U256::from(7),
			signature: Bytes::new(),
		}
	}

	#[test]
	fn test_from_parallel_length_mismatch() {
		let result = OrderPool::from_parallel(vec![order(10, 1)], vec![]);
		assert_eq!(
			result,
			Err(PoolError::LengthMismatch {
				orders: 1,
				amounts: 0
			})
		);
	}

	#[test]
	fn test_from_parallel_round_trips_parts() {
		let orders = vec![order(10, 1), order(20, 4)];
		let amounts = vec![U256::from(5), U256::from(20)];
		let pool = OrderPool::from_parallel(orders.clone(), amounts.clone()).unwrap();

		assert_eq!(pool.len(), 2);
		assert_eq!(pool.total_fillable(), Some(U256::from(25)));
		assert_eq!(pool.into_parts(), (orders, amounts));
	}

	#[test]
	fn test_validate_rejects_bad_entries() {
		let pool = OrderPool::new(vec![FillableOrder::new(order(10, 1), U256::from(11))]);
		assert!(matches!(
			pool.validate(),
			Err(PoolError::RemainingExceedsMakerAmount { index: 0, .. })
		));

		let pool = OrderPool::from_orders(vec![order(10, 1), order(0, 1)]);
		assert_eq!(
			pool.validate(),
			Err(PoolError::ZeroMakerAssetAmount { index: 1 })
		);
	}

	#[test]
	fn test_reversed_leaves_original_untouched() {
		let pool = OrderPool::from_orders(vec![order(10, 1), order(20, 4)]);
		let reversed = pool.reversed();

		assert_eq!(reversed.entries()[0].order.maker_asset_amount, U256::from(20));
		assert_eq!(pool.entries()[0].order.maker_asset_amount, U256::from(10));
	}

	#[test]
	fn test_expires_within_buffer() {
		let order = order(10, 1);
		assert!(order.expires_within(900, 100));
		assert!(!order.expires_within(899, 100));
	}

	#[test]
	fn test_order_json_layout() {
		let json = serde_json::to_value(order(10, 1)).unwrap();
		assert_eq!(json["makerAssetAmount"], "10");
		assert_eq!(json["expirationTimeSeconds"], "1000");

		let decoded: Order = serde_json::from_value(json).unwrap();
		assert_eq!(decoded, order(10, 1));
	}
}
