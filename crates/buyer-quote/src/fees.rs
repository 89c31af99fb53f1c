//! Fee requirement resolution.
//!
//! Every target order charges a taker fee denominated in the fee asset,
//! pro rata to the amount consumed. The fee asset itself has to be bought
//! from the fee pool, whose orders charge their own taker fee in the asset
//! they sell, so fee orders are always measured net of that fee.

use buyer_types::{FillableOrder, OrderPool, QuoteError, Result, U256};

use crate::math::{mul_div, Rounding};
use crate::selector::{select_orders, OrderSelection};

/// Fee asset required by a set of target orders and the fee orders chosen to
/// supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeResolution {
	pub fee_amount_needed: U256,
	pub selection: OrderSelection,
}

impl FeeResolution {
	/// Fee asset the selected fee orders can actually supply.
	pub fn fee_amount_available(&self) -> U256 {
		self.fee_amount_needed.saturating_sub(self.selection.shortfall)
	}
}

/// Sums `taker_fee * consumed / maker_asset_amount` over the orders,
/// truncating each term.
pub fn fee_amount_for_orders(orders: &OrderPool) -> Result<U256> {
	orders.iter().try_fold(U256::ZERO, |total, entry| {
		let fee = mul_div(
			entry.order.taker_fee,
			entry.remaining(),
			entry.order.maker_asset_amount,
			Rounding::Down,
		)
		.ok_or(QuoteError::Overflow("taker fee"))?;
		total
			.checked_add(fee)
			.ok_or(QuoteError::Overflow("total taker fee"))
	})
}

/// Rescales every usable amount to what the taker keeps after paying the
/// order's taker fee out of the maker asset.
///
/// Orders whose fee consumes the whole order end up with nothing usable.
pub fn net_of_taker_fees(pool: &OrderPool) -> Result<OrderPool> {
	pool.iter()
		.map(|entry| {
			let net = mul_div(
				entry.remaining(),
				entry.order.net_maker_asset_amount(),
				entry.order.maker_asset_amount,
				Rounding::Down,
			)
			.ok_or(QuoteError::Overflow("net fillable amount"))?;
			Ok(entry.with_remaining(net))
		})
		.collect::<Result<Vec<_>>>()
		.map(OrderPool::new)
}

/// Turns amounts selected from a [`net_of_taker_fees`] copy of `pool` back
/// into maker amounts to fill.
///
/// Each amount becomes `ceil(net * maker / (maker - taker_fee))`, capped at
/// the order's remaining amount in `pool`, so filling it leaves the taker
/// at least the selected net amount. `selected` must follow pool order.
pub fn gross_of_taker_fees(selected: &OrderPool, pool: &OrderPool) -> Result<OrderPool> {
	let mut sources = pool.iter();
	selected
		.iter()
		.map(|entry| {
			let order = &entry.order;
			let available = sources
				.find(|source| source.order == *order)
				.map_or(order.maker_asset_amount, FillableOrder::remaining);
			let gross = mul_div(
				entry.remaining(),
				order.maker_asset_amount,
				order.net_maker_asset_amount(),
				Rounding::Up,
			)
			.ok_or(QuoteError::Overflow("gross fill amount"))?;
			Ok(entry.with_remaining(gross.min(available)))
		})
		.collect::<Result<Vec<_>>>()
		.map(OrderPool::new)
}

/// Computes the fee owed by `selected_orders` and selects fee orders to
/// cover it.
///
/// No slippage buffer is added here; slippage applies once, to the target
/// amount.
pub fn resolve_fees(selected_orders: &OrderPool, fee_pool: &OrderPool) -> Result<FeeResolution> {
	let fee_amount_needed = fee_amount_for_orders(selected_orders)?;
	let net_fee_pool = net_of_taker_fees(fee_pool)?;
	let selection = select_orders(&net_fee_pool, fee_amount_needed, U256::ZERO)?;

	Ok(FeeResolution {
		fee_amount_needed,
		selection,
	})
}
