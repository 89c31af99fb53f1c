//! Order selection.
//!
//! Walks a pool in priority order and keeps the shortest prefix that covers a
//! fill amount plus slippage buffer. Shortfalls are reported, not raised, so
//! the same walk serves both the target pool and the fee pool.

use buyer_types::{OrderPool, QuoteError, Result, U256};

/// The orders picked from a pool and whatever could not be covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSelection {
	/// Touched prefix of the pool. Each usable amount is the amount consumed
	/// from that order, so only the last entry can be trimmed.
	pub orders: OrderPool,
	/// Unmet part of the request after the pool was exhausted.
	pub shortfall: U256,
}

impl OrderSelection {
	pub fn is_covered(&self) -> bool {
		self.shortfall.is_zero()
	}

	/// Total amount consumed across the selected orders.
	pub fn consumed(&self) -> U256 {
		self.orders.total_fillable().unwrap_or(U256::MAX)
	}
}

/// Selects orders covering `fill_amount + slippage_buffer`.
///
/// Orders with nothing left to fill are skipped. The walk stops as soon as
/// the amount is covered; later orders are never considered, even if an
/// exact match leaves them untouched.
pub fn select_orders(
	pool: &OrderPool,
	fill_amount: U256,
	slippage_buffer: U256,
) -> Result<OrderSelection> {
	let mut remaining = fill_amount
		.checked_add(slippage_buffer)
		.ok_or(QuoteError::Overflow("total fill amount"))?;
	let mut selected = Vec::new();

	for entry in pool {
		if remaining.is_zero() {
			break;
		}

		let consumed = remaining.min(entry.remaining());
		if consumed.is_zero() {
			continue;
		}

		selected.push(entry.with_remaining(consumed));
		remaining -= consumed;
	}

	Ok(OrderSelection {
		orders: OrderPool::new(selected),
		shortfall: remaining,
	})
}
