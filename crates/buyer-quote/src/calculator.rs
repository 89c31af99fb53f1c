//! Quote assembly.
//!
//! Validates the request, selects target orders, resolves fee orders and
//! prices the selection in both directions. Any shortfall is terminal: no
//! partial quote is ever returned.

use std::borrow::Cow;

use buyer_types::{Address, OrderPool, Quote, QuoteError, Result, U256};
use rust_decimal::Decimal;
use tracing::debug;

use crate::fees::{gross_of_taker_fees, net_of_taker_fees, resolve_fees};
use crate::info::{compute_quote_info, Pricing};
use crate::math::{apply_percentage, divide_by_one_plus, Rounding};
use crate::selector::select_orders;

/// Parameters of a buy quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
	/// Asset to buy.
	pub asset: Address,
	/// Amount of `asset` to buy, excluding slippage.
	pub asset_buy_amount: U256,
	/// Affiliate markup on the asset cost, in `[0, 1]`.
	pub fee_percentage: Decimal,
	/// Extra liquidity to reserve on top of `asset_buy_amount`, `>= 0`.
	pub slippage_percentage: Decimal,
	/// Whether `asset` is the protocol fee asset. Fees are then paid out of
	/// the purchased asset and no fee orders are used.
	pub is_fee_asset: bool,
}

impl QuoteRequest {
	pub fn new(asset: Address, asset_buy_amount: U256) -> Self {
		Self {
			asset,
			asset_buy_amount,
			fee_percentage: Decimal::ZERO,
			slippage_percentage: Decimal::ZERO,
			is_fee_asset: false,
		}
	}

	pub fn with_fee_percentage(mut self, fee_percentage: Decimal) -> Self {
		self.fee_percentage = fee_percentage;
		self
	}

	pub fn with_slippage_percentage(mut self, slippage_percentage: Decimal) -> Self {
		self.slippage_percentage = slippage_percentage;
		self
	}

	pub fn buying_fee_asset(mut self, is_fee_asset: bool) -> Self {
		self.is_fee_asset = is_fee_asset;
		self
	}

	/// Checks the request against both pools before any selection work.
	fn validate(&self, target_pool: &OrderPool, fee_pool: &OrderPool) -> Result<()> {
		if self.fee_percentage < Decimal::ZERO || self.fee_percentage > Decimal::ONE {
			return Err(QuoteError::InvalidFeePercentage(self.fee_percentage));
		}
		if self.slippage_percentage < Decimal::ZERO {
			return Err(QuoteError::InvalidSlippagePercentage(
				self.slippage_percentage,
			));
		}

		target_pool
			.validate()
			.map_err(QuoteError::InvalidTargetPool)?;
		if !self.is_fee_asset {
			fee_pool.validate().map_err(QuoteError::InvalidFeePool)?;
		}

		if target_pool.is_empty() && !self.asset_buy_amount.is_zero() {
			return Err(QuoteError::EmptyOrderPool);
		}

		Ok(())
	}
}

/// Builds a quote for `request` from the target and fee pools.
///
/// Both pools must be sorted best rate first. `fee_pool` is ignored when
/// the request buys the fee asset.
pub fn calculate(
	target_pool: &OrderPool,
	fee_pool: &OrderPool,
	request: &QuoteRequest,
) -> Result<Quote> {
	request.validate(target_pool, fee_pool)?;

	let fill_amount = request.asset_buy_amount;
	let slippage_buffer = apply_percentage(fill_amount, request.slippage_percentage, Rounding::HalfUp)
		.ok_or(QuoteError::Overflow("slippage buffer"))?;

	let (pricing, selectable) = if request.is_fee_asset {
		(Pricing::FeeInclusive, Cow::Owned(net_of_taker_fees(target_pool)?))
	} else {
		(Pricing::Gross, Cow::Borrowed(target_pool))
	};

	let selection = select_orders(&selectable, fill_amount, slippage_buffer)?;
	if !selection.is_covered() {
		let amount_available = selection.consumed();
		let amount_available_considering_slippage =
			divide_by_one_plus(amount_available, request.slippage_percentage)
				.ok_or(QuoteError::Overflow("available amount"))?;
		return Err(QuoteError::InsufficientAssetLiquidity {
			amount_available,
			amount_available_considering_slippage,
		});
	}

	let fee_orders = if request.is_fee_asset {
		OrderPool::default()
	} else {
		let resolution = resolve_fees(&selection.orders, fee_pool)?;
		if !resolution.selection.is_covered() {
			return Err(QuoteError::InsufficientFeeLiquidity {
				fee_amount_needed: resolution.fee_amount_needed,
				fee_amount_available: resolution.fee_amount_available(),
			});
		}
		resolution.selection.orders
	};
	let orders = selection.orders;

	let best_case_quote_info = compute_quote_info(
		&orders,
		&fee_orders,
		fill_amount,
		request.fee_percentage,
		pricing,
	)?;
	let worst_case_quote_info = compute_quote_info(
		&orders.reversed(),
		&fee_orders.reversed(),
		fill_amount,
		request.fee_percentage,
		pricing,
	)?;

	// selections from netted pools are reported as maker amounts to fill
	let (orders, fee_orders) = if request.is_fee_asset {
		(gross_of_taker_fees(&orders, target_pool)?, fee_orders)
	} else {
		(orders, gross_of_taker_fees(&fee_orders, fee_pool)?)
	};

	debug!(
		asset = %request.asset,
		amount = %fill_amount,
		orders = orders.len(),
		fee_orders = fee_orders.len(),
		best = %best_case_quote_info.total_currency_amount(),
		worst = %worst_case_quote_info.total_currency_amount(),
		"Calculated buy quote"
	);

	Ok(Quote::new(
		request.asset,
		orders,
		fee_orders,
		best_case_quote_info,
		worst_case_quote_info,
		fill_amount,
		slippage_buffer,
		request.fee_percentage,
	))
}
