//! Quote cost calculation.
//!
//! Prices an already trimmed selection by filling it in the order given.
//! Feeding the selection best rate first yields the best case; feeding a
//! reversed copy yields the worst case, where the taker ends up on the worse
//! orders of the set first.

use buyer_types::{OrderPool, QuoteError, QuoteInfo, Result, U256};
use rust_decimal::Decimal;

use crate::math::{apply_percentage, mul_div, Rounding};

/// How an order converts a maker amount into a currency cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
	/// `taker / maker`; the taker fee is owed separately in the fee asset.
	Gross,
	/// `taker / (maker - taker_fee)`; the taker fee is paid out of the maker
	/// asset, so usable amounts must already be net of it.
	FeeInclusive,
}

#[derive(Debug, Default)]
struct Walk {
	currency: U256,
	fee_asset_needed: U256,
}

fn walk(pool: &OrderPool, amount: U256, pricing: Pricing) -> Result<Walk> {
	let mut remaining = amount;
	let mut totals = Walk::default();

	for entry in pool {
		if remaining.is_zero() {
			break;
		}

		let order = &entry.order;
		let fill = remaining.min(entry.remaining());
		let (currency, fee) = match pricing {
			Pricing::Gross => (
				mul_div(
					fill,
					order.taker_asset_amount,
					order.maker_asset_amount,
					Rounding::Down,
				),
				mul_div(fill, order.taker_fee, order.maker_asset_amount, Rounding::Down),
			),
			Pricing::FeeInclusive => {
				let net_maker = order.net_maker_asset_amount();
				if fill.is_zero() || net_maker.is_zero() {
					continue;
				}
				(
					mul_div(fill, order.taker_asset_amount, net_maker, Rounding::Down),
					Some(U256::ZERO),
				)
			}
		};

		let currency = currency.ok_or(QuoteError::Overflow("order cost"))?;
		let fee = fee.ok_or(QuoteError::Overflow("order fee"))?;
		totals.currency = totals
			.currency
			.checked_add(currency)
			.ok_or(QuoteError::Overflow("currency amount"))?;
		totals.fee_asset_needed = totals
			.fee_asset_needed
			.checked_add(fee)
			.ok_or(QuoteError::Overflow("fee amount"))?;
		remaining -= fill;
	}

	Ok(totals)
}

/// Computes the cost of buying `fill_amount` from `orders`, paying their
/// fees from `fee_orders`.
///
/// Fee orders are always priced [`Pricing::FeeInclusive`]. The affiliate fee
/// is `asset cost * fee_percentage`, rounded up, and counts towards the fee
/// amount. A walk that runs out of orders prices only what was available.
pub fn compute_quote_info(
	orders: &OrderPool,
	fee_orders: &OrderPool,
	fill_amount: U256,
	fee_percentage: Decimal,
	pricing: Pricing,
) -> Result<QuoteInfo> {
	let asset = walk(orders, fill_amount, pricing)?;
	let fees = walk(fee_orders, asset.fee_asset_needed, Pricing::FeeInclusive)?;

	let affiliate_fee = apply_percentage(asset.currency, fee_percentage, Rounding::Up)
		.ok_or(QuoteError::InvalidFeePercentage(fee_percentage))?;
	let fee_currency = fees
		.currency
		.checked_add(affiliate_fee)
		.ok_or(QuoteError::Overflow("fee currency amount"))?;

	QuoteInfo::new(asset.currency, fee_currency).ok_or(QuoteError::Overflow("total currency amount"))
}
