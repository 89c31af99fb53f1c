//! Quote value objects.
//!
//! A [`Quote`] is produced once per calculation and never mutated. It carries
//! the trimmed orders to execute and two [`QuoteInfo`] cost bounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::serde_helpers::u256_string;
use crate::{Address, OrderPool, U256};

/// Currency cost of filling a quote under one fill-order assumption.
///
/// `total_currency_amount` is always `asset_currency_amount +
/// fee_currency_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInfo {
	#[serde(with = "u256_string")]
	asset_currency_amount: U256,
	#[serde(with = "u256_string")]
	fee_currency_amount: U256,
	#[serde(with = "u256_string")]
	total_currency_amount: U256,
}

impl QuoteInfo {
	/// Returns `None` if the total overflows.
	pub fn new(asset_currency_amount: U256, fee_currency_amount: U256) -> Option<Self> {
		let total_currency_amount = asset_currency_amount.checked_add(fee_currency_amount)?;
		Some(Self {
			asset_currency_amount,
			fee_currency_amount,
			total_currency_amount,
		})
	}

	/// Currency spent on the target asset itself.
	pub fn asset_currency_amount(&self) -> U256 {
		self.asset_currency_amount
	}

	/// Currency spent on protocol fees and the affiliate fee.
	pub fn fee_currency_amount(&self) -> U256 {
		self.fee_currency_amount
	}

	pub fn total_currency_amount(&self) -> U256 {
		self.total_currency_amount
	}
}

/// A firm quote for buying `asset_buy_amount` of `asset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	asset: Address,
	orders: OrderPool,
	fee_orders: OrderPool,
	best_case_quote_info: QuoteInfo,
	worst_case_quote_info: QuoteInfo,
	#[serde(with = "u256_string")]
	asset_buy_amount: U256,
	#[serde(with = "u256_string")]
	slippage_buffer_amount: U256,
	fee_percentage: Decimal,
}

impl Quote {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		asset: Address,
		orders: OrderPool,
		fee_orders: OrderPool,
		best_case_quote_info: QuoteInfo,
		worst_case_quote_info: QuoteInfo,
		asset_buy_amount: U256,
		slippage_buffer_amount: U256,
		fee_percentage: Decimal,
	) -> Self {
		Self {
			asset,
			orders,
			fee_orders,
			best_case_quote_info,
			worst_case_quote_info,
			asset_buy_amount,
			slippage_buffer_amount,
			fee_percentage,
		}
	}

	pub fn asset(&self) -> Address {
		self.asset
	}

	/// Target orders to fill, with each usable amount trimmed to the maker
	/// amount the quote fills.
	pub fn orders(&self) -> &OrderPool {
		&self.orders
	}

	/// Fee orders to fill. Their amounts are gross of the fee orders' own
	/// taker fees, so filling them yields the fee asset the quote needs.
	pub fn fee_orders(&self) -> &OrderPool {
		&self.fee_orders
	}

	pub fn best_case_quote_info(&self) -> &QuoteInfo {
		&self.best_case_quote_info
	}

	pub fn worst_case_quote_info(&self) -> &QuoteInfo {
		&self.worst_case_quote_info
	}

	pub fn asset_buy_amount(&self) -> U256 {
		self.asset_buy_amount
	}

	pub fn slippage_buffer_amount(&self) -> U256 {
		self.slippage_buffer_amount
	}

	pub fn fee_percentage(&self) -> Decimal {
		self.fee_percentage
	}
}
