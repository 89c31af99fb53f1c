//! Error types for quote calculation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{PoolError, U256};

pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors returned by the quote engine.
///
/// Liquidity shortfalls and malformed input are separate kinds; see
/// [`QuoteError::is_liquidity_error`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
	/// The target pool cannot cover the fill amount plus slippage buffer.
	#[error("Insufficient asset liquidity: {amount_available} available ({amount_available_considering_slippage} considering slippage)")]
	InsufficientAssetLiquidity {
		/// Total amount the pool could cover.
		amount_available: U256,
		/// Largest fill amount that would have been coverable with the same
		/// slippage setting.
		amount_available_considering_slippage: U256,
	},

	/// The fee pool cannot cover the fees of the selected orders.
	#[error("Insufficient fee liquidity: need {fee_amount_needed}, have {fee_amount_available}")]
	InsufficientFeeLiquidity {
		fee_amount_needed: U256,
		fee_amount_available: U256,
	},

	#[error("No orders available for a non-zero fill amount")]
	EmptyOrderPool,

	#[error("Invalid target pool: {0}")]
	InvalidTargetPool(PoolError),

	#[error("Invalid fee pool: {0}")]
	InvalidFeePool(PoolError),

	#[error("Fee percentage {0} is outside [0, 1]")]
	InvalidFeePercentage(Decimal),

	#[error("Slippage percentage {0} is negative")]
	InvalidSlippagePercentage(Decimal),

	#[error("Arithmetic overflow while computing {0}")]
	Overflow(&'static str),
}

impl QuoteError {
	/// Returns true for shortfall conditions a caller can resolve by fetching
	/// more liquidity or requesting a smaller amount.
	pub fn is_liquidity_error(&self) -> bool {
		matches!(
			self,
			Self::InsufficientAssetLiquidity { .. } | Self::InsufficientFeeLiquidity { .. }
		)
	}
}
