//! Integer helpers for token amounts.
//!
//! All amounts are `U256`. Percentages are exact decimals, applied as the
//! ratio `mantissa / 10^scale`; nothing here touches floating point.

use alloy_primitives::U256;
use rust_decimal::Decimal;

/// Rounding direction for integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
	/// Truncate toward zero.
	Down,
	/// Round toward positive infinity.
	Up,
	/// Round to nearest, ties away from zero.
	HalfUp,
}

/// Returns `x * y / denominator` with the requested rounding.
///
/// `None` on division by zero or if `x * y` overflows.
pub fn mul_div(x: U256, y: U256, denominator: U256, rounding: Rounding) -> Option<U256> {
	if denominator.is_zero() {
		return None;
	}

	let product = x.checked_mul(y)?;
	let quotient = product / denominator;
	let remainder = product % denominator;

	let round_up = match rounding {
		Rounding::Down => false,
		Rounding::Up => !remainder.is_zero(),
		Rounding::HalfUp => remainder >= denominator - remainder,
	};

	if round_up {
		quotient.checked_add(U256::from(1))
	} else {
		Some(quotient)
	}
}

/// Splits a non-negative decimal into an integer ratio.
fn ratio(percentage: Decimal) -> Option<(U256, U256)> {
	let mantissa = u128::try_from(percentage.mantissa()).ok()?;
	let denominator = 10u128.checked_pow(percentage.scale())?;
	Some((U256::from(mantissa), U256::from(denominator)))
}

/// Returns `amount * percentage`.
///
/// `None` for negative percentages or on overflow.
pub fn apply_percentage(amount: U256, percentage: Decimal, rounding: Rounding) -> Option<U256> {
	let (numerator, denominator) = ratio(percentage)?;
	mul_div(amount, numerator, denominator, rounding)
}

/// Returns `floor(amount / (1 + percentage))`.
pub fn divide_by_one_plus(amount: U256, percentage: Decimal) -> Option<U256> {
	let (numerator, denominator) = ratio(percentage)?;
	mul_div(
		amount,
		denominator,
		denominator.checked_add(numerator)?,
		Rounding::Down,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{dec, u};

	#[test]
	fn test_mul_div_rounding() {
		assert_eq!(mul_div(u(10), u(1), u(3), Rounding::Down), Some(u(3)));
		assert_eq!(mul_div(u(10), u(1), u(3), Rounding::Up), Some(u(4)));
		assert_eq!(mul_div(u(10), u(1), u(3), Rounding::HalfUp), Some(u(3)));
		assert_eq!(mul_div(u(5), u(1), u(2), Rounding::HalfUp), Some(u(3)));
		assert_eq!(mul_div(u(9), u(1), u(3), Rounding::Up), Some(u(3)));
		assert_eq!(mul_div(u(1), u(1), U256::ZERO, Rounding::Down), None);
		assert_eq!(mul_div(U256::MAX, u(2), u(4), Rounding::Down), None);
	}

	#[test]
	fn test_apply_percentage() {
		assert_eq!(
			apply_percentage(u(1000), dec("0.2"), Rounding::HalfUp),
			Some(u(200))
		);
		assert_eq!(
			apply_percentage(u(15), dec("0.25"), Rounding::HalfUp),
			Some(u(4))
		);
		assert_eq!(
			apply_percentage(u(15), dec("0.25"), Rounding::Down),
			Some(u(3))
		);
		assert_eq!(
			apply_percentage(u(101), dec("0.01"), Rounding::Up),
			Some(u(2))
		);
		assert_eq!(apply_percentage(u(10), dec("-0.1"), Rounding::Down), None);
	}

	#[test]
	fn test_divide_by_one_plus() {
		assert_eq!(divide_by_one_plus(u(400), dec("0.2")), Some(u(333)));
		assert_eq!(divide_by_one_plus(u(400), Decimal::ZERO), Some(u(400)));
		assert_eq!(divide_by_one_plus(u(300), dec("0.5")), Some(u(200)));
	}
}
