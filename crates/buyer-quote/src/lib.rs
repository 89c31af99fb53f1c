//! Liquidity aggregation and quote calculation.
//!
//! Given a pool of orders for a target asset and a pool of fee orders, the
//! engine selects the minimal prefix of each pool that covers a requested
//! amount plus a slippage buffer and prices the result twice: once filling
//! the selected orders best rate first and once worst rate first.
//!
//! Everything here is synchronous and pure. Inputs are borrowed and never
//! mutated; every result is a freshly built value.
//!
//! ```text
//! target pool ──► select_orders ──► resolve_fees ──► compute_quote_info (best)
//!                                      │                     │
//!                 fee pool ────────────┘             reversed copies
//!                                                            ▼
//!                                               compute_quote_info (worst) ──► Quote
//! ```

pub mod calculator;
pub mod fees;
pub mod info;
pub mod math;
pub mod selector;

#[cfg(test)]
pub(crate) mod test_utils;

pub use calculator::{calculate, QuoteRequest};
pub use fees::{
	fee_amount_for_orders, gross_of_taker_fees, net_of_taker_fees, resolve_fees, FeeResolution,
};
pub use info::{compute_quote_info, Pricing};
pub use math::Rounding;
pub use selector::{select_orders, OrderSelection};
