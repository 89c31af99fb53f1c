//! Shared types for the asset buyer.
//!
//! Orders, order pools, quotes and the error taxonomy used by the quote
//! engine, the order sources and the service layer.

pub mod common;
pub mod errors;
pub mod order;
pub mod quote;
pub mod serde_helpers;

pub use common::*;
pub use errors::*;
pub use order::*;
pub use quote::*;
