//! Serde helpers for token amounts.
//!
//! Relayers transmit amounts and timestamps as base-10 strings. These helpers
//! accept either a decimal or a `0x`-prefixed hex string for amounts, a string
//! or a plain number for timestamps, and always emit decimal strings.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// (De)serializes a `U256` as a decimal string.
pub mod u256_string {
	use super::*;

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		U256::from_str(raw.trim())
			.map_err(|e| serde::de::Error::custom(format!("Invalid amount '{}': {}", raw, e)))
	}
}

/// (De)serializes a `u64` as a decimal string, also accepting a JSON number.
pub mod u64_string {
	use super::*;

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum StringOrNumber {
		String(String),
		Number(u64),
	}

	pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
	where
		D: Deserializer<'de>,
	{
		match StringOrNumber::deserialize(deserializer)? {
			StringOrNumber::String(raw) => raw
				.trim()
				.parse()
				.map_err(|e| serde::de::Error::custom(format!("Invalid number '{}': {}", raw, e))),
			StringOrNumber::Number(value) => Ok(value),
		}
	}
}
