//! Configuration loading for the asset buyer.
//!
//! Files may be TOML, JSON or YAML, chosen by extension. `${VAR}` references
//! are substituted from the environment before parsing, and a handful of
//! `BUYER_`-prefixed variables override individual settings afterwards.

use rust_decimal::Decimal;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

mod types;

pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "BUYER_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	/// Loads the file if one was given, otherwise starts from defaults, then
	/// applies environment overrides and validates the result.
	pub async fn load(&self) -> Result<BuyerConfig, ConfigError> {
		let mut config = match &self.file_path {
			Some(path) => self.load_from_file(path).await?,
			None => BuyerConfig::default(),
		};

		self.apply_env_overrides(&mut config)?;
		validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, path: &Path) -> Result<BuyerConfig, ConfigError> {
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				ConfigError::FileNotFound(path.display().to_string())
			} else {
				ConfigError::IoError(e)
			}
		})?;

		let content = substitute_env_vars(&content)?;
		debug!("Parsing configuration from {:?}", path);

		let extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.unwrap_or_default()
			.to_ascii_lowercase();

		match extension.as_str() {
			"toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string())),
			"json" => {
				serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
			"yaml" | "yml" => {
				serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
			other => Err(ConfigError::ParseError(format!(
				"Unsupported config format: {:?}",
				other
			))),
		}
	}

	fn apply_env_overrides(&self, config: &mut BuyerConfig) -> Result<(), ConfigError> {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			config.buyer.log_level = log_level;
		}

		if let Ok(fee) = env::var(format!("{}FEE_PERCENTAGE", self.env_prefix)) {
			config.quote.fee_percentage = Decimal::from_str(&fee).map_err(|e| {
				ConfigError::ValidationError(format!("Invalid fee percentage: {}", e))
			})?;
		}

		if let Ok(slippage) = env::var(format!("{}SLIPPAGE_PERCENTAGE", self.env_prefix)) {
			config.quote.slippage_percentage = Decimal::from_str(&slippage).map_err(|e| {
				ConfigError::ValidationError(format!("Invalid slippage percentage: {}", e))
			})?;
		}

		if let Ok(orders_file) = env::var(format!("{}ORDERS_FILE", self.env_prefix)) {
			config.orders.orders_file = Some(PathBuf::from(orders_file));
		}

		Ok(())
	}
}

fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = regex::Regex::new(r"\$\{([^}]+)\}")
		.map_err(|e| ConfigError::ParseError(e.to_string()))?;

	let mut result = content.to_string();
	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
		result = result.replace(full_match, &value);
	}

	Ok(result)
}

/// Checks settings that would make every quote fail.
pub fn validate_config(config: &BuyerConfig) -> Result<(), ConfigError> {
	let quote = &config.quote;
	if quote.fee_percentage < Decimal::ZERO || quote.fee_percentage > Decimal::ONE {
		return Err(ConfigError::ValidationError(format!(
			"fee_percentage must be between 0 and 1, got {}",
			quote.fee_percentage
		)));
	}

	if quote.slippage_percentage < Decimal::ZERO {
		return Err(ConfigError::ValidationError(format!(
			"slippage_percentage must not be negative, got {}",
			quote.slippage_percentage
		)));
	}

	if config.orders.refresh_interval_ms == 0 {
		return Err(ConfigError::ValidationError(
			"refresh_interval_ms must be greater than zero".to_string(),
		));
	}

	if config.assets.currency_asset == config.assets.fee_asset {
		return Err(ConfigError::ValidationError(
			"currency_asset and fee_asset must differ".to_string(),
		));
	}

	Ok(())
}
