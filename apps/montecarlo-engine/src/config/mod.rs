//! Configuration module for the Monte Carlo engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the simulation, prop-firm, and logging sections.
//!
//! # Usage
//!
//! ```rust,ignore
//! use montecarlo_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("simulations: {}", config.simulation.num_simulations);
//! ```

mod observability;
mod prop_firm;
mod simulation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use prop_firm::PropFirmConfig;
pub use simulation::{RiskModel, SimulationConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Monte Carlo session configuration.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Prop-firm career rules.
    #[serde(default)]
    pub prop_firm: PropFirmConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` naming the first offending field.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_simulation(&config.simulation)?;
    validate_prop_firm(&config.prop_firm)?;

    if config.observability.logging.level.trim().is_empty() {
        return Err(invalid("observability.logging.level must not be empty"));
    }

    Ok(())
}

fn validate_simulation(sim: &SimulationConfig) -> Result<(), ConfigError> {
    if sim.num_simulations == 0 {
        return Err(invalid("simulation.num_simulations must be positive"));
    }
    if sim.trades_per_simulation == 0 {
        return Err(invalid("simulation.trades_per_simulation must be positive"));
    }
    if sim.batch_size == 0 {
        return Err(invalid("simulation.batch_size must be positive"));
    }
    if !(sim.initial_equity.is_finite() && sim.initial_equity > 0.0) {
        return Err(invalid("simulation.initial_equity must be positive"));
    }
    if !(sim.confidence_level > 0.0 && sim.confidence_level < 1.0) {
        return Err(invalid(
            "simulation.confidence_level must be between 0.0 and 1.0 (exclusive)",
        ));
    }
    if !(sim.convergence_tolerance.is_finite() && sim.convergence_tolerance >= 0.0) {
        return Err(invalid("simulation.convergence_tolerance must be non-negative"));
    }
    if !(sim.duration_years.is_finite() && sim.duration_years > 0.0) {
        return Err(invalid("simulation.duration_years must be positive"));
    }
    Ok(())
}

fn validate_prop_firm(prop: &PropFirmConfig) -> Result<(), ConfigError> {
    if !(prop.account_size.is_finite() && prop.account_size > 0.0) {
        return Err(invalid("prop_firm.account_size must be positive"));
    }
    if !(prop.trades_per_day.is_finite() && prop.trades_per_day > 0.0) {
        return Err(invalid("prop_firm.trades_per_day must be positive"));
    }
    if prop.express_days_for_payout == 0 {
        return Err(invalid("prop_firm.express_days_for_payout must be positive"));
    }
    if prop.max_daily_loss < 0.0 || prop.max_total_loss < 0.0 {
        return Err(invalid("prop_firm loss limits must be non-negative"));
    }
    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}
