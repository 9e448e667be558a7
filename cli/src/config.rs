//! Rebalance tool configuration.

use crate::error::CliError;
use btsg_types::params::{DEFAULT_DENOM, DEFAULT_REWARD_THRESHOLD_BTSG, DEFAULT_TOLERANCE_BTSG};
use btsg_types::{RebalanceParams, UnitScale, MICRO_PER_BTSG};
use btsg_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a `btsg-rebalance` run.
///
/// Can be loaded from a TOML file via [`RebalanceConfig::from_toml_file`];
/// command-line flags and environment variables override file values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RebalanceConfig {
    /// Directory holding `allocations.json` and every generated file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_allocations_file")]
    pub allocations_file: String,

    #[serde(default = "default_messages_file")]
    pub messages_file: String,

    /// Denomination written to and expected on wire messages.
    #[serde(default = "default_denom")]
    pub denom: String,

    /// Rewards at or above this many BTSG are withdrawn.
    #[serde(default = "default_reward_threshold")]
    pub reward_threshold_btsg: f64,

    #[serde(default = "default_micro_per_btsg")]
    pub micro_per_btsg: u64,

    /// Allowed |final - target| in BTSG during verification.
    #[serde(default = "default_tolerance")]
    pub tolerance_btsg: f64,

    /// Chain id carried by DAO DAO actions.
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Decimal places used when converting DAO DAO amounts.
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Account allowed to execute on behalf of delegators.
    #[serde(default)]
    pub grantee: Option<String>,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_allocations_file() -> String {
    "allocations.json".to_string()
}

fn default_messages_file() -> String {
    "messages.json".to_string()
}

fn default_denom() -> String {
    DEFAULT_DENOM.to_string()
}

fn default_reward_threshold() -> f64 {
    DEFAULT_REWARD_THRESHOLD_BTSG
}

fn default_micro_per_btsg() -> u64 {
    MICRO_PER_BTSG
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_BTSG
}

fn default_chain_id() -> String {
    "bitsong-2b".to_string()
}

fn default_decimals() -> u32 {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

impl RebalanceConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn scale(&self) -> Result<UnitScale, CliError> {
        Ok(UnitScale::new(self.micro_per_btsg)?)
    }

    pub fn params(&self) -> Result<RebalanceParams, CliError> {
        Ok(RebalanceParams {
            reward_threshold_btsg: self.reward_threshold_btsg,
            scale: self.scale()?,
            denom: self.denom.clone(),
            tolerance_btsg: self.tolerance_btsg,
        })
    }

    /// `name` inside the data directory.
    pub fn data_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn allocations_path(&self) -> PathBuf {
        self.data_path(&self.allocations_file)
    }

    pub fn messages_path(&self) -> PathBuf {
        self.data_path(&self.messages_file)
    }
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            allocations_file: default_allocations_file(),
            messages_file: default_messages_file(),
            denom: default_denom(),
            reward_threshold_btsg: default_reward_threshold(),
            micro_per_btsg: default_micro_per_btsg(),
            tolerance_btsg: default_tolerance(),
            chain_id: default_chain_id(),
            decimals: default_decimals(),
            grantee: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = RebalanceConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = RebalanceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = RebalanceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.denom, "ubtsg");
        assert_eq!(config.micro_per_btsg, 1_000_000);
        assert_eq!(config.reward_threshold_btsg, 1.0);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.grantee, None);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            data_dir = "/srv/rebalance"
            reward_threshold_btsg = 2.5
            grantee = "bitsong1bot"
            log_format = "json"
        "#;
        let config = RebalanceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(
            config.allocations_path(),
            PathBuf::from("/srv/rebalance/allocations.json")
        );
        assert_eq!(config.reward_threshold_btsg, 2.5);
        assert_eq!(config.grantee.as_deref(), Some("bitsong1bot"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.chain_id, "bitsong-2b"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = RebalanceConfig::from_toml_file(Path::new("/nonexistent/btsg.toml"));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let config = RebalanceConfig {
            micro_per_btsg: 0,
            ..Default::default()
        };
        assert!(matches!(config.params(), Err(CliError::Input(_))));
    }
}
