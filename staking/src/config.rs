//! Ledger deployment configuration with TOML file support.

use std::path::Path;

use concert_types::{AccountAddress, StakeParams};
use serde::{Deserialize, Serialize};

use crate::error::StakeError;

/// Configuration for one staking ledger deployment.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`]
/// or built programmatically (e.g. for tests).
///
/// ```toml
/// admin = "admin"
/// custodian = "vault"
///
/// [params]
/// reward_rate_per_token = 50000000000000000
/// reward_rate_per_second = 126839168
/// reward_scale = 100000000000000000
/// restake_policy = "settle_then_reset"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The account allowed to fund the reward pool.
    pub admin: AccountAddress,

    /// The token account holding all custodied funds.
    pub custodian: AccountAddress,

    /// Reward accrual parameters. Every field has a default matching the
    /// reference deployment, so the section may be partial or absent.
    #[serde(default)]
    pub params: StakeParams,
}

impl LedgerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, StakeError> {
        let config: Self = toml::from_str(raw).map_err(|e| StakeError::Config(e.to_string()))?;
        config.params.validate().map_err(StakeError::InvalidParams)?;
        if config.admin == config.custodian {
            return Err(StakeError::InvalidParams(
                "administrator and custodian must be distinct accounts".into(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, StakeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StakeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concert_types::RestakePolicy;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let config = LedgerConfig::from_toml_str(
            r#"
            admin = "admin"
            custodian = "vault"

            [params]
            reward_rate_per_token = 7
            reward_rate_per_second = 3
            reward_scale = 2
            restake_policy = "reset_clock"
            "#,
        )
        .unwrap();
        assert_eq!(config.admin.as_str(), "admin");
        assert_eq!(config.custodian.as_str(), "vault");
        assert_eq!(config.params.reward_rate_per_token, 7);
        assert_eq!(config.params.reward_rate_per_second, 3);
        assert_eq!(config.params.reward_scale, 2);
        assert_eq!(config.params.restake_policy, RestakePolicy::ResetClock);
    }

    #[test]
    fn missing_params_section_uses_defaults() {
        let config = LedgerConfig::from_toml_str(
            r#"
            admin = "admin"
            custodian = "vault"
            "#,
        )
        .unwrap();
        assert_eq!(config.params.reward_rate_per_token, 50_000_000_000_000_000);
        assert_eq!(config.params.reward_rate_per_second, 126_839_168);
        assert_eq!(config.params.reward_scale, 100_000_000_000_000_000);
        assert_eq!(
            config.params.restake_policy,
            RestakePolicy::SettleThenReset
        );
    }

    #[test]
    fn zero_scale_rejected_at_load() {
        let err = LedgerConfig::from_toml_str(
            r#"
            admin = "admin"
            custodian = "vault"

            [params]
            reward_scale = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, StakeError::InvalidParams(_)));
    }

    #[test]
    fn admin_custodian_collision_rejected() {
        let err = LedgerConfig::from_toml_str(
            r#"
            admin = "vault"
            custodian = "vault"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, StakeError::InvalidParams(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "admin = \"admin\"\ncustodian = \"vault\"").unwrap();
        let config = LedgerConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.custodian.as_str(), "vault");
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = LedgerConfig::from_toml_file("/nonexistent/ledger.toml").unwrap_err();
        assert!(matches!(err, StakeError::Config(_)));
    }
}
