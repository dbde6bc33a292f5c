//! Genesis settings with TOML file support.

use crate::config::{validate, VotingConfig};
use crate::error::GovernanceError;
use agora_types::{AccountId, Amount, DAY_SECS, UNIT};
use agora_utils::{try_init_logging, LogFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings a governance system is started from.
///
/// Can be loaded from a TOML file via [`GovernanceSettings::from_toml_file`]
/// or built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GovernanceSettings {
    /// Identity of the governance system itself.
    #[serde(default = "default_system")]
    pub system: AccountId,

    /// Initial admin; receives the treasury on retirement.
    #[serde(default = "default_admin")]
    pub admin: AccountId,

    /// The governance token.
    #[serde(default = "default_token")]
    pub token: AccountId,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub voting: VotingTable,
}

/// The `[voting]` table, unvalidated until [`GovernanceSettings::voting_config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingTable {
    /// Proposal fee in raw units.
    #[serde(default = "default_proposal_fee")]
    pub proposal_fee: u64,

    #[serde(default = "default_lock_duration_secs")]
    pub lock_duration_secs: u64,

    #[serde(default = "default_majority_percent")]
    pub majority_percent: u8,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_system() -> AccountId {
    AccountId::new("governance")
}

fn default_admin() -> AccountId {
    AccountId::new("admin")
}

fn default_token() -> AccountId {
    AccountId::new("governance-token")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_proposal_fee() -> u64 {
    UNIT as u64
}

fn default_lock_duration_secs() -> u64 {
    120 * DAY_SECS
}

fn default_majority_percent() -> u8 {
    55
}

impl Default for VotingTable {
    fn default() -> Self {
        Self {
            proposal_fee: default_proposal_fee(),
            lock_duration_secs: default_lock_duration_secs(),
            majority_percent: default_majority_percent(),
        }
    }
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceSettings {
    /// Load settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Settings(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        toml::from_str(s).map_err(|e| GovernanceError::Settings(e.to_string()))
    }

    /// Serialize the settings to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Settings(e.to_string()))
    }

    /// Install the global tracing subscriber described by `log_format` and
    /// `log_level`. `RUST_LOG` still wins when set.
    pub fn init_logging(&self) -> Result<(), GovernanceError> {
        try_init_logging(self.log_format, &self.log_level)
            .map_err(|e| GovernanceError::Settings(e.to_string()))
    }

    /// The validated voting configuration.
    pub fn voting_config(&self) -> Result<VotingConfig, GovernanceError> {
        Ok(validate(VotingConfig {
            proposal_fee: Amount::new(u128::from(self.voting.proposal_fee)),
            lock_duration_secs: self.voting.lock_duration_secs,
            majority_percent: self.voting.majority_percent,
        })?)
    }
}

impl Default for GovernanceSettings {
    fn default() -> Self {
        Self {
            system: default_system(),
            admin: default_admin(),
            token: default_token(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            voting: VotingTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigViolation, ErrorKind};
    use std::io::Write;

    #[test]
    fn default_settings_round_trip_through_toml() {
        let settings = GovernanceSettings::default();
        let toml_str = settings.to_toml_string().expect("serializable");
        let parsed = GovernanceSettings::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let settings = GovernanceSettings::from_toml_str("").expect("defaults");
        assert_eq!(settings.log_format, LogFormat::Human);
        assert_eq!(settings.log_level, "info");
        let voting = settings.voting_config().expect("defaults are in range");
        assert_eq!(voting.majority_percent, 55);
        assert_eq!(voting.lock_duration_secs, 120 * DAY_SECS);
        assert_eq!(voting.proposal_fee, Amount::new(UNIT));
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            admin = "alice"
            log_format = "json"

            [voting]
            majority_percent = 70
        "#;
        let settings = GovernanceSettings::from_toml_str(toml).expect("should parse");
        assert_eq!(settings.admin, AccountId::new("alice"));
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.voting.majority_percent, 70);
        assert_eq!(settings.voting.lock_duration_secs, 120 * DAY_SECS);
    }

    #[test]
    fn out_of_range_voting_table_fails_validation() {
        let settings =
            GovernanceSettings::from_toml_str("[voting]\nmajority_percent = 90\n").unwrap();
        let err = settings.voting_config().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            GovernanceError::InvalidConfig(ConfigViolation::MajorityOutOfRange { value: 90, .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "system = \"dao\"\n[voting]\nlock_duration_secs = {}", 365 * DAY_SECS)
            .unwrap();
        let settings = GovernanceSettings::from_toml_file(file.path()).unwrap();
        assert_eq!(settings.system, AccountId::new("dao"));
        assert_eq!(settings.voting_config().unwrap().lock_duration_secs, 365 * DAY_SECS);
    }

    #[test]
    fn logging_installs_once() {
        let settings = GovernanceSettings {
            log_level: "warn".to_string(),
            ..GovernanceSettings::default()
        };
        settings.init_logging().expect("first subscriber");
        assert!(matches!(
            settings.init_logging(),
            Err(GovernanceError::Settings(_))
        ));
    }

    #[test]
    fn missing_file_returns_settings_error() {
        let result = GovernanceSettings::from_toml_file("/nonexistent/agora.toml");
        assert!(matches!(result, Err(GovernanceError::Settings(_))));
    }
}
