// crates/multisig-ledger-config/src/config.rs
// ============================================================================
// Module: Multisig Ledger Configuration
// Description: Configuration loading and validation for the multisig ledger.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: multisig-ledger-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Owner addresses are parsed and the owner policy is validated at load time,
//! so a loaded config can always build a ledger. Event sink selection is
//! validated for consistency with its output path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use multisig_ledger_core::Address;
use multisig_ledger_core::AuthorizationLedger;
use multisig_ledger_core::FileEventSink;
use multisig_ledger_core::LedgerEventSink;
use multisig_ledger_core::NoopEventSink;
use multisig_ledger_core::OwnerPolicy;
use multisig_ledger_core::StderrEventSink;
use multisig_ledger_core::TransferExecutor;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "multisig-ledger.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "MULTISIG_LEDGER_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level multisig ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Owner set and threshold.
    pub ledger: LedgerSection,
    /// Event sink configuration.
    #[serde(default)]
    pub events: EventsConfig,
}

impl LedgerConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then [`CONFIG_ENV_VAR`], then
    /// `multisig-ledger.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger.validate()?;
        self.events.validate()?;
        Ok(())
    }

    /// Returns the validated owner policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when owners or threshold are invalid.
    pub fn owner_policy(&self) -> Result<OwnerPolicy, ConfigError> {
        self.ledger.owner_policy()
    }

    /// Builds the configured event sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the sink configuration is invalid or the
    /// event log file cannot be opened.
    pub fn build_event_sink(&self) -> Result<Box<dyn LedgerEventSink>, ConfigError> {
        self.events.build_sink()
    }

    /// Builds a ledger from this configuration over the given executor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the policy or event sink cannot be built.
    pub fn build_ledger<T: TransferExecutor>(
        &self,
        executor: T,
    ) -> Result<AuthorizationLedger<T, Box<dyn LedgerEventSink>>, ConfigError> {
        let policy = self.owner_policy()?;
        let sink = self.build_event_sink()?;
        Ok(AuthorizationLedger::from_policy(policy, executor, sink))
    }
}

/// Owner set and confirmation threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerSection {
    /// Owner addresses as `0x`-prefixed hex, in owner-set order.
    pub owners: Vec<String>,
    /// Confirmations required to execute a transaction.
    pub required_confirmations: u32,
}

impl LedgerSection {
    /// Validates owner addresses and the threshold.
    fn validate(&self) -> Result<(), ConfigError> {
        self.owner_policy().map(|_| ())
    }

    /// Parses owners and builds the validated policy.
    fn owner_policy(&self) -> Result<OwnerPolicy, ConfigError> {
        let owners = self
            .owners
            .iter()
            .enumerate()
            .map(|(position, raw)| {
                raw.trim().parse::<Address>().map_err(|err| {
                    ConfigError::Invalid(format!("ledger.owners[{position}] {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        OwnerPolicy::new(owners, self.required_confirmations)
            .map_err(|err| ConfigError::Invalid(format!("ledger: {err}")))
    }
}

/// Event sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSinkKind {
    /// Discard events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File,
}

/// Event sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: EventSinkKind,
    /// Output path for the file sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl EventsConfig {
    /// Validates the sink selection against its path.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (EventSinkKind::File, None) => {
                Err(ConfigError::Invalid("file event sink requires events.path".to_string()))
            }
            (EventSinkKind::File, Some(path)) => {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::Invalid("events.path must not be empty".to_string()));
                }
                validate_path(path)
            }
            (EventSinkKind::None | EventSinkKind::Stderr, Some(_)) => Err(ConfigError::Invalid(
                "events.path is only valid with the file event sink".to_string(),
            )),
            (EventSinkKind::None | EventSinkKind::Stderr, None) => Ok(()),
        }
    }

    /// Builds the configured sink.
    fn build_sink(&self) -> Result<Box<dyn LedgerEventSink>, ConfigError> {
        self.validate()?;
        match (self.sink, &self.path) {
            (EventSinkKind::File, Some(path)) => {
                let sink = FileEventSink::new(path).map_err(|err| {
                    ConfigError::Io(format!("event log {}: {err}", path.display()))
                })?;
                Ok(Box::new(sink))
            }
            (EventSinkKind::Stderr, _) => Ok(Box::new(StderrEventSink)),
            (EventSinkKind::None | EventSinkKind::File, _) => Ok(Box::new(NoopEventSink)),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration or opening outputs.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
