// crates/multisig-ledger-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for multisig-ledger-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use multisig_ledger_config::ConfigError;
use multisig_ledger_config::LedgerConfig;
use multisig_ledger_core::Address;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Returns the owner address at `value` in canonical text form.
pub fn owner_text(value: u64) -> String {
    Address::from_low_u64(value).to_string()
}

/// Returns a valid three-owner, threshold-two config document.
pub fn minimal_toml() -> String {
    format!(
        "[ledger]\nowners = [\"{}\", \"{}\", \"{}\"]\nrequired_confirmations = 2\n",
        owner_text(1),
        owner_text(2),
        owner_text(3)
    )
}

/// Parses the minimal config.
pub fn minimal_config() -> Result<LedgerConfig, String> {
    LedgerConfig::from_toml_str(&minimal_toml()).map_err(|err| err.to_string())
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
