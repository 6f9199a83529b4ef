use std::env;
use std::time::Duration;

use crate::errors::domain::GameError;

pub const END_CONFIRM_ENV: &str = "RESISTANCE_END_CONFIRM_SECS";
pub const SEED_ENV: &str = "RESISTANCE_SEED";

const DEFAULT_END_CONFIRM: Duration = Duration::from_secs(30);

/// Runtime settings for the lobby and the sessions it creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// How long a first "end" stays armed waiting for the confirming second "end".
    pub end_confirm_window: Duration,
    /// Base seed for deterministic sessions; `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            end_confirm_window: DEFAULT_END_CONFIRM,
            seed: None,
        }
    }
}

impl TableConfig {
    /// Read settings from the environment, falling back to defaults for unset values.
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GameError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(END_CONFIRM_ENV) {
            let secs = parse_u64(END_CONFIRM_ENV, &raw)?;
            config.end_confirm_window = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(SEED_ENV) {
            config.seed = Some(parse_u64(SEED_ENV, &raw)?);
        }
        Ok(config)
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, GameError> {
    raw.trim().parse().map_err(|_| {
        GameError::config(format!(
            "Environment variable '{name}' must be a non-negative integer, got '{raw}'"
        ))
    })
}
