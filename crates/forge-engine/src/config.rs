use std::env;
use std::path::PathBuf;

use forge_contracts::history::DEFAULT_HISTORY_CAP;

pub const HOME_ENV: &str = "PROMPT_FORGE_HOME";
pub const HISTORY_CAP_ENV: &str = "PROMPT_FORGE_HISTORY_CAP";
pub const EVENTS_ENV: &str = "PROMPT_FORGE_EVENTS";

const STORAGE_FILE_NAME: &str = "storage.json";
const DEFAULT_HOME_DIR: &str = ".prompt-forge";

/// Values given explicitly on the command line. Anything left unset falls back
/// to the environment and then to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub home: Option<PathBuf>,
    pub history_cap: Option<usize>,
    pub events: Option<PathBuf>,
    pub ephemeral: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeConfig {
    pub home: PathBuf,
    pub history_cap: usize,
    pub events_path: Option<PathBuf>,
    pub ephemeral: bool,
}

impl ForgeConfig {
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, non_empty_env)
    }

    /// Same as [`ForgeConfig::resolve`] with a caller-supplied variable lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let home = overrides
            .home
            .or_else(|| lookup(HOME_ENV).map(PathBuf::from))
            .unwrap_or_else(|| default_home(&lookup));
        let history_cap = overrides
            .history_cap
            .or_else(|| lookup(HISTORY_CAP_ENV).and_then(|raw| raw.parse::<usize>().ok()))
            .unwrap_or(DEFAULT_HISTORY_CAP)
            .max(1);
        let events_path = overrides
            .events
            .or_else(|| lookup(EVENTS_ENV).map(PathBuf::from));

        Self {
            home,
            history_cap,
            events_path,
            ephemeral: overrides.ephemeral,
        }
    }

    /// In-memory history, no event log. Used by tests and `--ephemeral`.
    pub fn ephemeral() -> Self {
        Self {
            home: PathBuf::from(DEFAULT_HOME_DIR),
            history_cap: DEFAULT_HISTORY_CAP,
            events_path: None,
            ephemeral: true,
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.home.join(STORAGE_FILE_NAME)
    }
}

fn default_home(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    match lookup("HOME") {
        Some(home) => PathBuf::from(home).join(DEFAULT_HOME_DIR),
        None => PathBuf::from(".").join(DEFAULT_HOME_DIR),
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
