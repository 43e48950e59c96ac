use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container, persisted as TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cli: CliConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
}

/// Where the external `h2mm-cli` binary comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliSource {
    /// Resolve `h2mm-cli` through PATH.
    #[default]
    Bundled,
    /// Use a user-selected executable path.
    Custom,
}

/// Settings for locating and invoking the external tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub source: CliSource,
    /// Required when `source` is `custom`.
    #[serde(default)]
    pub custom_path: Option<PathBuf>,
}

/// First-run wizard state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingConfig {
    #[serde(default)]
    pub complete: bool,
}
