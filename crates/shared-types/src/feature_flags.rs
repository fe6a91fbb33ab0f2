use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional layers are active.
///
/// Loaded from `config.toml` at server startup. Every field defaults to
/// `false` so that a missing or incomplete config file disables all
/// optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
    #[serde(default)]
    pub rate_limit: bool,
    #[serde(default)]
    pub docs: bool,
}

/// Sliding-window rate limit settings (`[rate_limit]` table).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitSettings {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_max_requests() -> u32 {
    120
}

fn default_window_secs() -> u64 {
    60
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}
