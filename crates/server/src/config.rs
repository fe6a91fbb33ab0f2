use shared_types::{AppConfig, FeatureFlags};
use std::net::SocketAddr;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Parse config file contents, falling back to defaults on any error.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to parse {CONFIG_PATH}, using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` and store it in the global `OnceLock`. Safe to call
/// multiple times; only the first call has effect.
///
/// If the file is missing or unparseable, all flags default to `false`.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(features = ?config.features, "Loaded {CONFIG_PATH}");
            config
        }
        Err(e) => {
            tracing::info!(error = %e, "{CONFIG_PATH} not found, optional features disabled");
            AppConfig::default()
        }
    })
}

/// Get the loaded config. Returns defaults if `load_config()` hasn't run.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn feature_flags() -> &'static FeatureFlags {
    &app_config().features
}

/// Socket address the HTTP server binds to (`BIND_ADDR`).
pub fn bind_addr() -> Result<SocketAddr, std::net::AddrParseError> {
    std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
}

/// Maximum accepted request body size (`MAX_BODY_BYTES`).
pub fn max_body_bytes() -> usize {
    std::env::var("MAX_BODY_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_BODY_BYTES)
}
