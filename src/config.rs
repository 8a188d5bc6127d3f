use std::path::PathBuf;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::GameResult;

/// Host configuration, read from `MOON_RUNNER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawConfig")]
pub struct Config {
    /// Where the save record is kept.
    pub save_path: PathBuf,
    /// A `tracing_subscriber::EnvFilter` directive; `RUST_LOG` still wins when set.
    pub log_filter: String,
    /// Start with audio muted.
    pub muted: bool,
    /// Fixed seed for reproducible runs; entropy is used when unset.
    pub seed: Option<u64>,
    /// Window scale factor over the logical canvas.
    pub scale: f32,
}

/// Configuration as read from the environment, before validation.
#[derive(Debug, Deserialize, Serialize)]
struct RawConfig {
    #[serde(default = "default_save_path")]
    save_path: PathBuf,
    #[serde(default = "default_log_filter")]
    log_filter: String,
    #[serde(default)]
    muted: bool,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_scale")]
    scale: f32,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            log_filter: default_log_filter(),
            muted: false,
            seed: None,
            scale: default_scale(),
        }
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let scale = if raw.scale.is_finite() { raw.scale.clamp(0.5, 4.0) } else { default_scale() };
        Config {
            save_path: raw.save_path,
            log_filter: raw.log_filter,
            muted: raw.muted,
            seed: raw.seed,
            scale,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

fn default_save_path() -> PathBuf {
    PathBuf::from("moon_runner_save.json")
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_scale() -> f32 {
    1.5
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(RawConfig::default())).merge(Env::prefixed("MOON_RUNNER_"))
    }

    pub fn load() -> GameResult<Config> {
        Ok(Self::figment().extract()?)
    }
}
