use crate::error::AppError;
use crate::stats::history::{DEFAULT_HISTORY_CAP, MAX_HISTORY_CAP};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ANIMATION_MS: u64 = 1500;
pub const DEFAULT_ANIMATION_STEPS: u32 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub history_cap: usize,
    pub animation_duration: Duration,
    pub animation_steps: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any variable source, so tests don't have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("WINRATEZ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_data_dir);

        let history_cap = match positive(&lookup, "WINRATEZ_HISTORY_CAP")? {
            Some(cap) if cap > MAX_HISTORY_CAP as u64 => {
                return Err(AppError::ConfigError(format!(
                    "WINRATEZ_HISTORY_CAP must be at most {}, got {}",
                    MAX_HISTORY_CAP, cap
                )))
            }
            Some(cap) => cap as usize,
            None => DEFAULT_HISTORY_CAP,
        };

        let animation_ms = match lookup("WINRATEZ_ANIMATION_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::ConfigError(format!(
                    "WINRATEZ_ANIMATION_MS must be a number of milliseconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_ANIMATION_MS,
        };

        let animation_steps = positive(&lookup, "WINRATEZ_ANIMATION_STEPS")?
            .unwrap_or(DEFAULT_ANIMATION_STEPS as u64)
            .min(u32::MAX as u64) as u32;

        Ok(Config {
            data_dir,
            history_cap,
            animation_duration: Duration::from_millis(animation_ms),
            animation_steps,
        })
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".winratez")
    }
}

fn positive<F>(lookup: &F, key: &str) -> Result<Option<u64>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(value) if value > 0 => Ok(Some(value)),
            _ => Err(AppError::ConfigError(format!(
                "{} must be a positive integer, got {:?}",
                key, raw
            ))),
        },
        None => Ok(None),
    }
}
