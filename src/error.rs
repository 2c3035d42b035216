use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Unknown preset #{0}. Run `winratez presets` to list them")]
    InvalidPreset(usize),
}
