//! Error types for north-align

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the crate's input boundaries
///
/// The per-frame alignment never fails with an error; see
/// [`Unavailable`](crate::Unavailable) for why a frame produced no alignment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Compass reading was NaN or infinite
    #[error("Non-finite heading: {0}")]
    NonFiniteHeading(f32),

    /// Configuration file could not be read or written
    #[error("Config file {}: {source}", .path.display())]
    ConfigIo {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for the settings
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A setting is outside its allowed range
    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Setting name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
