//! Aligner configuration
//!
//! Settings load from a TOML file with a single `[aligner]` table. Every key
//! is optional and falls back to [`AlignerSettings::default`].
//!
//! ```toml
//! [aligner]
//! camera_convention = "landscape_right"
//! vertical_limit = 0.9
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::AlignerSettings;

/// Top-level configuration file
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    pub aligner: AlignerSettings,
}

impl AlignerConfig {
    /// Parse and validate configuration text
    ///
    /// # Example
    /// ```
    /// use north_align::{CameraConvention, config::AlignerConfig};
    ///
    /// let config = AlignerConfig::from_toml_str(
    ///     "[aligner]\ncamera_convention = \"portrait\"\n",
    /// )?;
    /// assert_eq!(config.aligner.camera_convention, CameraConvention::Portrait);
    /// assert_eq!(config.aligner.vertical_limit, 0.9);
    /// # Ok::<(), north_align::Error>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AlignerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(?path, "Loaded config");
        Ok(config)
    }

    /// Load configuration from a TOML file, or defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(?path, "No config found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        info!(?path, "Saved config");
        Ok(())
    }

    /// Check setting ranges
    ///
    /// `vertical_limit` must lie in `(0, 1]`: it is compared against the
    /// vertical component of unit axes.
    pub fn validate(&self) -> Result<()> {
        let limit = self.aligner.vertical_limit;
        if !(limit > 0.0 && limit <= 1.0) {
            return Err(Error::InvalidSetting {
                name: "vertical_limit",
                reason: format!("{} is outside (0, 1]", limit),
            });
        }
        Ok(())
    }
}
