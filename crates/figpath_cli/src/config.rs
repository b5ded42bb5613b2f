//! `figpath.toml` configuration file handling
//!
//! Every table and key is optional:
//!
//! ```toml
//! [output]
//! precision = 3
//!
//! [document]
//! path_fields = ["vectorPaths", "fillGeometry"]
//! children_field = "children"
//! workers = 0
//! on_error = "skip"
//!
//! [lint]
//! valid_counter_axis_align = ["MIN", "CENTER", "MAX", "BASELINE"]
//! ```

use anyhow::{Context, Result};
use figpath_core::FormatOptions;
use figpath_document::{DocumentOptions, LintOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "figpath.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FigpathConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub document: DocumentOptions,
    #[serde(default)]
    pub lint: LintOptions,
}

/// Emitted path data settings
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Maximum fraction digits; unset keeps full precision
    #[serde(default)]
    pub precision: Option<usize>,
}

impl FigpathConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `figpath.toml` in the working
    /// directory is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: FigpathConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            precision: self.output.precision,
        }
    }
}
