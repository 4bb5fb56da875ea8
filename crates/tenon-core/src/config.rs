//! Configuration file loading for tenon.
//!
//! Reads `.tenon/tenon.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level tenon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenonConfig {
    pub version: String,
    #[serde(default)]
    pub lint: LintConfig,
    #[serde(default)]
    pub variance: VarianceConfig,
}

/// Default-body lint toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Warn when a default implementation references names outside its
    /// contract. Informational only; never blocks construction.
    #[serde(default = "default_true")]
    pub default_body_refs: bool,
}

/// Variance-check tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceConfig {
    /// Treat a type tag present on only one side of a compared pair as a
    /// mismatch. Off by default: partially-annotated pairs are not enforced.
    #[serde(default)]
    pub partial_annotations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            default_body_refs: true,
        }
    }
}

impl Default for VarianceConfig {
    fn default() -> Self {
        Self {
            partial_annotations: false,
        }
    }
}

impl Default for TenonConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            lint: LintConfig::default(),
            variance: VarianceConfig::default(),
        }
    }
}

impl TenonConfig {
    /// Load configuration from `tenon.json` inside the given tenon directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(tenon_dir: &Path) -> Self {
        let config_path = tenon_dir.join("tenon.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!(
                    "tenon: warning: failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
