use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use harbor_app_core::ControllerOptions;
use harbor_infra::{load_seed, sample_seed, Seed};

const QUALIFIER: &str = "com";
const ORG: &str = "harbor";
const APP: &str = "boats";

/// Contents of `settings.json` in the platform config directory. Every key
/// is optional; command line flags win over the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data: Option<Utf8PathBuf>,
    #[serde(default)]
    pub latency_ms: Option<u64>,
    #[serde(default)]
    pub controller: ControllerOptions,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from(QUALIFIER, ORG, APP)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Loads the settings file at `path`, or the platform default when
    /// `path` is `None`. A missing default file yields defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.as_std_path().to_path_buf(),
            None => {
                let p = Self::default_path()?;
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings {}", path.display()))?;
        Ok(settings)
    }

    pub fn seed(&self) -> Result<Seed> {
        match &self.data {
            Some(path) => load_seed(path),
            None => Ok(sample_seed()),
        }
    }
}
