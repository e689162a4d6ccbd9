// WHY: Site-level settings read from the CMS settings export
// Missing file or missing fields fall back to defaults so a bare checkout still renders

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::links::CompactLabelRules;

/// Header background when the CMS leaves it unset
pub const DEFAULT_HEADER_BACKGROUND: &str = "#1a1a1a";

/// Site settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    /// Brand name used for the header and brand-label detection
    pub site_title: String,
    pub header_background_color: Option<String>,
    pub label_rules: CompactLabelRules,
}

impl SiteSettings {
    /// Load settings from a JSON file, returns defaults if the file doesn't exist
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("Settings file {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read settings file {}", path.display()));
            }
        };

        let settings = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        debug!(?settings, "Loaded site settings");
        Ok(settings)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Header background, falling back to the default dark tone
    pub fn header_background(&self) -> &str {
        self.header_background_color
            .as_deref()
            .filter(|color| !color.is_empty())
            .unwrap_or(DEFAULT_HEADER_BACKGROUND)
    }
}
