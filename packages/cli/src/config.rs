use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "nudge.config.json";

/// Nudge configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `<id>.json` per campaign
    #[serde(default = "default_campaigns_dir")]
    pub campaigns_dir: String,

    /// Where relative template paths are looked up
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Undo levels kept per edit session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Default log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_campaigns_dir() -> String {
    "campaigns".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_history_limit() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn campaigns_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.campaigns_dir)
    }

    /// Resolve a template argument: paths that exist as given win, otherwise
    /// the name is looked up in the templates directory.
    pub fn template_path(&self, cwd: &Path, template: &Path) -> PathBuf {
        let direct = cwd.join(template);
        if direct.exists() {
            direct
        } else {
            cwd.join(&self.templates_dir).join(template)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            campaigns_dir: default_campaigns_dir(),
            templates_dir: default_templates_dir(),
            history_limit: default_history_limit(),
            log_level: default_log_level(),
        }
    }
}
