// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use anyhow::{Context, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_SEARCH_URL_TEMPLATE: &str =
    "https://www.law.go.kr/admRulSc.do?menuId=5&query={query}";

fn default_source() -> String {
    ".".to_string()
}
fn default_change_log_path() -> String {
    "data.json".to_string()
}
fn default_listing_path() -> String {
    "snapshot.json".to_string()
}
fn default_categories() -> Vec<CategorySource> {
    vec![
        CategorySource {
            tag: "NFPC".to_string(),
            path: "data/standards_nfpc.json".to_string(),
        },
        CategorySource {
            tag: "NFTC".to_string(),
            path: "data/standards_nftc.json".to_string(),
        },
    ]
}
fn default_search_url_template() -> String {
    DEFAULT_SEARCH_URL_TEMPLATE.to_string()
}
fn default_user_agent() -> String {
    format!("nfview/{}", env!("CARGO_PKG_VERSION"))
}
fn default_log_level() -> String {
    "info".to_string()
}

/// One category-specific standards document and the tag its items receive.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CategorySource {
    pub tag: String,
    pub path: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Base URL (`http(s)://...`) or directory the data documents are read from.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_change_log_path")]
    pub change_log_path: String,
    #[serde(default = "default_listing_path")]
    pub listing_path: String,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySource>,
    #[serde(default = "default_search_url_template")]
    pub search_url_template: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            change_log_path: default_change_log_path(),
            listing_path: default_listing_path(),
            categories: default_categories(),
            search_url_template: default_search_url_template(),
            user_agent: default_user_agent(),
            locale: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    /// Broken files are still reported.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    /// The file is replaced atomically: written next to the target, then renamed.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, toml_str)
            .with_context(|| format!("Failed to write config file '{}'", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace config file '{}'", path.display()))?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn category_tags(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.tag.clone()).collect()
    }
}
