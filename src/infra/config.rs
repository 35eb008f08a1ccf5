use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::table_view::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "https://mikados.onrender.com";
pub const API_URL_ENV: &str = "MIKADOS_API_URL";
pub const PAGE_SIZE_ENV: &str = "MIKADOS_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("api_base_url must start with http:// or https://, got {url:?}")
        }
        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero")
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero")
        }
        Ok(())
    }
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "mikados", "mikados")
        .ok_or_else(|| anyhow!("unable to resolve application directories"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<AppConfig> {
    let path = default_config_path()?;
    load_config_from(Some(path.as_path()), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file when it exists, then environment overrides.
pub fn load_config_from<F>(path: Option<&Path>, env: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path.filter(|path| path.is_file()) {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AppConfig>(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AppConfig::default(),
    };

    if let Some(url) = env(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }
    if let Some(raw) = env(PAGE_SIZE_ENV).filter(|raw| !raw.trim().is_empty()) {
        config.page_size = raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{PAGE_SIZE_ENV} must be a whole number, got {raw:?}"))?;
    }

    config.validate()?;
    Ok(config)
}
