use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod app;
mod domain {
    pub mod entities {
        pub mod forms;
        pub mod record;
    }
    pub mod table_view;
}
mod infra {
    pub mod config;
    pub mod export {
        pub mod csv;
    }
    pub mod http {
        pub mod client;
        pub mod envelope;
    }
}
mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}
mod ui {
    pub mod components {
        pub mod fields;
        pub mod table;
    }
    pub mod screens {
        pub mod home;
        pub mod lookups;
        pub mod members;
        pub mod payments;
    }
    pub mod state {
        pub mod app_state;
    }
}
mod usecase {
    pub mod ports {
        pub mod api;
    }
    pub mod services {
        pub mod outcome;
        pub mod payment_service;
        pub mod query_service;
    }
}

#[cfg(test)]
mod tests;

use crate::infra::config::{load_config, project_dirs};

fn main() {
    let config = load_config();
    let log_level = config
        .as_ref()
        .map(|config| config.log_level.as_str())
        .unwrap_or("info");
    init_tracing(log_level);
    if let Err(err) = &config {
        tracing::warn!(error = %format!("{err:#}"), "configuration could not be loaded");
    }

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView data directory");
    tracing::info!(dir = %webview_data_dir.display(), "starting mikados");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Mikados"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
