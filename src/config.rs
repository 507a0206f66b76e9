// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `BICYCLES_*` environment variables. Command-line flags are applied on top
//! by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BICYCLES";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the collection files
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Highlight placeholders in terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: project_dirs()
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".bicycles")),
            log_level: "info".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::get`]
    pub const KEYS: [&'static str; 3] = ["data_dir", "log_level", "color"];

    /// One setting rendered as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.data_dir.display().to_string()),
            "log_level" => Some(self.log_level.clone()),
            "color" => Some(self.color.to_string()),
            _ => None,
        }
    }

    /// Configured log level, if it names one
    #[must_use]
    pub fn tracing_level(&self) -> Option<tracing::Level> {
        self.log_level.parse().ok()
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "bicycles", "bicycles")
}

/// Default location of the config file
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration
///
/// An explicit `path` must exist; the default config file is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let (file, required) = match path {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (default_config_file(), false),
    };
    load_from(file.as_deref(), required, true)
}

fn load_from(file: Option<&Path>, required: bool, use_env: bool) -> Result<Config> {
    let defaults = Config::default();
    let mut builder = ::config::Config::builder()
        .set_default("data_dir", defaults.data_dir.display().to_string())?
        .set_default("log_level", defaults.log_level)?
        .set_default("color", defaults.color)?;

    if let Some(file) = file {
        tracing::debug!("Reading configuration from {}", file.display());
        builder = builder.add_source(
            ::config::File::from(file)
                .format(::config::FileFormat::Toml)
                .required(required),
        );
    }
    if use_env {
        builder = builder.add_source(::config::Environment::with_prefix(ENV_PREFIX));
    }

    builder
        .build()
        .and_then(|settings| settings.try_deserialize::<Config>())
        .context("Failed to load configuration")
}
