// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - writes every collection as one document

use super::open_repository;
use crate::config::Config;
use crate::repository::{Repository, WishList};
use crate::store::CollectionStore;
use crate::types::{Bicycle, Wish};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// JSON format
    #[default]
    Json,
    /// TOML format
    Toml,
}

impl ExportFormat {
    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

/// Everything the repository holds
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    /// Garage
    pub bicycles: &'a [Bicycle],
    /// Wishes not yet acquired
    pub wishlist_current: &'a [Wish],
    /// Acquired wishes
    pub wishlist_history: &'a [Wish],
}

impl<'a> Snapshot<'a> {
    /// Borrow the repository's collections
    #[must_use]
    pub fn of<S: CollectionStore>(repo: &'a Repository<S>) -> Self {
        Self {
            bicycles: repo.list_bicycles(),
            wishlist_current: repo.list_wish(WishList::Current),
            wishlist_history: repo.list_wish(WishList::History),
        }
    }

    /// Render in `format`
    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ExportFormat::Toml => Ok(toml::to_string_pretty(self)?),
        }
    }
}

/// Run the export command
pub fn run(format: ExportFormat, output: Option<PathBuf>, config: &Config) -> Result<()> {
    info!("Exporting to {}", format.extension());

    let repo = open_repository(config)?;
    let content = Snapshot::of(&repo).render(format)?;

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
