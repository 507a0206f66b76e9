// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod bike;
pub mod completions;
pub mod config;
pub mod export;
pub mod wish;

use crate::config::Config;
use crate::repository::{LoadOutcome, Repository};
use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Output settings shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Machine-readable output
    pub json: bool,
    /// Dim placeholders
    pub color: bool,
}

impl Output {
    /// Render a value, or a dimmed "No <label>" placeholder when absent
    #[must_use]
    pub fn value_or_placeholder(&self, value: Option<&str>, label: &str) -> String {
        match value {
            Some(value) => value.to_string(),
            None => self.placeholder(&format!("No {label}")),
        }
    }

    /// Dim `text` when colour is on
    #[must_use]
    pub fn placeholder(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Print `value` as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Open the repository in the configured data directory
pub fn open_repository(config: &Config) -> Result<Repository> {
    let repo = Repository::open(&config.data_dir)
        .with_context(|| format!("Failed to open data in {}", config.data_dir.display()))?;

    let report = repo.load_report();
    for (name, outcome) in [
        ("bicycles", &report.bicycles),
        ("current wishlist", &report.current),
        ("wishlist history", &report.history),
    ] {
        match outcome {
            LoadOutcome::Recovered { .. }
            | LoadOutcome::Unreadable { .. }
            | LoadOutcome::Unsaved { .. } => {
                eprintln!("Warning: {name} {outcome}");
            }
            LoadOutcome::Loaded(_) | LoadOutcome::Seeded => {}
        }
    }
    Ok(repo)
}

/// Convert a 1-based position from the command line
pub fn to_index(position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Positions start at 1"),
    }
}
