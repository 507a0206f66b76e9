// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - shows the resolved configuration

use crate::config::Config;
use anyhow::{bail, Result};

/// Print one setting, or all of them as TOML
pub fn run(key: Option<&str>, config: &Config) -> Result<()> {
    match key {
        Some(key) => match config.get(key) {
            Some(value) => println!("{value}"),
            None => bail!(
                "Unknown configuration key: {}. Known keys: {}",
                key,
                Config::KEYS.join(", ")
            ),
        },
        None => print!("{}", toml::to_string_pretty(config)?),
    }
    Ok(())
}
