// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Wish command - the current wishlist and its history

use super::{open_repository, to_index, Output};
use crate::config::Config;
use crate::repository::WishList;
use crate::types::{AcquireMethod, ItemCategory, Wish};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Subcommand;

/// Wishlist actions
#[derive(Debug, Subcommand)]
pub enum WishCommand {
    /// List wishes
    List {
        /// Show acquired wishes instead
        #[arg(long)]
        history: bool,
    },

    /// Add a wish to the current list
    Add {
        /// What you want
        title: String,

        /// Bicycle, Component, Clothing, Shoes or Other
        #[arg(long)]
        category: ItemCategory,

        /// Notes
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Mark a current wish as acquired and move it to history
    Promote {
        /// Position in the current list (from 1)
        position: usize,

        /// Purchase, Gift, DIY or Other
        #[arg(short, long)]
        method: AcquireMethod,

        /// Acquisition date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete a wish from the current list
    Rm {
        /// Position in the current list (from 1)
        position: usize,
    },

    /// Show the available categories and acquire methods
    Options,
}

/// Run the wish command
pub fn run(command: WishCommand, config: &Config, out: Output) -> Result<()> {
    if let WishCommand::Options = command {
        print_options(out);
        return Ok(());
    }

    let mut repo = open_repository(config)?;

    match command {
        WishCommand::List { history } => {
            let list = if history {
                WishList::History
            } else {
                WishList::Current
            };
            let wishes = repo.list_wish(list);
            if out.json {
                return out.print_json(wishes);
            }
            if wishes.is_empty() {
                println!("Nothing here yet.");
            }
            for (index, wish) in wishes.iter().enumerate() {
                println!("{}", summary_line(wish, index));
                if let Some(description) = wish.item_description() {
                    println!("       {description}");
                }
            }
        }

        WishCommand::Add {
            title,
            category,
            description,
        } => {
            let wish = Wish::new(title, description, category)?;
            let index = repo.add_current_wish(wish)?;
            println!("Added wish #{}", index + 1);
        }

        WishCommand::Promote {
            position,
            method,
            date,
        } => {
            let index = to_index(position)?;
            let acquired = date.map_or_else(Utc::now, |d| d.and_time(NaiveTime::MIN).and_utc());
            let moved = repo.promote_wish_to_history(index, acquired, method)?;
            println!("Moved to history as #{}", moved + 1);
        }

        WishCommand::Rm { position } => {
            let index = to_index(position)?;
            let removed = repo.delete_current_wish(index)?;
            println!("Deleted {}", removed.item_title());
        }

        WishCommand::Options => {}
    }

    Ok(())
}

fn print_options(out: Output) {
    if out.json {
        let categories: Vec<_> = ItemCategory::ALL.iter().map(ItemCategory::label).collect();
        let methods: Vec<_> = AcquireMethod::ALL.iter().map(AcquireMethod::label).collect();
        println!(
            "{}",
            serde_json::json!({ "categories": categories, "acquireMethods": methods })
        );
        return;
    }
    println!("Categories:");
    for category in ItemCategory::ALL {
        println!("  {category}");
    }
    println!("Acquire methods:");
    for method in AcquireMethod::ALL {
        println!("  {method}");
    }
}

/// One list row; acquired wishes also show when and how
fn summary_line(wish: &Wish, index: usize) -> String {
    let mut line = format!(
        "{:>3}. {} [{}] added {}",
        index + 1,
        wish.item_title(),
        wish.category(),
        wish.date_added().format("%Y-%m-%d"),
    );
    if let (Some(date), Some(method)) = (wish.date_acquired(), wish.acquire_method()) {
        line.push_str(&format!(", acquired {} ({method})", date.format("%Y-%m-%d")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_summary_line() {
        let current = seed::sample_current_wishlist();
        assert_eq!(
            summary_line(&current[0], 0),
            "  1. Fixed-Gear Bicycle [Bicycle] added 2016-07-21"
        );

        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc();
        let history = seed::sample_history_wishlist(now);
        assert_eq!(
            summary_line(&history[0], 0),
            "  1. Shimano SPD-SL Pedals 105 PD-5800 [Component] added 2016-06-07, acquired 2024-03-01 (DIY)"
        );
    }
}
