// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Bike command - list, show and edit the garage

use super::{open_repository, to_index, Output};
use crate::config::Config;
use crate::draft::{Attribute, BicycleDraft};
use crate::types::{Amount, Bicycle, ImageRef};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use tracing::debug;

/// Garage actions
#[derive(Debug, Subcommand)]
pub enum BikeCommand {
    /// List bicycles
    List,

    /// Show every detail of one bicycle
    Show {
        /// Position in the list (from 1)
        position: usize,
    },

    /// Add a bicycle
    Add {
        /// Attribute to set, e.g. --set "Frame Size=57 cm"
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Set or clear one attribute
    Set {
        /// Position in the list (from 1)
        position: usize,

        /// Attribute label, e.g. "Cassette Sprocket Count"
        attribute: String,

        /// New value (omit to clear)
        value: Option<String>,
    },

    /// Set or clear the serial number
    Serial {
        /// Position in the list (from 1)
        position: usize,

        /// Serial number (omit to remove)
        value: Option<String>,

        /// Photo of the serial number
        #[arg(long)]
        image: Option<String>,
    },

    /// Update purchase details; omitted fields are kept
    Purchase {
        /// Position in the list (from 1)
        position: usize,

        /// Shop name
        #[arg(long)]
        store: Option<String>,

        /// Price paid, e.g. 999.00
        #[arg(long)]
        amount: Option<Amount>,

        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Remove all purchase details
        #[arg(long, conflicts_with_all = ["store", "amount", "date"])]
        clear: bool,
    },

    /// Set or clear the bicycle photo
    Image {
        /// Position in the list (from 1)
        position: usize,

        /// Image reference (omit to clear)
        reference: Option<String>,
    },

    /// Delete a bicycle
    Rm {
        /// Position in the list (from 1)
        position: usize,
    },
}

/// Run the bike command
pub fn run(command: BikeCommand, config: &Config, out: Output) -> Result<()> {
    let mut repo = open_repository(config)?;

    match command {
        BikeCommand::List => {
            if out.json {
                return out.print_json(repo.list_bicycles());
            }
            if repo.list_bicycles().is_empty() {
                println!("No bicycles. Add one with 'bicycles bike add'.");
            }
            for (index, bike) in repo.list_bicycles().iter().enumerate() {
                println!("{}", summary_line(bike, index, out));
            }
        }

        BikeCommand::Show { position } => {
            let index = to_index(position)?;
            let bike = repo.bicycle(index)?;
            if out.json {
                return out.print_json(bike);
            }
            print_details(bike, index, out);
        }

        BikeCommand::Add { set } => {
            let mut draft = BicycleDraft::new();
            for pair in &set {
                let (key, value) = pair
                    .split_once('=')
                    .with_context(|| format!("Expected KEY=VALUE, got '{pair}'"))?;
                draft.update_attribute(key, Some(value))?;
            }
            let index = draft.commit(&mut repo)?;
            println!("Added bicycle #{}", index + 1);
        }

        BikeCommand::Set {
            position,
            attribute,
            value,
        } => {
            let index = to_index(position)?;
            let mut draft = BicycleDraft::edit(&repo, index)?;
            draft.update_attribute(&attribute, value.as_deref())?;
            commit(draft, &mut repo)?;
        }

        BikeCommand::Serial {
            position,
            value,
            image,
        } => {
            let index = to_index(position)?;
            let mut draft = BicycleDraft::edit(&repo, index)?;
            draft.update_serial_number(value.as_deref(), image.map(ImageRef::new))?;
            commit(draft, &mut repo)?;
        }

        BikeCommand::Purchase {
            position,
            store,
            amount,
            date,
            clear,
        } => {
            let index = to_index(position)?;
            let mut draft = BicycleDraft::edit(&repo, index)?;
            if clear {
                draft.update_purchase_details(None, None, None)?;
            } else {
                let current = draft.bicycle().purchase_details.clone().unwrap_or_default();
                let store = store.or(current.store_name);
                draft.update_purchase_details(
                    store.as_deref(),
                    amount.or(current.amount_paid),
                    date.or(current.date_purchased),
                )?;
            }
            commit(draft, &mut repo)?;
        }

        BikeCommand::Image {
            position,
            reference,
        } => {
            let index = to_index(position)?;
            let mut draft = BicycleDraft::edit(&repo, index)?;
            draft.update_image(reference.map(ImageRef::new));
            commit(draft, &mut repo)?;
        }

        BikeCommand::Rm { position } => {
            let index = to_index(position)?;
            let removed = repo.delete_bicycle(index)?;
            println!("Deleted {}", removed.display_name(index));
        }
    }

    Ok(())
}

fn commit(draft: BicycleDraft, repo: &mut crate::repository::Repository) -> Result<()> {
    debug!("Committing draft {:?}", draft.position());
    let index = draft.commit(repo)?;
    println!("Saved bicycle #{}", index + 1);
    Ok(())
}

/// One list row: name, then brand, model and type
fn summary_line(bike: &Bicycle, index: usize, out: Output) -> String {
    format!(
        "{:>3}. {}  {} {} ({})",
        index + 1,
        bike.display_name(index),
        out.value_or_placeholder(bike.brand.as_deref(), "Brand"),
        out.value_or_placeholder(bike.model.as_deref(), "Model"),
        out.value_or_placeholder(bike.bike_type.as_deref(), "Type"),
    )
}

fn print_details(bike: &Bicycle, index: usize, out: Output) {
    println!("{}", bike.display_name(index));
    println!(
        "  {:<24} {}",
        "Image",
        out.value_or_placeholder(
            bike.image.as_ref().filter(|i| !i.is_placeholder()).map(ImageRef::as_str),
            "Image"
        )
    );
    for attr in Attribute::ALL {
        let value = attr.value_of(bike);
        println!(
            "  {:<24} {}",
            attr.label(),
            out.value_or_placeholder(value.as_deref(), attr.label())
        );
    }

    match &bike.serial_number {
        Some(serial) if serial.image().is_placeholder() => {
            println!("  {:<24} {}", "Serial Number", serial.value());
        }
        Some(serial) => {
            println!("  {:<24} {} [{}]", "Serial Number", serial.value(), serial.image());
        }
        None => println!("  {:<24} {}", "Serial Number", out.placeholder("No Serial Number")),
    }

    let details = bike.purchase_details.clone().unwrap_or_default();
    let amount = details.amount_paid.map(|a| format!("${a}"));
    let date = details.date_purchased.map(|d| d.to_string());
    println!(
        "  {:<24} {}",
        "Store Name",
        out.value_or_placeholder(details.store_name.as_deref(), "Store Name")
    );
    println!(
        "  {:<24} {}",
        "Amount Paid",
        out.value_or_placeholder(amount.as_deref(), "Amount Paid")
    );
    println!(
        "  {:<24} {}",
        "Date Purchased",
        out.value_or_placeholder(date.as_deref(), "Date Purchased")
    );
}
