// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Detached bicycle editing
//!
//! A [`BicycleDraft`] holds a deep copy of a bicycle. Edits touch only the
//! copy; nothing reaches the repository until [`BicycleDraft::commit`].

use crate::error::{Result, ValidationError};
use crate::repository::Repository;
use crate::store::CollectionStore;
use crate::types::{Amount, Bicycle, ImageRef, PurchaseDetails, SerialNumber};
use chrono::{NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

/// The simple bicycle fields editable by label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Owner's name for the bicycle
    Nickname,
    /// Manufacturer
    Brand,
    /// Model name
    Model,
    /// Bicycle type
    Type,
    /// Frame size
    FrameSize,
    /// Frame colour
    FrameColor,
    /// Chainring teeth
    Chainrings,
    /// Cassette range
    CassetteRange,
    /// Number of cassette sprockets (integer)
    CassetteSprocketCount,
    /// Wheel and tyre size
    WheelSize,
    /// Stem length in millimetres (integer)
    StemLength,
}

impl Attribute {
    /// Display order of the detail screen
    pub const ALL: [Self; 11] = [
        Self::Nickname,
        Self::Brand,
        Self::Model,
        Self::Type,
        Self::FrameSize,
        Self::FrameColor,
        Self::Chainrings,
        Self::CassetteRange,
        Self::CassetteSprocketCount,
        Self::WheelSize,
        Self::StemLength,
    ];

    /// Label shown next to the value
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nickname => "Nickname",
            Self::Brand => "Brand",
            Self::Model => "Model",
            Self::Type => "Type",
            Self::FrameSize => "Frame Size",
            Self::FrameColor => "Frame Color",
            Self::Chainrings => "Chainrings",
            Self::CassetteRange => "Cassette Range",
            Self::CassetteSprocketCount => "Cassette Sprocket Count",
            Self::WheelSize => "Wheel Size",
            Self::StemLength => "Stem Length",
        }
    }

    /// Whether the field holds a whole number
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::CassetteSprocketCount | Self::StemLength)
    }

    /// Current value rendered as text
    #[must_use]
    pub fn value_of(&self, bike: &Bicycle) -> Option<String> {
        match self {
            Self::Nickname => bike.nickname.clone(),
            Self::Brand => bike.brand.clone(),
            Self::Model => bike.model.clone(),
            Self::Type => bike.bike_type.clone(),
            Self::FrameSize => bike.frame_size.clone(),
            Self::FrameColor => bike.frame_color.clone(),
            Self::Chainrings => bike.chainrings.clone(),
            Self::CassetteRange => bike.cassette_range.clone(),
            Self::CassetteSprocketCount => bike.cassette_sprocket_count.map(|n| n.to_string()),
            Self::WheelSize => bike.wheel_size.clone(),
            Self::StemLength => bike.stem_length.map(|n| n.to_string()),
        }
    }

    fn text_field_mut<'a>(&self, bike: &'a mut Bicycle) -> Option<&'a mut Option<String>> {
        match self {
            Self::Nickname => Some(&mut bike.nickname),
            Self::Brand => Some(&mut bike.brand),
            Self::Model => Some(&mut bike.model),
            Self::Type => Some(&mut bike.bike_type),
            Self::FrameSize => Some(&mut bike.frame_size),
            Self::FrameColor => Some(&mut bike.frame_color),
            Self::Chainrings => Some(&mut bike.chainrings),
            Self::CassetteRange => Some(&mut bike.cassette_range),
            Self::WheelSize => Some(&mut bike.wheel_size),
            Self::CassetteSprocketCount | Self::StemLength => None,
        }
    }

    fn number_field_mut<'a>(&self, bike: &'a mut Bicycle) -> Option<&'a mut Option<u32>> {
        match self {
            Self::CassetteSprocketCount => Some(&mut bike.cassette_sprocket_count),
            Self::StemLength => Some(&mut bike.stem_length),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the label in any case, with or without spaces, dashes or
/// underscores: "Frame Size", "frame-size", "framesize"
impl FromStr for Attribute {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|attr| normalize(attr.label()) == wanted)
            .ok_or_else(|| ValidationError::UnknownAttribute(s.to_string()))
    }
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Blank input clears a field
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A detached copy of a bicycle under edit
#[derive(Debug, Clone, PartialEq)]
pub struct BicycleDraft {
    bicycle: Bicycle,
    position: Option<usize>,
}

impl Default for BicycleDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl BicycleDraft {
    /// Draft for a new bicycle
    #[must_use]
    pub fn new() -> Self {
        Self {
            bicycle: Bicycle::new(),
            position: None,
        }
    }

    /// Draft of the bicycle at `index`
    pub fn edit<S: CollectionStore>(repo: &Repository<S>, index: usize) -> Result<Self> {
        Ok(Self {
            bicycle: repo.bicycle(index)?.duplicate(),
            position: Some(index),
        })
    }

    /// The bicycle as edited so far
    #[must_use]
    pub fn bicycle(&self) -> &Bicycle {
        &self.bicycle
    }

    /// Position of the original, when editing an existing bicycle
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Set one labelled field; `None` or blank clears it
    ///
    /// Whole-number fields reject anything that is not a non-negative
    /// integer and keep their previous value.
    pub fn update_attribute(&mut self, key: &str, value: Option<&str>) -> Result<(), ValidationError> {
        let attr: Attribute = key.parse()?;
        let value = non_blank(value);

        if attr.is_numeric() {
            let number = value
                .map(|v| {
                    v.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
                        field: attr.label(),
                        value: v.to_string(),
                    })
                })
                .transpose()?;
            if let Some(field) = attr.number_field_mut(&mut self.bicycle) {
                *field = number;
            }
        } else if let Some(field) = attr.text_field_mut(&mut self.bicycle) {
            *field = value.map(str::to_string);
        }
        Ok(())
    }

    /// Replace the serial number
    ///
    /// A blank value removes it. Without a new image the current one is
    /// kept, or the placeholder used.
    pub fn update_serial_number(
        &mut self,
        value: Option<&str>,
        image: Option<ImageRef>,
    ) -> Result<(), ValidationError> {
        let Some(value) = non_blank(value) else {
            if image.as_ref().is_some_and(|i| !i.is_placeholder()) {
                return Err(ValidationError::SerialImageWithoutValue);
            }
            self.bicycle.serial_number = None;
            return Ok(());
        };

        let image = image.or_else(|| {
            self.bicycle
                .serial_number
                .as_ref()
                .map(|serial| serial.image().clone())
        });
        self.bicycle.serial_number = Some(SerialNumber::new(Some(value.to_string()), image)?);
        Ok(())
    }

    /// Replace the purchase details; all absent removes them
    pub fn update_purchase_details(
        &mut self,
        store_name: Option<&str>,
        amount_paid: Option<Amount>,
        date_purchased: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        let details = PurchaseDetails::new(
            non_blank(store_name).map(str::to_string),
            amount_paid,
            date_purchased,
        );
        if let Some(details) = &details {
            details.validate(Utc::now().date_naive())?;
        }
        self.bicycle.set_purchase_details(details);
        Ok(())
    }

    /// Replace the bicycle photo
    pub fn update_image(&mut self, image: Option<ImageRef>) {
        self.bicycle.image = image;
    }

    /// Save the draft, replacing the original or appending a new bicycle
    ///
    /// The original is found again by id, so a draft still lands on the
    /// right entry if the list moved underneath it. If the original has
    /// since been deleted the draft is appended.
    pub fn commit<S: CollectionStore>(self, repo: &mut Repository<S>) -> Result<usize> {
        let selected = self
            .position
            .and_then(|_| repo.position_of_bicycle(self.bicycle.id));
        repo.upsert_bicycle(selected, self.bicycle)
    }
}
