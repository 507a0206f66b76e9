// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Bicycles library - garage and wishlist record store
//!
//! This crate provides the record model for the bicycles you own and the
//! gear you want, the codec that persists them, and the positional list
//! operations a front end drives when adding, editing, deleting, or moving
//! records between the current wishlist and its history.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod collection;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

pub use error::{Error, Result, ValidationError};

/// Core record types: bicycles, their owned details, and wishes
pub mod types {
    use crate::error::{Error, ValidationError};
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::str::FromStr;
    use uuid::Uuid;

    // =========================================================================
    // Shared Value Types
    // =========================================================================

    /// Stable record identifier, generated when a record is created
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RecordId(Uuid);

    impl RecordId {
        /// Generate a fresh identifier
        #[must_use]
        pub fn new() -> Self {
            Self(Uuid::new_v4())
        }

        /// First eight hex digits, for compact display
        #[must_use]
        pub fn short(&self) -> String {
            self.0.simple().to_string()[..8].to_string()
        }
    }

    // Records archived before ids existed pick one up on decode.
    impl Default for RecordId {
        fn default() -> Self {
            Self::new()
        }
    }

    impl fmt::Display for RecordId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// Opaque image reference (asset name or file path), passed through unchanged
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ImageRef(String);

    impl ImageRef {
        /// Name of the placeholder image
        pub const NO_IMAGE: &'static str = "noImage";

        /// Wrap an image name or path
        pub fn new(reference: impl Into<String>) -> Self {
            Self(reference.into())
        }

        /// The "no image" placeholder
        #[must_use]
        pub fn no_image() -> Self {
            Self(Self::NO_IMAGE.to_string())
        }

        /// True for the placeholder
        #[must_use]
        pub fn is_placeholder(&self) -> bool {
            self.0 == Self::NO_IMAGE
        }

        /// Underlying reference
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl Default for ImageRef {
        fn default() -> Self {
            Self::no_image()
        }
    }

    impl fmt::Display for ImageRef {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Currency amount with cent precision
    ///
    /// Parsed from and encoded as a decimal string with two fractional digits
    /// (`"999.00"`). Numeric input on decode is rounded to the nearest cent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct Amount {
        cents: u64,
    }

    impl Amount {
        /// Amount from a count of cents
        #[must_use]
        pub const fn from_cents(cents: u64) -> Self {
            Self { cents }
        }

        /// Amount from whole currency units, saturating at the largest
        /// representable amount
        #[must_use]
        pub const fn from_units(units: u64) -> Self {
            Self {
                cents: units.saturating_mul(100),
            }
        }

        /// Total in cents
        #[must_use]
        pub const fn cents(&self) -> u64 {
            self.cents
        }
    }

    impl FromStr for Amount {
        type Err = ValidationError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let invalid = || ValidationError::InvalidAmount(s.to_string());
            let trimmed = s.trim();
            let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
            let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

            let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
            if (whole.is_empty() && frac.is_empty())
                || !all_digits(whole)
                || !all_digits(frac)
                || frac.len() > 2
            {
                return Err(invalid());
            }

            let whole: u64 = if whole.is_empty() {
                0
            } else {
                whole.parse().map_err(|_| invalid())?
            };
            let frac: u64 = match frac.len() {
                0 => 0,
                1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
                _ => frac.parse().map_err(|_| invalid())?,
            };

            whole
                .checked_mul(100)
                .and_then(|c| c.checked_add(frac))
                .map(Self::from_cents)
                .ok_or_else(invalid)
        }
    }

    impl fmt::Display for Amount {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
        }
    }

    impl Serialize for Amount {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Amount {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct AmountVisitor;

            impl Visitor<'_> for AmountVisitor {
                type Value = Amount;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a non-negative currency amount")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                    v.parse().map_err(E::custom)
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                    v.checked_mul(100)
                        .map(Amount::from_cents)
                        .ok_or_else(|| E::custom("amount too large"))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                    u64::try_from(v)
                        .map_err(|_| E::custom("amount cannot be negative"))
                        .and_then(|v| self.visit_u64(v))
                }

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                    if !v.is_finite() || v < 0.0 || v > (u64::MAX / 100) as f64 {
                        return Err(E::custom("amount out of range"));
                    }
                    Ok(Amount::from_cents((v * 100.0).round() as u64))
                }
            }

            deserializer.deserialize_any(AmountVisitor)
        }
    }

    // =========================================================================
    // Enumerations
    // =========================================================================

    /// How a wishlist item was acquired
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum AcquireMethod {
        /// Bought it
        Purchase,
        /// Received as a gift
        Gift,
        /// Built or fixed up yourself
        #[serde(rename = "DIY")]
        Diy,
        /// Anything else
        Other,
    }

    impl AcquireMethod {
        /// All methods in picker order
        pub const ALL: [Self; 4] = [Self::Purchase, Self::Gift, Self::Diy, Self::Other];

        /// Display label, also the persisted value
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Purchase => "Purchase",
                Self::Gift => "Gift",
                Self::Diy => "DIY",
                Self::Other => "Other",
            }
        }
    }

    impl fmt::Display for AcquireMethod {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label())
        }
    }

    impl FromStr for AcquireMethod {
        type Err = Error;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::ALL
                .into_iter()
                .find(|m| m.label() == s)
                .or_else(|| Self::ALL.into_iter().find(|m| m.label().eq_ignore_ascii_case(s.trim())))
                .ok_or_else(|| Error::InvalidEnumValue {
                    kind: "acquire method",
                    value: s.to_string(),
                })
        }
    }

    /// Wishlist item category
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum ItemCategory {
        /// A whole bicycle
        Bicycle,
        /// A part for a bicycle
        Component,
        /// Apparel
        Clothing,
        /// Footwear
        Shoes,
        /// Anything else
        Other,
    }

    impl ItemCategory {
        /// All categories in picker order
        pub const ALL: [Self; 5] = [
            Self::Bicycle,
            Self::Component,
            Self::Clothing,
            Self::Shoes,
            Self::Other,
        ];

        /// Display label, also the persisted value
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Bicycle => "Bicycle",
                Self::Component => "Component",
                Self::Clothing => "Clothing",
                Self::Shoes => "Shoes",
                Self::Other => "Other",
            }
        }
    }

    impl fmt::Display for ItemCategory {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label())
        }
    }

    impl FromStr for ItemCategory {
        type Err = Error;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::ALL
                .into_iter()
                .find(|c| c.label() == s)
                .or_else(|| Self::ALL.into_iter().find(|c| c.label().eq_ignore_ascii_case(s.trim())))
                .ok_or_else(|| Error::InvalidEnumValue {
                    kind: "item category",
                    value: s.to_string(),
                })
        }
    }

    // =========================================================================
    // Entity Trait
    // =========================================================================

    /// A record that lives in a persisted collection
    pub trait Entity: Clone {
        /// Entity name used in messages
        const KIND: &'static str;

        /// Stable identifier
        fn id(&self) -> RecordId;

        /// Replace the identifier
        fn set_id(&mut self, id: RecordId);
    }

    // =========================================================================
    // Bicycle
    // =========================================================================

    /// Serial number stamped on a frame
    ///
    /// The value is never empty; construction and decoding both reject it.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", try_from = "SerialNumberRecord")]
    pub struct SerialNumber {
        value: String,
        image: ImageRef,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct SerialNumberRecord {
        value: String,
        #[serde(default)]
        image: Option<ImageRef>,
    }

    impl TryFrom<SerialNumberRecord> for SerialNumber {
        type Error = ValidationError;

        fn try_from(record: SerialNumberRecord) -> Result<Self, Self::Error> {
            Self::new(Some(record.value), record.image)
        }
    }

    impl SerialNumber {
        /// Create a serial number; an unset image becomes the placeholder
        pub fn new(value: Option<String>, image: Option<ImageRef>) -> Result<Self, ValidationError> {
            match value {
                Some(value) if !value.trim().is_empty() => Ok(Self {
                    value,
                    image: image.unwrap_or_default(),
                }),
                _ => Err(ValidationError::EmptySerialNumber),
            }
        }

        /// The serial number itself
        #[must_use]
        pub fn value(&self) -> &str {
            &self.value
        }

        /// Photo of the serial number, or the placeholder
        #[must_use]
        pub fn image(&self) -> &ImageRef {
            &self.image
        }
    }

    /// Where, when and for how much a bicycle was bought
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PurchaseDetails {
        /// Date of purchase, never after today
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date_purchased: Option<NaiveDate>,
        /// Price paid
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount_paid: Option<Amount>,
        /// Shop name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub store_name: Option<String>,
    }

    impl PurchaseDetails {
        /// Build purchase details, or `None` when every field is absent or blank
        #[must_use]
        pub fn new(
            store_name: Option<String>,
            amount_paid: Option<Amount>,
            date_purchased: Option<NaiveDate>,
        ) -> Option<Self> {
            let details = Self {
                date_purchased,
                amount_paid,
                store_name: store_name.filter(|s| !s.trim().is_empty()),
            };
            (!details.is_empty()).then_some(details)
        }

        /// True when no field carries data
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.date_purchased.is_none()
                && self.amount_paid.is_none()
                && self.store_name.as_deref().map_or(true, |s| s.trim().is_empty())
        }

        /// Reject a purchase date after `today`
        pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
            match self.date_purchased {
                Some(date) if date > today => Err(ValidationError::FutureDate(date)),
                _ => Ok(()),
            }
        }
    }

    /// A bicycle in the garage; every field is optional
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Bicycle {
        /// Stable identifier
        #[serde(default)]
        pub id: RecordId,
        /// Photo of the bicycle
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub image: Option<ImageRef>,
        /// Owner's name for the bicycle
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub nickname: Option<String>,
        /// Manufacturer
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub brand: Option<String>,
        /// Model name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub model: Option<String>,
        /// Road, hybrid, mountain, ...
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub bike_type: Option<String>,
        /// Frame size, free-form ("57 cm", "54s")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub frame_size: Option<String>,
        /// Frame colour
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub frame_color: Option<String>,
        /// Chainring teeth ("50-34")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub chainrings: Option<String>,
        /// Cassette range ("12-30T")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub cassette_range: Option<String>,
        /// Number of cassette sprockets
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub cassette_sprocket_count: Option<u32>,
        /// Wheel and tyre size ("700x23C")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub wheel_size: Option<String>,
        /// Stem length in millimetres
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub stem_length: Option<u32>,
        /// Frame serial number
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub serial_number: Option<SerialNumber>,
        /// Purchase record
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub purchase_details: Option<PurchaseDetails>,
    }

    impl Bicycle {
        /// Create an empty bicycle with a fresh id
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Deep copy for detached editing; the copy keeps this bicycle's id
        #[must_use]
        pub fn duplicate(&self) -> Self {
            self.clone()
        }

        /// Replace purchase details, dropping them when they carry no data
        pub fn set_purchase_details(&mut self, details: Option<PurchaseDetails>) {
            self.purchase_details = details.filter(|d| !d.is_empty());
        }

        /// Commit-time checks
        pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
            if let Some(details) = &self.purchase_details {
                details.validate(today)?;
            }
            Ok(())
        }

        /// Nickname, or "Bicycle #n" for the 0-based `position`
        #[must_use]
        pub fn display_name(&self, position: usize) -> String {
            self.nickname
                .clone()
                .unwrap_or_else(|| format!("Bicycle #{}", position + 1))
        }
    }

    impl Entity for Bicycle {
        const KIND: &'static str = "bicycle";

        fn id(&self) -> RecordId {
            self.id
        }

        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }
    }

    // =========================================================================
    // Wish
    // =========================================================================

    /// An item on the wishlist
    ///
    /// `date_acquired` and `acquire_method` are only set once the wish has
    /// moved to the history list.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", try_from = "WishRecord")]
    pub struct Wish {
        id: RecordId,
        item_title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        item_description: Option<String>,
        category: ItemCategory,
        date_added: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        date_acquired: Option<DateTime<Utc>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        acquire_method: Option<AcquireMethod>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct WishRecord {
        #[serde(default)]
        id: RecordId,
        item_title: String,
        #[serde(default)]
        item_description: Option<String>,
        category: ItemCategory,
        date_added: DateTime<Utc>,
        #[serde(default)]
        date_acquired: Option<DateTime<Utc>>,
        #[serde(default)]
        acquire_method: Option<AcquireMethod>,
    }

    impl TryFrom<WishRecord> for Wish {
        type Error = ValidationError;

        fn try_from(record: WishRecord) -> Result<Self, Self::Error> {
            let mut wish = Self::with_date_added(
                record.item_title,
                record.item_description,
                record.category,
                record.date_added,
            )?;
            wish.id = record.id;
            wish.date_acquired = record.date_acquired;
            wish.acquire_method = record.acquire_method;
            Ok(wish)
        }
    }

    impl Wish {
        /// Create a wish added now
        pub fn new(
            item_title: impl Into<String>,
            item_description: Option<String>,
            category: ItemCategory,
        ) -> Result<Self, ValidationError> {
            Self::with_date_added(item_title, item_description, category, Utc::now())
        }

        /// Create a wish with an explicit added timestamp
        pub fn with_date_added(
            item_title: impl Into<String>,
            item_description: Option<String>,
            category: ItemCategory,
            date_added: DateTime<Utc>,
        ) -> Result<Self, ValidationError> {
            let item_title = item_title.into();
            if item_title.trim().is_empty() {
                return Err(ValidationError::EmptyItemTitle);
            }
            Ok(Self {
                id: RecordId::new(),
                item_title,
                item_description: item_description.filter(|d| !d.trim().is_empty()),
                category,
                date_added,
                date_acquired: None,
                acquire_method: None,
            })
        }

        /// Stamp acquisition details; used when moving to history
        #[must_use]
        pub fn acquired(mut self, date_acquired: DateTime<Utc>, method: AcquireMethod) -> Self {
            self.date_acquired = Some(date_acquired);
            self.acquire_method = Some(method);
            self
        }

        /// Item title, never empty
        #[must_use]
        pub fn item_title(&self) -> &str {
            &self.item_title
        }

        /// Replace the title
        pub fn set_item_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
            let title = title.into();
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyItemTitle);
            }
            self.item_title = title;
            Ok(())
        }

        /// Free-form notes
        #[must_use]
        pub fn item_description(&self) -> Option<&str> {
            self.item_description.as_deref()
        }

        /// Replace the notes; blank clears them
        pub fn set_item_description(&mut self, description: Option<String>) {
            self.item_description = description.filter(|d| !d.trim().is_empty());
        }

        /// Category
        #[must_use]
        pub fn category(&self) -> ItemCategory {
            self.category
        }

        /// Replace the category
        pub fn set_category(&mut self, category: ItemCategory) {
            self.category = category;
        }

        /// When the wish was created
        #[must_use]
        pub fn date_added(&self) -> DateTime<Utc> {
            self.date_added
        }

        /// When the item was acquired, once in history
        #[must_use]
        pub fn date_acquired(&self) -> Option<DateTime<Utc>> {
            self.date_acquired
        }

        /// How the item was acquired, once in history
        #[must_use]
        pub fn acquire_method(&self) -> Option<AcquireMethod> {
            self.acquire_method
        }

        /// True when both acquisition fields are set
        #[must_use]
        pub fn is_acquired(&self) -> bool {
            self.date_acquired.is_some() && self.acquire_method.is_some()
        }
    }

    impl Entity for Wish {
        const KIND: &'static str = "wish";

        fn id(&self) -> RecordId {
            self.id
        }

        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_serial_number_requires_value() {
            assert_eq!(
                SerialNumber::new(None, None),
                Err(ValidationError::EmptySerialNumber)
            );
            assert_eq!(
                SerialNumber::new(Some(String::new()), Some(ImageRef::new("photo.jpg"))),
                Err(ValidationError::EmptySerialNumber)
            );
            assert_eq!(
                SerialNumber::new(Some("   ".into()), None),
                Err(ValidationError::EmptySerialNumber)
            );
        }

        #[test]
        fn test_serial_number_defaults_to_placeholder_image() {
            let serial = SerialNumber::new(Some("WBK733033H".into()), None).unwrap();
            assert_eq!(serial.value(), "WBK733033H");
            assert!(serial.image().is_placeholder());
        }

        #[test]
        fn test_amount_parsing() {
            assert_eq!("999".parse::<Amount>().unwrap().cents(), 99_900);
            assert_eq!("999.5".parse::<Amount>().unwrap().cents(), 99_950);
            assert_eq!("$12.34".parse::<Amount>().unwrap().cents(), 1234);
            assert_eq!(".75".parse::<Amount>().unwrap().cents(), 75);
            assert!("12.345".parse::<Amount>().is_err());
            assert!("-3".parse::<Amount>().is_err());
            assert!("1,000".parse::<Amount>().is_err());
            assert!("abc".parse::<Amount>().is_err());
            assert!(".".parse::<Amount>().is_err());
        }

        #[test]
        fn test_amount_display() {
            assert_eq!(Amount::from_units(800).to_string(), "800.00");
            assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        }

        #[test]
        fn test_amount_from_units_saturates() {
            assert_eq!(Amount::from_units(u64::MAX), Amount::from_cents(u64::MAX));
            assert_eq!(Amount::from_units(u64::MAX / 100).cents(), u64::MAX / 100 * 100);
        }

        #[test]
        fn test_amount_decodes_numbers_rounded_to_cents() {
            let amount: Amount = serde_json::from_str("999.004").unwrap();
            assert_eq!(amount.cents(), 99_900);
            let amount: Amount = serde_json::from_str("12").unwrap();
            assert_eq!(amount.cents(), 1200);
            assert!(serde_json::from_str::<Amount>("-1").is_err());
        }

        #[test]
        fn test_enum_order_is_stable() {
            let methods: Vec<_> = AcquireMethod::ALL.iter().map(AcquireMethod::label).collect();
            assert_eq!(methods, ["Purchase", "Gift", "DIY", "Other"]);

            let categories: Vec<_> = ItemCategory::ALL.iter().map(ItemCategory::label).collect();
            assert_eq!(categories, ["Bicycle", "Component", "Clothing", "Shoes", "Other"]);
        }

        #[test]
        fn test_enum_label_round_trip() {
            for method in AcquireMethod::ALL {
                assert_eq!(method.label().parse::<AcquireMethod>().unwrap(), method);
            }
            for category in ItemCategory::ALL {
                assert_eq!(category.to_string().parse::<ItemCategory>().unwrap(), category);
            }
            assert_eq!("diy".parse::<AcquireMethod>().unwrap(), AcquireMethod::Diy);
        }

        #[test]
        fn test_enum_rejects_unknown_label() {
            let err = "Stolen".parse::<AcquireMethod>().unwrap_err();
            assert!(matches!(err, Error::InvalidEnumValue { kind: "acquire method", .. }));
            assert!("Helmet".parse::<ItemCategory>().is_err());
        }

        #[test]
        fn test_purchase_details_all_empty_is_none() {
            assert!(PurchaseDetails::new(None, None, None).is_none());
            assert!(PurchaseDetails::new(Some("  ".into()), None, None).is_none());
            assert!(PurchaseDetails::new(Some("Turin Bicycles".into()), None, None).is_some());
        }

        #[test]
        fn test_set_purchase_details_drops_empty_shell() {
            let mut bike = Bicycle::new();
            bike.set_purchase_details(Some(PurchaseDetails::default()));
            assert!(bike.purchase_details.is_none());
        }

        #[test]
        fn test_future_purchase_date_rejected() {
            let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let details = PurchaseDetails::new(None, None, NaiveDate::from_ymd_opt(2020, 1, 2)).unwrap();
            assert!(matches!(details.validate(today), Err(ValidationError::FutureDate(_))));

            let details = PurchaseDetails::new(None, None, Some(today)).unwrap();
            assert!(details.validate(today).is_ok());
        }

        #[test]
        fn test_duplicate_is_deep() {
            let mut original = Bicycle::new();
            original.serial_number = Some(SerialNumber::new(Some("A1".into()), None).unwrap());
            let mut copy = original.duplicate();
            copy.serial_number = Some(SerialNumber::new(Some("B2".into()), None).unwrap());

            assert_eq!(original.serial_number.as_ref().unwrap().value(), "A1");
            assert_eq!(copy.id, original.id);
        }

        #[test]
        fn test_display_name_falls_back_to_position() {
            let bike = Bicycle::new();
            assert_eq!(bike.display_name(2), "Bicycle #3");
        }

        #[test]
        fn test_wish_requires_title() {
            assert_eq!(
                Wish::new("", None, ItemCategory::Other).unwrap_err(),
                ValidationError::EmptyItemTitle
            );
            let wish = Wish::new("Bell", Some(String::new()), ItemCategory::Component).unwrap();
            assert_eq!(wish.item_description(), None);
            assert!(!wish.is_acquired());
        }

        #[test]
        fn test_wish_acquired_sets_both_fields() {
            let now = Utc::now();
            let wish = Wish::new("Bell", None, ItemCategory::Component)
                .unwrap()
                .acquired(now, AcquireMethod::Gift);
            assert_eq!(wish.date_acquired(), Some(now));
            assert_eq!(wish.acquire_method(), Some(AcquireMethod::Gift));
            assert!(wish.is_acquired());
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{Error, Result, ValidationError};
    pub use crate::repository::{Repository, WishList};
    pub use crate::types::*;
}
