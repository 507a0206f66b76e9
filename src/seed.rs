// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Sample records used when a collection has never been saved

use crate::types::{
    AcquireMethod, Amount, Bicycle, ImageRef, ItemCategory, PurchaseDetails, SerialNumber, Wish,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date(year, month, day).and_time(NaiveTime::MIN))
}

fn serial(value: &str) -> Option<SerialNumber> {
    SerialNumber::new(Some(value.to_string()), Some(ImageRef::no_image())).ok()
}

/// The two sample bicycles: a Bianchi road bike and a Kona hybrid
#[must_use]
pub fn sample_bicycles() -> Vec<Bicycle> {
    let bianchi = Bicycle {
        image: Some(ImageRef::new("bianchi")),
        nickname: Some("My Precious".into()),
        brand: Some("Bianchi".into()),
        model: Some("Vigorelli 105".into()),
        bike_type: Some("Road".into()),
        frame_size: Some("57 cm".into()),
        frame_color: Some("Celeste".into()),
        chainrings: Some("50-34".into()),
        cassette_range: Some("12-30T".into()),
        cassette_sprocket_count: Some(10),
        wheel_size: Some("700x23C".into()),
        stem_length: Some(90),
        serial_number: serial("WBK733033H"),
        purchase_details: PurchaseDetails::new(
            Some("On The Route Bicycles".into()),
            Some(Amount::from_units(999)),
            Some(date(2015, 12, 5)),
        ),
        ..Bicycle::new()
    };

    let kona = Bicycle {
        image: Some(ImageRef::new("kona")),
        nickname: Some("Beater Bike".into()),
        brand: Some("Kona".into()),
        model: Some("Dew Deluxe".into()),
        bike_type: Some("Hybrid".into()),
        frame_size: Some("56 cm".into()),
        frame_color: Some("Green Metallic".into()),
        chainrings: Some("48-38-28".into()),
        cassette_range: Some("11-32T".into()),
        cassette_sprocket_count: Some(9),
        wheel_size: Some("700x32C".into()),
        stem_length: Some(90),
        serial_number: serial("F1112K1748"),
        purchase_details: PurchaseDetails::new(
            Some("Turin Bicycles".into()),
            Some(Amount::from_units(800)),
            Some(date(2011, 10, 14)),
        ),
        ..Bicycle::new()
    };

    vec![bianchi, kona]
}

/// One wish on the current list
#[must_use]
pub fn sample_current_wishlist() -> Vec<Wish> {
    Wish::with_date_added(
        "Fixed-Gear Bicycle",
        Some("Want to see what it's like".into()),
        ItemCategory::Bicycle,
        midnight(2016, 7, 21),
    )
    .into_iter()
    .collect()
}

/// One acquired wish, stamped as acquired at `now`
#[must_use]
pub fn sample_history_wishlist(now: DateTime<Utc>) -> Vec<Wish> {
    Wish::with_date_added(
        "Shimano SPD-SL Pedals 105 PD-5800",
        Some("Clipless pedals for my road bike".into()),
        ItemCategory::Component,
        midnight(2016, 6, 7),
    )
    .map(|wish| wish.acquired(now, AcquireMethod::Diy))
    .into_iter()
    .collect()
}
