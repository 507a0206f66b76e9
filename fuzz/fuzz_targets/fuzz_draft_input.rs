// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use bicycles::draft::BicycleDraft;
use bicycles::types::Amount;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    key: String,
    value: Option<String>,
    serial: Option<String>,
    amount: String,
}

fuzz_target!(|input: Input| {
    let mut draft = BicycleDraft::new();
    let _ = draft.update_attribute(&input.key, input.value.as_deref());
    let _ = draft.update_serial_number(input.serial.as_deref(), None);
    if let Some(serial) = &draft.bicycle().serial_number {
        assert!(!serial.value().trim().is_empty());
    }
    if let Ok(amount) = input.amount.parse::<Amount>() {
        assert_eq!(amount.to_string().parse::<Amount>().ok(), Some(amount));
    }
});
