// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use bicycles::codec;
use bicycles::types::{Bicycle, Wish};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Whatever decodes must encode and decode back to the same records
    if let Ok(bikes) = codec::decode_collection::<Bicycle>(data) {
        let bytes = codec::encode_collection(&bikes).unwrap();
        assert_eq!(codec::decode_collection::<Bicycle>(&bytes).unwrap(), bikes);
    }
    if let Ok(wishes) = codec::decode_collection::<Wish>(data) {
        let bytes = codec::encode_collection(&wishes).unwrap();
        assert_eq!(codec::decode_collection::<Wish>(&bytes).unwrap(), wishes);
    }
});
