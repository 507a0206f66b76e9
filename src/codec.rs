// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! JSON codec for records and record collections
//!
//! Records are keyed by field name, so fields added later decode as absent
//! from older data and unknown fields are ignored. A collection is written
//! as a versioned envelope:
//!
//! ```json
//! { "version": 1, "items": [ ... ] }
//! ```
//!
//! A bare JSON array is accepted on decode as well.

use crate::error::{Error, Result};
use crate::types::Entity;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Collection envelope version written by this crate
pub const FORMAT_VERSION: u64 = 1;

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u64,
    items: &'a [T],
}

/// Encode a single record
pub fn encode<T: Entity + Serialize>(entity: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(entity).map_err(|e| Error::Encode {
        collection: T::KIND.to_string(),
        message: e.to_string(),
    })
}

/// Decode a single record
pub fn decode<T: Entity + DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| Error::decode(T::KIND, e))
}

/// Encode an ordered collection as one unit
pub fn encode_collection<T: Entity + Serialize>(items: &[T]) -> Result<Vec<u8>> {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        items,
    };
    serde_json::to_vec_pretty(&envelope).map_err(|e| Error::Encode {
        collection: T::KIND.to_string(),
        message: e.to_string(),
    })
}

/// Decode an ordered collection, preserving order
pub fn decode_collection<T: Entity + DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| Error::decode(T::KIND, e))?;

    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| Error::decode(T::KIND, "missing envelope version"))?;
            if version != FORMAT_VERSION {
                return Err(Error::decode(
                    T::KIND,
                    format!("unsupported format version {version}"),
                ));
            }
            map.remove("items")
                .ok_or_else(|| Error::decode(T::KIND, "missing envelope items"))?
        }
        other => {
            return Err(Error::decode(
                T::KIND,
                format!("expected a list of records, found {}", kind_of(&other)),
            ))
        }
    };

    serde_json::from_value(items).map_err(|e| Error::decode(T::KIND, e))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, Bicycle, ImageRef, ItemCategory, PurchaseDetails, SerialNumber, Wish};
    use chrono::NaiveDate;

    fn full_bicycle() -> Bicycle {
        let mut bike = Bicycle::new();
        bike.image = Some(ImageRef::new("bianchi"));
        bike.nickname = Some("My Precious".into());
        bike.brand = Some("Bianchi".into());
        bike.bike_type = Some("Road".into());
        bike.cassette_sprocket_count = Some(10);
        bike.stem_length = Some(90);
        bike.serial_number = Some(SerialNumber::new(Some("WBK733033H".into()), None).unwrap());
        bike.purchase_details = PurchaseDetails::new(
            Some("On The Route Bicycles".into()),
            Some(Amount::from_units(999)),
            NaiveDate::from_ymd_opt(2015, 12, 5),
        );
        bike
    }

    #[test]
    fn test_bicycle_round_trip() {
        let bike = full_bicycle();
        let decoded: Bicycle = decode(&encode(&bike).unwrap()).unwrap();
        assert_eq!(decoded, bike);
    }

    #[test]
    fn test_absent_fields_are_omitted_and_restored_as_absent() {
        let bike = Bicycle::new();
        let json = String::from_utf8(encode(&bike).unwrap()).unwrap();
        assert!(!json.contains("nickname"));
        assert!(!json.contains("serialNumber"));

        let decoded: Bicycle = decode(json.as_bytes()).unwrap();
        assert_eq!(decoded.nickname, None);
        assert_eq!(decoded.purchase_details, None);
    }

    #[test]
    fn test_uses_camel_case_field_names() {
        let json = String::from_utf8(encode(&full_bicycle()).unwrap()).unwrap();
        assert!(json.contains("\"cassetteSprocketCount\": 10"));
        assert!(json.contains("\"type\": \"Road\""));
        assert!(json.contains("\"amountPaid\": \"999.00\""));
        assert!(json.contains("\"datePurchased\": \"2015-12-05\""));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = br#"{"brand": "Kona", "saddle": "Brooks B17"}"#;
        let bike: Bicycle = decode(json).unwrap();
        assert_eq!(bike.brand.as_deref(), Some("Kona"));
    }

    #[test]
    fn test_legacy_record_without_id_gets_one() {
        let a: Bicycle = decode(br#"{"brand": "Kona"}"#).unwrap();
        let b: Bicycle = decode(br#"{"brand": "Kona"}"#).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_missing_serial_value_is_decode_error() {
        let json = br#"{"serialNumber": {"image": "noImage"}}"#;
        let err = decode::<Bicycle>(json).unwrap_err();
        assert!(err.is_decode());

        let json = br#"{"serialNumber": {"value": ""}}"#;
        assert!(decode::<Bicycle>(json).unwrap_err().is_decode());
    }

    #[test]
    fn test_wish_required_fields() {
        let ok = br#"{"itemTitle": "Bell", "category": "Component", "dateAdded": "2016-07-21T00:00:00Z"}"#;
        let wish: Wish = decode(ok).unwrap();
        assert_eq!(wish.category(), ItemCategory::Component);
        assert_eq!(wish.item_description(), None);

        let no_title = br#"{"category": "Component", "dateAdded": "2016-07-21T00:00:00Z"}"#;
        assert!(decode::<Wish>(no_title).unwrap_err().is_decode());

        let empty_title = br#"{"itemTitle": "", "category": "Component", "dateAdded": "2016-07-21T00:00:00Z"}"#;
        assert!(decode::<Wish>(empty_title).unwrap_err().is_decode());

        let bad_category = br#"{"itemTitle": "Bell", "category": "Helmet", "dateAdded": "2016-07-21T00:00:00Z"}"#;
        assert!(decode::<Wish>(bad_category).unwrap_err().is_decode());
    }

    #[test]
    fn test_collection_preserves_order() {
        let bikes: Vec<Bicycle> = ["a", "b", "c"]
            .iter()
            .map(|name| Bicycle {
                nickname: Some((*name).to_string()),
                ..Bicycle::new()
            })
            .collect();

        let decoded: Vec<Bicycle> = decode_collection(&encode_collection(&bikes).unwrap()).unwrap();
        assert_eq!(decoded, bikes);
    }

    #[test]
    fn test_bare_array_accepted() {
        let decoded: Vec<Bicycle> = decode_collection(br#"[{"brand": "Kona"}, {}]"#).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].brand.as_deref(), Some("Kona"));
    }

    #[test]
    fn test_collection_rejects_bad_envelopes() {
        assert!(decode_collection::<Bicycle>(br#"{"version": 99, "items": []}"#).is_err());
        assert!(decode_collection::<Bicycle>(br#"{"items": []}"#).is_err());
        assert!(decode_collection::<Bicycle>(br#""bicycles""#).is_err());
        assert!(decode_collection::<Bicycle>(b"{\"version\": 1, \"items\": [").is_err());
    }
}
