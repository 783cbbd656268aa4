//! Value codec: the single seam where typed values cross into and out of
//! their uniform string storage form.
//!
//! Every stored custom field value is a string or null, regardless of the
//! logical type. The codec is total in both directions: encoding an empty
//! value yields `None`, and decoding malformed input yields `None` instead
//! of an error. Constraint checks (number min/max, required) are a UI
//! concern and never happen here.

use chrono::{NaiveDate, NaiveDateTime};

use super::registry::FieldType;

/// A typed in-memory custom field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Selection(String),
    Selections(Vec<String>),
}

/// Minute-precision storage format for `datetime` values, before the
/// `:00Z` suffix is appended.
const DATETIME_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Storage format for `date` values.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Encode a typed value into its storage string.
///
/// Returns `None` for empty values: the empty string, an empty selection
/// set, or a blank selection. `boolean` always encodes (`"true"` for a true
/// boolean, `"false"` for everything else).
pub fn encode(field_type: FieldType, value: &FieldValue) -> Option<String> {
    let encoded = match (field_type, value) {
        (FieldType::Boolean, v) => {
            let truthy = matches!(v, FieldValue::Bool(true));
            if truthy { "true" } else { "false" }.to_string()
        }
        (FieldType::Number, FieldValue::Number(n)) => n.to_string(),
        (FieldType::Date, FieldValue::Date(d)) => d.format(DATE_FORMAT).to_string(),
        (FieldType::DateTime, FieldValue::DateTime(dt)) => {
            // Seconds are dropped and the "Z" is a storage convention, not
            // a true UTC marker.
            format!("{}:00Z", dt.format(DATETIME_MINUTE_FORMAT))
        }
        (FieldType::MultiSelect, FieldValue::Selections(values)) => {
            // Comma-joined with no escaping. Option values containing a
            // comma corrupt the round-trip; definition creation guards
            // against that, the codec stays permissive.
            values.join(",")
        }
        (FieldType::Select, FieldValue::Selection(v)) => v.clone(),
        // Text family, plus any type/value mismatch: store the raw string
        // form of whatever we were given.
        (_, v) => raw_string(v),
    };

    if encoded.is_empty() {
        None
    } else {
        Some(encoded)
    }
}

/// Decode a stored string into a typed value.
///
/// `boolean` is total over null: anything other than `"true"` or the legacy
/// `"1"` decodes to false. For all other types, null decodes to `None`, and
/// unparseable input decodes to `None` rather than an error.
pub fn decode(field_type: FieldType, stored: Option<&str>) -> Option<FieldValue> {
    match field_type {
        FieldType::Boolean => Some(FieldValue::Bool(decode_bool(stored))),
        FieldType::Number => stored?.parse::<f64>().ok().map(FieldValue::Number),
        FieldType::Date => {
            let raw = stored?;
            // Strip any time component: split on 'T', take position 0.
            let date_part = raw.split('T').next().unwrap_or(raw);
            NaiveDate::parse_from_str(date_part, DATE_FORMAT)
                .ok()
                .map(FieldValue::Date)
        }
        FieldType::DateTime => {
            let raw = stored?;
            let trimmed = raw.strip_suffix('Z').unwrap_or(raw);
            // Keep minute precision only: the first 16 characters.
            let minute_part = trimmed.get(..16).unwrap_or(trimmed);
            NaiveDateTime::parse_from_str(minute_part, DATETIME_MINUTE_FORMAT)
                .ok()
                .map(FieldValue::DateTime)
        }
        FieldType::Select => Some(FieldValue::Selection(stored?.to_string())),
        FieldType::MultiSelect => Some(FieldValue::Selections(
            stored?.split(',').map(str::to_string).collect(),
        )),
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Url
        | FieldType::Email
        | FieldType::Phone => Some(FieldValue::Text(stored?.to_string())),
    }
}

/// Decode a stored boolean, treating the legacy literal `"1"` as true.
pub fn decode_bool(stored: Option<&str>) -> bool {
    matches!(stored, Some("true") | Some("1"))
}

fn raw_string(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) | FieldValue::Selection(s) => s.clone(),
        FieldValue::Selections(values) => values.join(","),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        FieldValue::DateTime(dt) => format!("{}:00Z", dt.format(DATETIME_MINUTE_FORMAT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn roundtrip(field_type: FieldType, value: FieldValue) {
        let encoded = encode(field_type, &value);
        let decoded = decode(field_type, encoded.as_deref());
        assert_eq!(decoded, Some(value), "round-trip failed for {field_type}");
    }

    #[test]
    fn text_family_round_trips() {
        roundtrip(FieldType::Text, FieldValue::Text("hello".into()));
        roundtrip(FieldType::Textarea, FieldValue::Text("line1\nline2".into()));
        roundtrip(FieldType::Url, FieldValue::Text("https://example.com".into()));
        roundtrip(FieldType::Email, FieldValue::Text("admin@example.com".into()));
        roundtrip(FieldType::Phone, FieldValue::Text("+1 555 0100".into()));
    }

    #[test]
    fn empty_text_encodes_to_null() {
        assert_eq!(encode(FieldType::Text, &FieldValue::Text(String::new())), None);
        assert_eq!(decode(FieldType::Text, None), None);
    }

    #[test]
    fn number_round_trips_without_clamping() {
        roundtrip(FieldType::Number, FieldValue::Number(42.0));
        roundtrip(FieldType::Number, FieldValue::Number(-3.25));
        // Out-of-range relative to any min/max passes through verbatim.
        assert_eq!(
            encode(FieldType::Number, &FieldValue::Number(99999.0)),
            Some("99999".to_string())
        );
    }

    #[test]
    fn number_garbage_decodes_to_none() {
        assert_eq!(decode(FieldType::Number, Some("not a number")), None);
    }

    #[test]
    fn date_round_trips_and_strips_time_component() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        roundtrip(FieldType::Date, FieldValue::Date(date));

        assert_eq!(
            decode(FieldType::Date, Some("2024-03-01T10:15:42Z")),
            Some(FieldValue::Date(date))
        );
    }

    #[test]
    fn datetime_truncates_seconds_and_is_idempotent() {
        let decoded = decode(FieldType::DateTime, Some("2024-03-01T10:15:42Z")).unwrap();
        let reencoded = encode(FieldType::DateTime, &decoded).unwrap();
        assert_eq!(reencoded, "2024-03-01T10:15:00Z");

        // Second pass is a fixed point.
        let decoded_again = decode(FieldType::DateTime, Some(&reencoded)).unwrap();
        assert_eq!(encode(FieldType::DateTime, &decoded_again).unwrap(), reencoded);
    }

    #[test]
    fn datetime_round_trips_at_minute_precision() {
        let dt = NaiveDateTime::parse_from_str("2025-11-30T23:59", "%Y-%m-%dT%H:%M").unwrap();
        roundtrip(FieldType::DateTime, FieldValue::DateTime(dt));
    }

    #[test]
    fn boolean_encodes_true_else_false() {
        assert_eq!(
            encode(FieldType::Boolean, &FieldValue::Bool(true)),
            Some("true".to_string())
        );
        assert_eq!(
            encode(FieldType::Boolean, &FieldValue::Bool(false)),
            Some("false".to_string())
        );
        // A mismatched value still encodes as false.
        assert_eq!(
            encode(FieldType::Boolean, &FieldValue::Text("yes".into())),
            Some("false".to_string())
        );
    }

    #[test]
    fn boolean_legacy_decode() {
        assert_eq!(decode(FieldType::Boolean, Some("1")), Some(FieldValue::Bool(true)));
        assert_eq!(decode(FieldType::Boolean, Some("true")), Some(FieldValue::Bool(true)));
        assert_eq!(decode(FieldType::Boolean, Some("false")), Some(FieldValue::Bool(false)));
        assert_eq!(decode(FieldType::Boolean, Some("TRUE")), Some(FieldValue::Bool(false)));
        assert_eq!(decode(FieldType::Boolean, None), Some(FieldValue::Bool(false)));
        assert!(decode_bool(Some("1")));
        assert!(!decode_bool(None));
    }

    #[test]
    fn select_round_trips() {
        roundtrip(FieldType::Select, FieldValue::Selection("critical".into()));
    }

    #[test]
    fn multiselect_round_trips_preserving_order() {
        roundtrip(
            FieldType::MultiSelect,
            FieldValue::Selections(vec!["b".into(), "a".into(), "c".into()]),
        );
        assert_eq!(
            encode(
                FieldType::MultiSelect,
                &FieldValue::Selections(vec!["z".into()])
            ),
            Some("z".to_string())
        );
        assert_eq!(
            encode(FieldType::MultiSelect, &FieldValue::Selections(vec![])),
            None
        );
    }

    // Known limitation, preserved for storage compatibility: option values
    // containing commas do not survive the naive split.
    #[test]
    fn multiselect_comma_in_value_corrupts_round_trip() {
        let original = FieldValue::Selections(vec!["a,b".into(), "c".into()]);
        let encoded = encode(FieldType::MultiSelect, &original).unwrap();
        assert_eq!(encoded, "a,b,c");
        let decoded = decode(FieldType::MultiSelect, Some(&encoded));
        assert_eq!(
            decoded,
            Some(FieldValue::Selections(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn unknown_type_gets_text_behavior() {
        // Unknown tags parse to Text, so the codec treats them as identity
        // strings end to end.
        let ft = FieldType::parse("something_new");
        assert_eq!(
            decode(ft, Some("payload")),
            Some(FieldValue::Text("payload".into()))
        );
    }
}
