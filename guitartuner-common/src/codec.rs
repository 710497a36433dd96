//! Chord and favorite-flag transcoding
//!
//! Songs travel over the wire with `chords` as an ordered list of chord names
//! and are stored with `chords` as a single comma-delimited string. This module
//! owns both directions of that conversion, plus the normalization of the
//! store-native favorite flag.
//!
//! Chord names must not contain [`CHORD_DELIMITER`]. There is no escaping: a
//! name containing a comma is split apart on decode. Changing this would change
//! the stored format, so it is left as a known limitation.
//!
//! Empty chord names are dropped when a request body is read: an empty element
//! has no unambiguous stored form (`[""]` and `[]` both encode to `""`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Separator between chord names in the stored representation
pub const CHORD_DELIMITER: &str = ",";

/// Join an ordered chord sequence into its stored form
///
/// An empty sequence yields an empty string.
pub fn encode_chords<S: AsRef<str>>(chords: &[S]) -> String {
    chords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(CHORD_DELIMITER)
}

/// Split a stored chord string back into its ordered sequence
///
/// `None` (NULL column) and the empty string both yield an empty sequence.
pub fn decode_chords(encoded: Option<&str>) -> Vec<String> {
    match encoded {
        Some(s) if !s.is_empty() => s.split(CHORD_DELIMITER).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// True when the decoded sequence contains `chord` as a whole element
///
/// "E" is not contained in "Em7,G": matching is on elements, never on
/// substrings of the stored string.
pub fn contains_chord(encoded: Option<&str>, chord: &str) -> bool {
    match encoded {
        Some(s) if !s.is_empty() => s.split(CHORD_DELIMITER).any(|name| name == chord),
        _ => false,
    }
}

// ========================================
// Favorite flag
// ========================================

/// A store-native representation of the favorite flag
///
/// Embedded stores hand back integers (0/1); networked relational stores hand
/// back native booleans. NULL reads as not set.
pub trait StoreFlag {
    fn is_set(&self) -> bool;
}

impl StoreFlag for bool {
    fn is_set(&self) -> bool {
        *self
    }
}

macro_rules! int_store_flag {
    ($($t:ty),*) => {
        $(
            impl StoreFlag for $t {
                fn is_set(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

int_store_flag!(i8, i16, i32, i64, u8, u16, u32, u64);

impl<T: StoreFlag> StoreFlag for Option<T> {
    fn is_set(&self) -> bool {
        self.as_ref().is_some_and(StoreFlag::is_set)
    }
}

/// Convert a store-native favorite flag to a boolean
pub fn normalize_favorite<F: StoreFlag>(value: F) -> bool {
    value.is_set()
}

/// Integer encoding of the favorite flag for stores without a boolean type
pub fn favorite_to_store_int(flag: bool) -> i64 {
    i64::from(flag)
}

// ========================================
// Wire coercion
// ========================================

/// Coerce an arbitrary JSON value into a chord sequence
///
/// Arrays keep their string elements and stringify number/boolean elements;
/// null, nested arrays and objects are dropped. Anything that is not an array
/// yields an empty sequence rather than an error.
pub fn chords_from_json(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerce an arbitrary JSON value into a boolean using JSON truthiness
pub fn flag_from_json(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// serde adapter for permissive `chords` input fields
pub fn deserialize_chords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(chords_from_json(&value))
}

/// serde adapter for permissive `isFavorite` input fields
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flag_from_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_preserves_order() {
        assert_eq!(encode_chords(&["Am", "E7", "G", "D"]), "Am,E7,G,D");
    }

    #[test]
    fn test_empty_sequence_law() {
        let empty: [&str; 0] = [];
        assert_eq!(encode_chords(&empty), "");
        assert!(decode_chords(Some("")).is_empty());
        assert!(decode_chords(None).is_empty());
    }

    #[test]
    fn test_round_trip() {
        let sequences: Vec<Vec<String>> = vec![
            vec!["C".into()],
            vec!["C".into(), "G".into()],
            vec!["E".into(), "G#m".into(), "A".into(), "B".into(), "A".into(), "C#m7".into()],
        ];

        for seq in sequences {
            let encoded = encode_chords(&seq);
            assert_eq!(decode_chords(Some(encoded.as_str())), seq, "round trip of {:?}", seq);
        }

        // Empty names never reach the encoder
        for body in [json!([""]), json!(["C", "", "G"])] {
            let seq = chords_from_json(&body);
            assert!(seq.iter().all(|c| !c.is_empty()));
            let encoded = encode_chords(&seq);
            assert_eq!(decode_chords(Some(encoded.as_str())), seq, "round trip of {}", body);
        }
    }

    #[test]
    fn test_decode_keeps_empty_elements() {
        assert_eq!(decode_chords(Some("C,,G")), vec!["C", "", "G"]);
    }

    #[test]
    fn test_delimiter_inside_name_is_not_escaped() {
        // Known limitation: the comma splits the name apart
        let encoded = encode_chords(&["C,add9"]);
        assert_eq!(decode_chords(Some(encoded.as_str())), vec!["C", "add9"]);
    }

    #[test]
    fn test_contains_chord_exact_element() {
        assert!(!contains_chord(Some("Em7"), "E"));
        assert!(contains_chord(Some("Em7"), "Em7"));
        assert!(contains_chord(Some("Am,E7,G"), "G"));
        assert!(!contains_chord(Some("Am,E7,G"), "Am,E7"));
        assert!(!contains_chord(None, "C"));
        assert!(!contains_chord(Some(""), ""));
    }

    #[test]
    fn test_normalize_favorite() {
        assert!(normalize_favorite(1i64));
        assert!(!normalize_favorite(0i64));
        assert!(normalize_favorite(true));
        assert!(!normalize_favorite(false));
        assert!(normalize_favorite(Some(1i8)));
        assert!(!normalize_favorite(None::<i64>));
        assert_eq!(favorite_to_store_int(true), 1);
        assert_eq!(favorite_to_store_int(false), 0);
    }

    #[test]
    fn test_chords_from_json_permissive() {
        assert_eq!(chords_from_json(&json!(["C", "G"])), vec!["C", "G"]);
        assert_eq!(chords_from_json(&json!(["C", 7, null, {"x": 1}])), vec!["C", "7"]);
        assert_eq!(chords_from_json(&json!(["", "Am", ""])), vec!["Am"]);
        assert!(chords_from_json(&json!("C,G")).is_empty());
        assert!(chords_from_json(&json!(null)).is_empty());
        assert!(chords_from_json(&json!({"chords": ["C"]})).is_empty());
    }

    #[test]
    fn test_flag_from_json_truthiness() {
        assert!(flag_from_json(&json!(true)));
        assert!(flag_from_json(&json!(1)));
        assert!(flag_from_json(&json!("yes")));
        assert!(!flag_from_json(&json!(false)));
        assert!(!flag_from_json(&json!(0)));
        assert!(!flag_from_json(&json!("")));
        assert!(!flag_from_json(&json!(null)));
    }
}
