use serde_json::Value;

use crate::domain::MemberEntry;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Sentinel for "no rating submitted"
pub const UNRATED: f64 = 0.0;

/// Canonical numeric rating of an entry. Never fails: malformed or
/// out-of-scale input becomes [`UNRATED`].
pub fn normalize(entry: &MemberEntry) -> f64 {
    let coerced = match entry {
        MemberEntry::Score(number) => number.as_f64(),
        MemberEntry::Detailed(detailed) => coerce_rating(&detailed.rating),
        MemberEntry::Other(_) => None,
    };
    coerced.map(within_scale).unwrap_or(UNRATED)
}

/// `None` when the entry is unrated
pub fn score(entry: &MemberEntry) -> Option<f64> {
    let rating = normalize(entry);
    (rating > UNRATED).then_some(rating)
}

fn within_scale(rating: f64) -> f64 {
    if rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating) {
        rating
    } else {
        UNRATED
    }
}

fn coerce_rating(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric_text(text),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null => Some(UNRATED),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(UNRATED);
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> MemberEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_bare_number_passes_through() {
        assert_eq!(normalize(&entry(json!(3))), 3.0);
        assert_eq!(normalize(&entry(json!(4.5))), 4.5);
        assert_eq!(normalize(&entry(json!(0))), UNRATED);
    }

    #[test]
    fn test_object_rating_is_coerced() {
        assert_eq!(normalize(&entry(json!({"rating": 4}))), 4.0);
        assert_eq!(normalize(&entry(json!({"rating": " 2.5 "}))), 2.5);
        assert_eq!(normalize(&entry(json!({"rating": true}))), 1.0);
        assert_eq!(normalize(&entry(json!({"description": "no rating field"}))), UNRATED);
    }

    #[test]
    fn test_malformed_input_degrades_to_unrated() {
        let malformed = [
            json!({"rating": "excellent"}),
            json!({"rating": [4]}),
            json!({"rating": {"value": 4}}),
            json!({"rating": 7}),
            json!({"rating": -1}),
            json!({"rating": "NaN"}),
            json!({"rating": "inf"}),
            json!(9),
            json!("4"),
            json!(null),
        ];
        for value in malformed {
            assert_eq!(normalize(&entry(value.clone())), UNRATED, "input: {value}");
        }
    }

    #[test]
    fn test_normalize_stays_on_scale() {
        for raw in [-3.0, 0.0, 0.5, 2.0, 5.0, 5.01, 100.0] {
            let rating = normalize(&entry(json!({ "rating": raw })));
            assert!((MIN_RATING..=MAX_RATING).contains(&rating));
        }
    }

    #[test]
    fn test_score_hides_sentinel() {
        assert_eq!(score(&entry(json!({"rating": 0}))), None);
        assert_eq!(score(&entry(json!({"rating": 5}))), Some(5.0));
    }
}
