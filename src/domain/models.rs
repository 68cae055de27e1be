use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::ordered_map::OrderedMap;
use crate::errors::InvalidDate;
use crate::rating::normalizer;

/// Member name → entry, in the order members appear in the stored document
pub type Members = OrderedMap<MemberEntry>;

/// One day's set of member ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(deserialize_with = "deserialize_report_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub members: Members,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReportRecord {
    pub fn new(date: NaiveDate, members: Members) -> Self {
        Self {
            date,
            members,
            notes: None,
        }
    }

    /// ISO `YYYY-MM-DD` key of this record
    pub fn date_key(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a path or CLI date. Surrounding whitespace is ignored, but the day
/// itself must already be in canonical form (`2025-01-05`, not `2025-1-5`).
pub fn parse_report_date(value: &str) -> Result<NaiveDate, InvalidDate> {
    parse_canonical_date(value.trim())
}

fn parse_canonical_date(value: &str) -> Result<NaiveDate, InvalidDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
        .ok_or_else(|| InvalidDate(value.to_string()))
}

fn deserialize_report_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_canonical_date(&raw).map_err(serde::de::Error::custom)
}

/// A single member's entry as stored.
///
/// Older documents hold a bare number, newer ones an object with a rating and
/// a description. Anything else is kept verbatim so that it survives a
/// save/load cycle, and counts as unrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberEntry {
    Score(Number),
    Detailed(DetailedEntry),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedEntry {
    #[serde(default)]
    pub rating: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-text feedback, either one string or an ordered list of lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Lines(Vec<String>),
    Other(Value),
}

impl Description {
    /// Lines are joined by a single space. Blank text yields `None`.
    pub fn joined(&self) -> Option<String> {
        let text = match self {
            Description::Text(text) => text.trim().to_string(),
            Description::Lines(lines) => lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Description::Other(_) => return None,
        };
        if text.is_empty() { None } else { Some(text) }
    }
}

impl MemberEntry {
    /// Legacy bare-number entry
    pub fn legacy(rating: u8) -> Self {
        MemberEntry::Score(Number::from(rating))
    }

    pub fn rated(rating: f64, description: Option<&str>) -> Self {
        let rating = Number::from_f64(rating).map(Value::Number).unwrap_or(Value::Null);
        MemberEntry::Detailed(DetailedEntry {
            rating,
            description: description.map(|d| Description::Text(d.to_string())),
            extra: Map::new(),
        })
    }

    /// Canonical rating: `None` when the entry is unrated or malformed
    pub fn score(&self) -> Option<f64> {
        normalizer::score(self)
    }

    pub fn description(&self) -> Option<String> {
        match self {
            MemberEntry::Detailed(detailed) => detailed.description.as_ref().and_then(Description::joined),
            _ => None,
        }
    }
}
