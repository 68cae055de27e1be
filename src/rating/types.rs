use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::OrderedMap;

pub type MemberName = String;

/// Per-member aggregate over all records (derived, never persisted)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub ratings: Vec<f64>,
    pub count: usize,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub last_description: Option<String>,
}

impl MemberStats {
    /// `None` for a member with no valid rating
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    pub fn is_rated(&self) -> bool {
        self.count > 0
    }

    pub(crate) fn record(&mut self, rating: f64) {
        self.ratings.push(rating);
        self.count += 1;
        self.sum += rating;
        self.min = Some(self.min.map_or(rating, |m| m.min(rating)));
        self.max = Some(self.max.map_or(rating, |m| m.max(rating)));
    }
}

/// Member statistics in first-appearance order
pub type MemberStatsMap = OrderedMap<MemberStats>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberScore {
    pub member: MemberName,
    pub rating: f64,
}

/// Summary of a single report record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub date: NaiveDate,
    pub member_count: usize,
    pub rated_count: usize,
    pub average: Option<f64>,
    pub best: Option<MemberScore>,
    pub worst: Option<MemberScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMember {
    pub member: MemberName,
    pub average: f64,
}

/// How equal scores are ordered in leaderboards and best/worst picks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    #[default]
    Alphabetical,
    FirstSeen,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alphabetical" | "alpha" => Ok(TieBreak::Alphabetical),
            "first-seen" | "first_seen" | "insertion" => Ok(TieBreak::FirstSeen),
            other => Err(format!("unknown tie-break rule: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarSlot {
    Full,
    Half,
    Empty,
}

impl StarSlot {
    pub fn symbol(&self) -> &str {
        match self {
            StarSlot::Full => "★",
            StarSlot::Half => "⯪",
            StarSlot::Empty => "☆",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceLevel {
    Outstanding,      // >= 4.5
    Excellent,        // 4.0 - 4.49
    Good,             // 3.0 - 3.99
    Acceptable,       // 2.0 - 2.99
    NeedsImprovement, // < 2.0
}

impl PerformanceLevel {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            PerformanceLevel::Outstanding
        } else if rating >= 4.0 {
            PerformanceLevel::Excellent
        } else if rating >= 3.0 {
            PerformanceLevel::Good
        } else if rating >= 2.0 {
            PerformanceLevel::Acceptable
        } else {
            PerformanceLevel::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PerformanceLevel::Outstanding => "outstanding",
            PerformanceLevel::Excellent => "excellent",
            PerformanceLevel::Good => "good",
            PerformanceLevel::Acceptable => "acceptable",
            PerformanceLevel::NeedsImprovement => "needs-improvement",
        }
    }

    /// Label in the reports' language
    pub fn label(&self) -> &str {
        match self {
            PerformanceLevel::Outstanding => "متميز",
            PerformanceLevel::Excellent => "ممتاز",
            PerformanceLevel::Good => "جيد",
            PerformanceLevel::Acceptable => "مقبول",
            PerformanceLevel::NeedsImprovement => "يحتاج تحسين",
        }
    }
}

/// Coarse colour band for a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingClass {
    Excellent,
    Good,
    Average,
    Poor,
}

impl RatingClass {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            RatingClass::Excellent
        } else if rating >= 3.0 {
            RatingClass::Good
        } else if rating >= 2.0 {
            RatingClass::Average
        } else {
            RatingClass::Poor
        }
    }
}
