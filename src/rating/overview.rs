use serde::Serialize;
use std::collections::HashSet;

use crate::domain::ReportRecord;

/// Whole-collection totals for the dashboard header
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_reports: usize,
    pub days_with_reports: usize,
    pub team_size: usize,
    pub total_ratings: usize,
    pub average_rating: Option<f64>,
}

pub fn overview(records: &[ReportRecord]) -> OverviewStats {
    let days: HashSet<_> = records.iter().map(|r| r.date).collect();
    let members: HashSet<&str> = records.iter().flat_map(|r| r.members.keys()).collect();

    let ratings: Vec<f64> = records
        .iter()
        .flat_map(|r| r.members.values())
        .filter_map(|entry| entry.score())
        .collect();

    let average_rating = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    OverviewStats {
        total_reports: records.len(),
        days_with_reports: days.len(),
        team_size: members.len(),
        total_ratings: ratings.len(),
        average_rating,
    }
}
