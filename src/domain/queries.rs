use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::models::ReportRecord;
use crate::rating::normalizer;

/// Reports of one calendar year, newest first
#[derive(Debug, Clone)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub reports: Vec<&'a ReportRecord>,
}

/// Archive view: years descending, each year's reports newest first
pub fn group_by_year(records: &[ReportRecord]) -> Vec<YearGroup<'_>> {
    let mut years: BTreeMap<i32, Vec<&ReportRecord>> = BTreeMap::new();
    for record in records {
        years.entry(record.date.year()).or_default().push(record);
    }

    years
        .into_iter()
        .rev()
        .map(|(year, mut reports)| {
            sort_newest_first(&mut reports);
            YearGroup { year, reports }
        })
        .collect()
}

pub fn recent_reports(records: &[ReportRecord], limit: usize) -> Vec<&ReportRecord> {
    let mut reports: Vec<&ReportRecord> = records.iter().collect();
    sort_newest_first(&mut reports);
    reports.truncate(limit);
    reports
}

fn sort_newest_first(reports: &mut [&ReportRecord]) {
    reports.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Records whose date, a member name, or a member's rating contains `term`
pub fn search<'a>(records: &'a [ReportRecord], term: &str) -> Vec<&'a ReportRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| record_matches(record, &term))
        .collect()
}

fn record_matches(record: &ReportRecord, term: &str) -> bool {
    if record.date_key().contains(term) {
        return true;
    }
    record.members.iter().any(|(name, entry)| {
        name.to_lowercase().contains(term) || normalizer::normalize(entry).to_string().contains(term)
    })
}

pub fn filter_by_date(records: &[ReportRecord], date: NaiveDate) -> Vec<&ReportRecord> {
    records.iter().filter(|r| r.date == date).collect()
}

/// One dated entry in a member's history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberHistoryEntry {
    pub date: NaiveDate,
    pub rating: Option<f64>,
    pub description: Option<String>,
}

/// Entries of `member` across all records that mention them, newest first
pub fn member_history(records: &[ReportRecord], member: &str) -> Vec<MemberHistoryEntry> {
    let mut history: Vec<MemberHistoryEntry> = records
        .iter()
        .filter_map(|record| {
            record.members.get(member).map(|entry| MemberHistoryEntry {
                date: record.date,
                rating: entry.score(),
                description: entry.description(),
            })
        })
        .collect();

    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}
