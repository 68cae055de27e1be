use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::queries::MemberHistoryEntry;
use crate::domain::ReportRecord;
use crate::rating::{PerformanceLevel, StarSlot};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub report: ReportRecord,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub name: String,
    pub count: usize,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub last_description: Option<String>,
    pub stars: [StarSlot; 5],
    pub progress_percent: f64,
    pub performance_level: Option<PerformanceLevel>,
    pub performance_label: Option<String>,
}

#[derive(Serialize)]
pub struct MembersResponse {
    pub members: Vec<MemberSummary>,
    pub unrated: Vec<String>,
}

#[derive(Serialize)]
pub struct TopPerformer {
    pub rank: usize,
    pub member: String,
    pub average: f64,
    pub stars: [StarSlot; 5],
}

#[derive(Serialize)]
pub struct MemberDetail {
    pub summary: MemberSummary,
    pub history: Vec<MemberHistoryEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub date: NaiveDate,
    pub member_count: usize,
    pub average: Option<f64>,
}

#[derive(Serialize)]
pub struct YearArchive {
    pub year: i32,
    pub reports: Vec<ArchiveEntry>,
}
