use chrono::NaiveDate;

use super::models::{MemberEntry, Members, ReportRecord};

const SAMPLE_TEAM: [&str; 5] = ["نادر", "وليد", "أحمد", "محمد", "لمياء"];

const SAMPLE_DAYS: [(u32, [u8; 5]); 3] = [
    (1, [2, 3, 1, 3, 2]),
    (2, [4, 3, 2, 5, 4]),
    (3, [5, 4, 3, 4, 5]),
];

/// Built-in data set used when neither the API nor a local snapshot is available
pub fn sample_reports() -> Vec<ReportRecord> {
    SAMPLE_DAYS
        .iter()
        .filter_map(|(day, ratings)| {
            let date = NaiveDate::from_ymd_opt(2025, 1, *day)?;
            let members: Members = SAMPLE_TEAM
                .iter()
                .zip(ratings.iter())
                .map(|(name, rating)| (*name, MemberEntry::legacy(*rating)))
                .collect();
            Some(ReportRecord::new(date, members))
        })
        .collect()
}
