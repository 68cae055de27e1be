use anyhow::{Context, Result};

use crate::domain::{OrderedMap, ReportRecord};
use crate::rating::normalize;

/// Member × date matrix: one row per record, one column per member
/// (first-appearance order). Absent members leave the cell empty.
pub fn to_csv(records: &[ReportRecord]) -> Result<String> {
    let members = collect_members(records);

    let mut writer = csv::Writer::from_writer(Vec::new());
    let header = std::iter::once("date").chain(members.iter().map(String::as_str));
    writer.write_record(header).context("Failed to write CSV header")?;

    for record in records {
        let mut row = vec![record.date_key()];
        row.extend(members.iter().map(|member| {
            record
                .members
                .get(member)
                .map(|entry| normalize(entry).to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&row).context("Failed to write CSV row")?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn collect_members(records: &[ReportRecord]) -> Vec<String> {
    let mut seen: OrderedMap<()> = OrderedMap::new();
    for record in records {
        for member in record.members.keys() {
            seen.insert(member, ());
        }
    }
    seen.into_vec().into_iter().map(|(member, _)| member).collect()
}
