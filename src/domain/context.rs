use serde::Serialize;

use super::models::ReportRecord;

/// Where a loaded collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Api,
    Snapshot,
    Sample,
}

/// The full record collection for one render/refresh cycle.
///
/// Owned by the caller and handed to the aggregation functions; a refresh
/// builds a new context instead of patching this one.
#[derive(Debug, Clone)]
pub struct ReportContext {
    records: Vec<ReportRecord>,
    origin: DataOrigin,
}

impl ReportContext {
    pub fn new(records: Vec<ReportRecord>, origin: DataOrigin) -> Self {
        Self { records, origin }
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }
}
