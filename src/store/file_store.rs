use chrono::NaiveDate;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::ReportRecord;
use crate::errors::StoreError;

/// Whether an upsert added a new date or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Replaced,
}

/// Flat JSON document holding the whole report collection.
///
/// Every operation reads the full file and writes it back; there is no
/// index and no partial update. A missing file is an empty collection.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load_all(&self) -> Result<Vec<ReportRecord>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No reports file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&json).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the whole document. Writes a sibling temp file and renames it
    /// over the target.
    pub fn save_all(&self, records: &[ReportRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records).map_err(StoreError::Encode)?;
        let temp_path = self.temp_path();

        self.ensure_parent_dir()?;
        fs::write(&temp_path, json).map_err(|source| self.write_error(source))?;
        fs::rename(&temp_path, &self.path).map_err(|source| self.write_error(source))?;

        info!("Saved {} reports to {}", records.len(), self.path.display());
        Ok(())
    }

    pub fn find(&self, date: NaiveDate) -> Result<Option<ReportRecord>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|r| r.date == date))
    }

    /// Insert a record, or overwrite the one with the same date wholesale
    pub fn upsert(&self, record: ReportRecord) -> Result<UpsertOutcome, StoreError> {
        let mut records = self.load_all()?;
        let outcome = merge_record(&mut records, record);

        self.save_all(&records)?;
        Ok(outcome)
    }

    /// Upsert a whole batch with one load and one write. Later records in the
    /// batch win over earlier ones with the same date.
    pub fn upsert_all(&self, incoming: Vec<ReportRecord>) -> Result<Vec<UpsertOutcome>, StoreError> {
        let mut records = self.load_all()?;
        let outcomes = incoming
            .into_iter()
            .map(|record| merge_record(&mut records, record))
            .collect();

        self.save_all(&records)?;
        Ok(outcomes)
    }

    /// Overwrite the record stored under `date`. The replacement may carry a
    /// different date as long as no other record already uses it.
    pub fn update(&self, date: NaiveDate, record: ReportRecord) -> Result<ReportRecord, StoreError> {
        let mut records = self.load_all()?;

        let idx = records
            .iter()
            .position(|r| r.date == date)
            .ok_or(StoreError::NotFound(date))?;

        if record.date != date && records.iter().any(|r| r.date == record.date) {
            return Err(StoreError::DateConflict(record.date));
        }

        records[idx] = record.clone();
        self.save_all(&records)?;
        Ok(record)
    }

    /// Remove the record for `date`; returns whether one existed
    pub fn delete(&self, date: NaiveDate) -> Result<bool, StoreError> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.date != date);

        if records.len() == before {
            debug!("Delete of {} was a no-op", date);
            return Ok(false);
        }

        self.save_all(&records)?;
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|source| self.write_error(source))
            }
            _ => Ok(()),
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

fn merge_record(records: &mut Vec<ReportRecord>, record: ReportRecord) -> UpsertOutcome {
    match records.iter().position(|r| r.date == record.date) {
        Some(idx) => {
            records[idx] = record;
            UpsertOutcome::Replaced
        }
        None => {
            records.push(record);
            UpsertOutcome::Created
        }
    }
}
