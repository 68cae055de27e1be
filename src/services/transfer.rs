use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::{self, ExportFormat};
use crate::store::{ReportStore, UpsertOutcome};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub replaced: usize,
}

/// Moves whole collections between the data file and exchange files.
pub struct TransferService {
    store: ReportStore,
}

impl TransferService {
    pub fn new<P: AsRef<Path>>(data_path: P) -> Self {
        Self {
            store: ReportStore::new(data_path),
        }
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        let records = self.store.load_all()?;
        match format {
            ExportFormat::Json => export::to_json(&records),
            ExportFormat::Csv => export::to_csv(&records),
        }
    }

    /// Writes to `output`, or stdout when no path is given
    pub fn export(&self, format: ExportFormat, output: Option<&PathBuf>) -> Result<()> {
        let content = self.render(format)?;
        match output {
            Some(path) => {
                fs::write(path, content)
                    .with_context(|| format!("Failed to write export to {}", path.display()))?;
                info!("Exported reports as {} to {}", format.extension(), path.display());
            }
            None => print!("{}", content),
        }
        Ok(())
    }

    /// Merges every record of a JSON export into the data file in one write
    pub fn import(&self, file: &Path) -> Result<ImportSummary> {
        let json = fs::read_to_string(file)
            .with_context(|| format!("Failed to read import file {}", file.display()))?;
        let incoming = export::from_json(&json)
            .with_context(|| format!("Invalid reports in {}", file.display()))?;

        let mut summary = ImportSummary::default();
        for outcome in self.store.upsert_all(incoming)? {
            match outcome {
                UpsertOutcome::Created => summary.created += 1,
                UpsertOutcome::Replaced => summary.replaced += 1,
            }
        }

        info!(
            "Imported {} new and {} replaced reports into {}",
            summary.created,
            summary.replaced,
            self.store.path().display()
        );
        Ok(summary)
    }
}
