use anyhow::Result;
use log::{info, warn};

use crate::config::AppConfig;
use crate::domain::{sample_reports, DataOrigin, ReportContext, ReportRecord};
use crate::http::ReportsClient;
use crate::store::ReportStore;

/// Loads the report collection for one refresh cycle.
///
/// Order: reports API, then the last snapshot saved from the API, then the
/// built-in sample set. A failure at any step falls through to the next one;
/// nothing is retried.
pub struct ReportLoader {
    client: ReportsClient,
    snapshot: ReportStore,
}

impl ReportLoader {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: ReportsClient::new(&config.api)?,
            snapshot: ReportStore::new(&config.store.snapshot_path),
        })
    }

    pub async fn load(&self) -> ReportContext {
        match self.client.fetch_reports().await {
            Ok(records) => {
                info!("Loaded {} reports from {}", records.len(), self.client.base_url());
                self.save_snapshot(&records);
                ReportContext::new(records, DataOrigin::Api)
            }
            Err(e) => {
                warn!("Reports API not available, using local data: {:#}", e);
                self.load_fallback()
            }
        }
    }

    fn save_snapshot(&self, records: &[ReportRecord]) {
        if let Err(e) = self.snapshot.save_all(records) {
            warn!("Could not update local snapshot: {:#}", anyhow::Error::from(e));
        }
    }

    fn load_fallback(&self) -> ReportContext {
        if self.snapshot.exists() {
            match self.snapshot.load_all() {
                Ok(records) => {
                    info!("Loaded {} reports from snapshot {}", records.len(), self.snapshot.path().display());
                    return ReportContext::new(records, DataOrigin::Snapshot);
                }
                Err(e) => warn!("Snapshot unusable: {:#}", anyhow::Error::from(e)),
            }
        }

        info!("Using built-in sample reports");
        ReportContext::new(sample_reports(), DataOrigin::Sample)
    }
}
