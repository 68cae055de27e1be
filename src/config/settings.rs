use log::warn;
use std::path::PathBuf;

use crate::rating::keywords::DEFAULT_STOPWORDS;
use crate::rating::TieBreak;

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub data_path: PathBuf,
    pub snapshot_path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/reports.json"),
            snapshot_path: PathBuf::from("cache/reports.json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: &'static str,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            user_agent: "TeamReports/0.1",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub top_performers: usize,
    pub leaderboard_size: usize,
    pub keyword_limit: usize,
    pub recent_reports: usize,
    pub stopwords: Vec<String>,
    pub tie_break: TieBreak,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_performers: 3,
            leaderboard_size: 5,
            keyword_limit: 10,
            recent_reports: 5,
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            tie_break: TieBreak::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub api: ApiSettings,
    pub analysis: AnalysisSettings,
}

impl AppConfig {
    /// Defaults overridden by the process environment
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("REPORTS_PATH") {
            config.store.data_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SNAPSHOT_PATH") {
            config.store.snapshot_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("REPORTS_API_URL") {
            config.set_api_url(&url);
        }
        if let Some(raw) = lookup("REPORTS_API_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => config.api.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid REPORTS_API_TIMEOUT_SECS: {}", raw),
            }
        }
        if let Some(raw) = lookup("RANKING_TIE_BREAK") {
            match raw.parse() {
                Ok(rule) => config.analysis.tie_break = rule,
                Err(e) => warn!("Ignoring RANKING_TIE_BREAK: {}", e),
            }
        }

        config
    }

    /// CLI `--api-url`
    pub fn set_api_url(&mut self, url: &str) {
        self.api.base_url = url.trim_end_matches('/').to_string();
    }

    /// CLI `--top`: medal places, with the leaderboard widened to show them all
    pub fn set_top_performers(&mut self, top: usize) {
        self.analysis.top_performers = top;
        self.analysis.leaderboard_size = self.analysis.leaderboard_size.max(top);
    }
}
