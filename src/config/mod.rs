pub mod settings;

pub use settings::{AnalysisSettings, ApiSettings, AppConfig, StoreSettings};
