pub mod context;
pub mod models;
pub mod ordered_map;
pub mod queries;
pub mod sample;

pub use context::{DataOrigin, ReportContext};
pub use models::*;
pub use ordered_map::OrderedMap;
pub use sample::sample_reports;
