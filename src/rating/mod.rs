pub mod aggregator;
pub mod keywords;
pub mod normalizer;
pub mod overview;
pub mod ranker;
pub mod types;

pub use aggregator::{aggregate, aggregate_report};
pub use keywords::{top_keywords, KeywordCount, KeywordCounts, KeywordExtractor};
pub use normalizer::{normalize, score};
pub use overview::{overview, OverviewStats};
pub use ranker::{progress_percent, rank, star_representation, stars_text, unrated_members};
pub use types::{
    MemberScore, MemberStats, MemberStatsMap, PerformanceLevel, RankedMember, RatingClass, ReportStats, StarSlot,
    TieBreak,
};
