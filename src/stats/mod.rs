pub mod aggregate;
pub mod language;
pub mod usage;

pub use aggregate::{collect_commits, Aggregation};
pub use language::{Classifier, LanguageBreakdown};
pub use usage::estimate_usage;
