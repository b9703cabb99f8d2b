//! A type-safe, reactive library for classifying AI mentions in
//! parliamentary contributions.
//!
//! This library streams mention records out of JSON batch shards, classifies
//! each one with a false-positive filter and keyword scoring, and
//! cross-validates persisted classifications with an independent
//! metadata-based pass plus a rule-driven review of discrepancies.

pub mod classifier;
pub mod config;
pub mod error;
pub mod false_positive;
pub mod hansard;
pub mod lexicon;
pub mod metadata;
pub mod processor;
pub mod report;
pub mod resolver;
pub mod scorer;
pub mod store;
pub mod types;
pub mod verify;

pub use classifier::MentionClassifier;
pub use config::{Config, ConfigBuilder, SortOrder};
pub use error::{Error, Result};
pub use false_positive::FalsePositiveFilter;
pub use lexicon::{KeywordCounts, Lexicon};
pub use metadata::{MetadataAnalyzer, SpeakerRole};
pub use processor::BatchProcessor;
pub use resolver::{recommend, Recommendation, RecommendationAction};
pub use scorer::{ContextScorer, Score};
pub use store::SentimentStore;
pub use types::{ClassificationResult, DiscrepancyRecord, Mention, MentionType, Sentiment};
pub use verify::{reconcile, VerificationResults};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::classifier::MentionClassifier;
    pub use crate::config::{Config, ConfigBuilder, SortOrder};
    pub use crate::error::{Error, Result};
    pub use crate::metadata::MetadataAnalyzer;
    pub use crate::processor::BatchProcessor;
    pub use crate::store::SentimentStore;
    pub use crate::types::{ClassificationResult, Mention, MentionType, Sentiment};
    pub use crate::verify::reconcile;
    pub use futures::StreamExt;
}
