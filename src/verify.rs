use crate::metadata::MetadataAnalyzer;
use crate::store::SentimentStore;
use crate::types::{DiscrepancyRecord, Sentiment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Corpus-level counters over one verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_analyses: usize,
    pub agreements: usize,
    pub disagreements: usize,
    pub agreement_rate: f64,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
}

/// Label distribution for the existing and the independent pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub existing: BTreeMap<Sentiment, usize>,
    pub independent: BTreeMap<Sentiment, usize>,
}

/// Full output of a verification run, persisted as JSON for the review stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResults {
    pub summary: VerificationSummary,
    pub sentiment_distribution: SentimentDistribution,
    pub detailed_analyses: Vec<DiscrepancyRecord>,
    pub discrepancies: Vec<DiscrepancyRecord>,
}

/// Run the metadata-based independent pass over every store entry and compare
/// it against the existing labels.
///
/// Each entry is handled independently; output order follows store order.
pub fn reconcile(store: &SentimentStore, analyzer: &MetadataAnalyzer) -> VerificationResults {
    let mut detailed = Vec::with_capacity(store.len());
    let mut distribution = SentimentDistribution::default();

    for label in store.labels() {
        let score = analyzer.classify(&label.speaker, &label.reasoning);
        let agreement = label.sentiment == score.sentiment;

        *distribution.existing.entry(label.sentiment).or_insert(0) += 1;
        *distribution.independent.entry(score.sentiment).or_insert(0) += 1;

        detailed.push(DiscrepancyRecord {
            ext_id: label.ext_id.clone(),
            speaker: label.speaker.clone(),
            date: label.date.clone(),
            existing_sentiment: label.sentiment,
            independent_sentiment: score.sentiment,
            confidence: score.confidence,
            reasoning: label.reasoning.clone(),
            independent_reasoning: score.reasoning,
            agreement,
        });
    }

    let discrepancies: Vec<DiscrepancyRecord> = detailed
        .iter()
        .filter(|r| !r.agreement)
        .cloned()
        .collect();

    let total = detailed.len();
    let agreements = total - discrepancies.len();
    let agreement_rate = if total > 0 {
        agreements as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let high_confidence = detailed.iter().filter(|r| r.confidence >= 0.8).count();
    let medium_confidence = detailed
        .iter()
        .filter(|r| r.confidence >= 0.6 && r.confidence < 0.8)
        .count();
    let low_confidence = detailed.iter().filter(|r| r.confidence < 0.6).count();

    VerificationResults {
        summary: VerificationSummary {
            total_analyses: total,
            agreements,
            disagreements: total - agreements,
            agreement_rate,
            high_confidence,
            medium_confidence,
            low_confidence,
        },
        sentiment_distribution: distribution,
        detailed_analyses: detailed,
        discrepancies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE_TEXT: &str = r#"
  // Peter Kyle (Minister) - 2025-10-30 - Welcomed the plan, delivered growth
  "A6826669-83CA-4078-8C1C-A4CBA8B1F0CD": "positive",

  // Alan Mak (Opposition) - 2025-01-13 - Opposition response
  "77DF2EB4-B508-4BF3-9795-22332D4E85B1": "negative",

  // Baroness Kidron - 2025-07-21 - Questioning sovereign AI detail
  "8B1B14B4-9BCB-4214-AC8F-031F0020BDAA": "positive",
"#;

    #[test]
    fn agreement_rate_and_buckets() {
        let store = SentimentStore::parse(STORE_TEXT).unwrap();
        let results = reconcile(&store, &MetadataAnalyzer::new());

        // First two entries agree, third does not (independent says neutral)
        assert_eq!(results.summary.total_analyses, 3);
        assert_eq!(results.summary.agreements, 2);
        assert_eq!(results.summary.disagreements, 1);
        assert!((results.summary.agreement_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(results.discrepancies.len(), 1);
        assert_eq!(
            results.discrepancies[0].ext_id,
            "8B1B14B4-9BCB-4214-AC8F-031F0020BDAA"
        );
        assert!(!results.discrepancies[0].agreement);

        assert_eq!(
            results.summary.high_confidence
                + results.summary.medium_confidence
                + results.summary.low_confidence,
            3
        );
    }

    #[test]
    fn distribution_counts_sum_to_total() {
        let store = SentimentStore::parse(STORE_TEXT).unwrap();
        let results = reconcile(&store, &MetadataAnalyzer::new());

        let existing_total: usize = results.sentiment_distribution.existing.values().sum();
        let independent_total: usize = results.sentiment_distribution.independent.values().sum();
        assert_eq!(existing_total, 3);
        assert_eq!(independent_total, 3);
    }

    #[test]
    fn empty_store_yields_zero_rate() {
        let store = SentimentStore::parse("").unwrap();
        let results = reconcile(&store, &MetadataAnalyzer::new());
        assert_eq!(results.summary.total_analyses, 0);
        assert!((results.summary.agreement_rate - 0.0).abs() < f64::EPSILON);
    }
}
