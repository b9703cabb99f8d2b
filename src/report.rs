use crate::resolver::{recommend, Recommendation, RecommendationAction};
use crate::types::{ClassificationResult, DiscrepancyRecord, Sentiment};
use crate::verify::VerificationResults;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-label counters over one classification batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub disregard: usize,
}

impl SentimentTally {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let mut tally = Self::default();
        for r in results {
            tally.add(r.sentiment);
        }
        tally
    }

    pub fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Disregard => self.disregard += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative + self.disregard
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
            Sentiment::Disregard => self.disregard,
        }
    }

    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(sentiment) as f64 / total as f64 * 100.0
    }
}

/// Serialized stats artifact written next to the classification results.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub total: usize,
    pub breakdown: BTreeMap<&'static str, usize>,
    pub percentages: BTreeMap<&'static str, f64>,
}

impl StatsSummary {
    pub fn from_tally(tally: &SentimentTally) -> Self {
        const LABELS: [Sentiment; 4] = [
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Positive,
            Sentiment::Disregard,
        ];
        let mut breakdown = BTreeMap::new();
        let mut percentages = BTreeMap::new();
        for label in LABELS {
            breakdown.insert(label.as_str(), tally.count(label));
            percentages.insert(
                label.as_str(),
                (tally.percentage(label) * 10.0).round() / 10.0,
            );
        }
        Self {
            total: tally.total(),
            breakdown,
            percentages,
        }
    }
}

/// Console summary after a classification run.
pub fn render_classification_summary(tally: &SentimentTally) -> String {
    let mut out = String::new();
    out.push_str("=== Sentiment Analysis Complete ===\n");
    out.push_str(&format!("Total processed: {}\n", tally.total()));
    for label in [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::Disregard,
    ] {
        out.push_str(&format!(
            "{}: {} ({:.1}%)\n",
            capitalize(label.as_str()),
            tally.count(label),
            tally.percentage(label)
        ));
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Markdown table comparing existing and independent label distributions.
pub fn render_distribution_table(results: &VerificationResults) -> String {
    let mut out = String::new();
    out.push_str("| Sentiment | Existing Count | Independent Count | Difference |\n");
    out.push_str("|-----------|----------------|-------------------|------------|\n");

    let all_labels: std::collections::BTreeSet<Sentiment> = results
        .sentiment_distribution
        .existing
        .keys()
        .chain(results.sentiment_distribution.independent.keys())
        .copied()
        .collect();

    for label in all_labels {
        let existing = *results
            .sentiment_distribution
            .existing
            .get(&label)
            .unwrap_or(&0);
        let independent = *results
            .sentiment_distribution
            .independent
            .get(&label)
            .unwrap_or(&0);
        let diff = independent as i64 - existing as i64;
        out.push_str(&format!(
            "| {} | {} | {} | {:+} |\n",
            label, existing, independent, diff
        ));
    }
    out
}

/// Number of discrepancy entries shown in full in the verification report.
const DISCREPANCY_DISPLAY_LIMIT: usize = 10;

/// Comprehensive Markdown verification report.
pub fn render_verification_report(
    results: &VerificationResults,
    timestamp: DateTime<Utc>,
) -> String {
    let mut report: Vec<String> = Vec::new();
    let summary = &results.summary;

    report.push("# Secondary Sentiment Analysis Verification Report".to_string());
    report.push("=".repeat(60));
    report.push(format!(
        "Analysis Date: {}",
        timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
    report.push(format!(
        "Total Contributions Analyzed: {}",
        summary.total_analyses
    ));
    report.push(String::new());

    report.push("## Executive Summary".to_string());
    report.push(format!(
        "- **Agreement Rate**: {:.1}%",
        summary.agreement_rate
    ));
    report.push(format!("- **Agreements**: {}", summary.agreements));
    report.push(format!("- **Disagreements**: {}", summary.disagreements));
    report.push(String::new());

    report.push("## Confidence Analysis".to_string());
    report.push(format!(
        "- **High Confidence (≥80%)**: {} analyses",
        summary.high_confidence
    ));
    report.push(format!(
        "- **Medium Confidence (60-79%)**: {} analyses",
        summary.medium_confidence
    ));
    report.push(format!(
        "- **Low Confidence (<60%)**: {} analyses",
        summary.low_confidence
    ));
    report.push(String::new());

    report.push("## Sentiment Distribution Comparison".to_string());
    report.push(render_distribution_table(results).trim_end().to_string());
    report.push(String::new());

    if results.discrepancies.is_empty() {
        report.push("## Discrepancy Analysis".to_string());
        report.push(
            "✅ **No discrepancies found** - Independent analysis agrees with all original classifications!"
                .to_string(),
        );
        report.push(String::new());
    } else {
        report.push("## Discrepancy Analysis".to_string());
        report.push(format!(
            "Found {} cases where independent analysis differs from original classification:",
            results.discrepancies.len()
        ));
        report.push(String::new());

        for (i, disc) in results
            .discrepancies
            .iter()
            .take(DISCREPANCY_DISPLAY_LIMIT)
            .enumerate()
        {
            report.push(format!("### {}. {} ({})", i + 1, disc.speaker, disc.date));
            report.push(format!("- **ID**: {}", disc.ext_id));
            report.push(format!("- **Original**: {}", disc.existing_sentiment));
            report.push(format!("- **Independent**: {}", disc.independent_sentiment));
            report.push(format!("- **Reasoning**: {}", disc.reasoning));
            report.push(format!("- **Confidence**: {:.2}", disc.confidence));
            report.push(String::new());
        }
    }

    report.push("## Methodology Notes".to_string());
    report.push("- Analysis based on sentiment indicators in reasoning metadata".to_string());
    report.push("- Speaker role considered (minister vs opposition vs crossbench)".to_string());
    report.push("- Confidence scores reflect strength of sentiment indicators".to_string());
    report.push("- This verification validates the robustness of the original analysis".to_string());
    report.push(String::new());

    report.push("## Recommendation".to_string());
    if summary.agreement_rate >= 90.0 {
        report.push("✅ **Original sentiment analysis is HIGHLY RELIABLE**".to_string());
        report.push(
            "The high agreement rate confirms the methodology and classifications are robust."
                .to_string(),
        );
    } else if summary.agreement_rate >= 75.0 {
        report.push("✅ **Original sentiment analysis is RELIABLE**".to_string());
        report.push("Good agreement rate with minor discrepancies that may warrant review.".to_string());
    } else {
        report.push("⚠️ **CONSIDER REVIEWING** discrepancies".to_string());
        report.push(
            "Lower agreement rate suggests some classifications may benefit from re-evaluation."
                .to_string(),
        );
    }

    report.join("\n")
}

/// A discrepancy paired with its decision-table recommendation.
#[derive(Debug, Clone)]
pub struct ReviewedDiscrepancy {
    pub record: DiscrepancyRecord,
    pub recommendation: Recommendation,
}

/// Run the decision table over every discrepancy of a verification run.
pub fn review_discrepancies(results: &VerificationResults) -> Vec<ReviewedDiscrepancy> {
    results
        .discrepancies
        .iter()
        .map(|record| ReviewedDiscrepancy {
            record: record.clone(),
            recommendation: recommend(record),
        })
        .collect()
}

/// Effective agreement after review: originally-agreeing entries plus
/// discrepancies the table recommends keeping, over all analyzed entries.
pub fn effective_agreement_rate(results: &VerificationResults, reviews: &[ReviewedDiscrepancy]) -> f64 {
    let total = results.summary.total_analyses;
    if total == 0 {
        return 0.0;
    }
    let keeps = reviews.iter().filter(|r| r.recommendation.is_keep()).count();
    (results.summary.agreements + keeps) as f64 / total as f64 * 100.0
}

/// Examples shown per recommendation group in the enhanced report.
const REVIEW_DISPLAY_LIMIT: usize = 5;

/// Detailed Markdown review report grouping discrepancies by recommendation.
pub fn render_review_report(
    results: &VerificationResults,
    reviews: &[ReviewedDiscrepancy],
    timestamp: DateTime<Utc>,
) -> String {
    let mut groups: BTreeMap<String, Vec<&ReviewedDiscrepancy>> = BTreeMap::new();
    for review in reviews {
        groups
            .entry(review.recommendation.to_string())
            .or_default()
            .push(review);
    }

    let mut report: Vec<String> = Vec::new();
    report.push("# Enhanced Sentiment Analysis Report".to_string());
    report.push("=".repeat(50));
    report.push(format!(
        "Analysis Date: {}",
        timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
    report.push(format!("Total Discrepancies Reviewed: {}", reviews.len()));
    report.push(String::new());

    report.push("## Manual Review Summary".to_string());
    for (label, group) in &groups {
        let percentage = if reviews.is_empty() {
            0.0
        } else {
            group.len() as f64 / reviews.len() as f64 * 100.0
        };
        report.push(format!(
            "**{}**: {} cases ({:.1}%)",
            label,
            group.len(),
            percentage
        ));
    }
    report.push(String::new());

    for (label, group) in &groups {
        report.push(format!("## {}", label.to_uppercase()));
        report.push(String::new());
        for review in group.iter().take(REVIEW_DISPLAY_LIMIT) {
            let record = &review.record;
            report.push(format!("### {}", record.speaker));
            report.push(format!("- **Reasoning**: {}", record.reasoning));
            report.push(format!(
                "- **Original**: {} → **Independent**: {}",
                record.existing_sentiment, record.independent_sentiment
            ));
            report.push(format!("- **Confidence**: {:.2}", record.confidence));
            report.push(String::new());
        }
    }

    report.push("## Methodology Assessment".to_string());
    report.push("### Strengths of Original Analysis:".to_string());
    report.push("- Contextual understanding of parliamentary proceedings".to_string());
    report.push("- Nuanced interpretation of political language".to_string());
    report.push("- Appropriate classification of procedural vs substantive statements".to_string());
    report.push(String::new());

    report.push("### Limitations of Automated Analysis:".to_string());
    report.push("- Requires full contribution text for accurate analysis".to_string());
    report.push("- Political context and speaker intent difficult to capture algorithmically".to_string());
    report.push("- Parliamentary language often formal and nuanced".to_string());
    report.push(String::new());

    let keep_count = reviews.iter().filter(|r| r.recommendation.is_keep()).count();
    let change_count = reviews
        .iter()
        .filter(|r| {
            matches!(
                r.recommendation.action,
                RecommendationAction::ChangeToNeutral | RecommendationAction::ChangeToNegative
            )
        })
        .count();
    let final_rate = effective_agreement_rate(results, reviews);

    report.push("## Final Recommendation".to_string());
    report.push(format!(
        "**Effective Agreement Rate After Manual Review**: {:.1}%",
        final_rate
    ));
    report.push(String::new());

    if final_rate >= 85.0 {
        report.push("✅ **ORIGINAL ANALYSIS IS HIGHLY RELIABLE**".to_string());
        report.push("Manual review confirms most original classifications are accurate.".to_string());
        report.push(format!(
            "Only {} of {} discrepancies warrant potential changes.",
            change_count,
            reviews.len()
        ));
    } else if final_rate >= 75.0 {
        report.push("✅ **ORIGINAL ANALYSIS IS RELIABLE WITH MINOR REFINEMENTS**".to_string());
        report.push(
            "Strong overall reliability with a few cases that could benefit from reconsideration."
                .to_string(),
        );
    } else {
        report.push("⚠️ **CONSIDER SYSTEMATIC REVIEW**".to_string());
        report.push("Several discrepancies suggest the methodology could be refined.".to_string());
    }

    report.push(String::new());
    report.push("### Specific Actions Recommended:".to_string());
    report.push(format!(
        "- **Review**: {} cases where methodology may need adjustment",
        change_count
    ));
    report.push(format!(
        "- **Maintain**: {} existing classifications as accurate",
        keep_count
    ));
    report.push("- **Document**: Clear guidelines for parliamentary sentiment analysis".to_string());
    report.push("- **Validate**: Future analyses with multiple reviewers".to_string());

    report.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataAnalyzer;
    use crate::store::SentimentStore;
    use crate::verify::reconcile;
    use chrono::TimeZone;

    fn result(id: &str, sentiment: Sentiment) -> ClassificationResult {
        ClassificationResult {
            id: id.to_string(),
            sentiment,
            confidence: 0.7,
            reasoning: String::new(),
        }
    }

    #[test]
    fn tally_counts_sum_to_batch_size() {
        let results = vec![
            result("A", Sentiment::Positive),
            result("B", Sentiment::Positive),
            result("C", Sentiment::Negative),
            result("D", Sentiment::Disregard),
        ];
        let tally = SentimentTally::from_results(&results);
        assert_eq!(tally.total(), results.len());
        assert_eq!(tally.positive, 2);
        assert_eq!(tally.negative, 1);
        assert_eq!(tally.disregard, 1);
    }

    #[test]
    fn percentages_sum_to_100() {
        let results = vec![
            result("A", Sentiment::Positive),
            result("B", Sentiment::Neutral),
            result("C", Sentiment::Negative),
        ];
        let tally = SentimentTally::from_results(&results);
        let sum: f64 = [
            Sentiment::Positive,
            Sentiment::Neutral,
            Sentiment::Negative,
            Sentiment::Disregard,
        ]
        .iter()
        .map(|s| tally.percentage(*s))
        .sum();
        assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn empty_tally_has_zero_percentages() {
        let tally = SentimentTally::default();
        assert_eq!(tally.total(), 0);
        assert!((tally.percentage(Sentiment::Positive) - 0.0).abs() < f64::EPSILON);
    }

    const STORE_TEXT: &str = r#"
  // Peter Kyle (Minister) - 2025-10-30 - Welcomed the plan, delivered growth
  "A6826669-83CA-4078-8C1C-A4CBA8B1F0CD": "positive",

  // Alan Mak (Opposition) - 2025-01-13 - Opposition response
  "77DF2EB4-B508-4BF3-9795-22332D4E85B1": "negative",

  // Baroness Kidron - 2025-07-21 - Questioning sovereign AI detail
  "8B1B14B4-9BCB-4214-AC8F-031F0020BDAA": "positive",
"#;

    fn sample_results() -> VerificationResults {
        let store = SentimentStore::parse(STORE_TEXT).unwrap();
        reconcile(&store, &MetadataAnalyzer::new())
    }

    #[test]
    fn distribution_table_snapshot() {
        let results = sample_results();
        let table = render_distribution_table(&results);
        insta::assert_snapshot!(table.trim_end(), @r"
        | Sentiment | Existing Count | Independent Count | Difference |
        |-----------|----------------|-------------------|------------|
        | negative | 1 | 1 | +0 |
        | neutral | 0 | 1 | +1 |
        | positive | 2 | 1 | -1 |
        ");
    }

    #[test]
    fn verification_report_contains_key_sections() {
        let results = sample_results();
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let report = render_verification_report(&results, ts);

        assert!(report.contains("# Secondary Sentiment Analysis Verification Report"));
        assert!(report.contains("Analysis Date: 2026-01-15 12:00:00"));
        assert!(report.contains("Total Contributions Analyzed: 3"));
        assert!(report.contains("- **Agreement Rate**: 66.7%"));
        assert!(report.contains("### 1. Baroness Kidron (2025-07-21)"));
        assert!(report.contains("⚠️ **CONSIDER REVIEWING** discrepancies"));
    }

    #[test]
    fn review_report_groups_recommendations() {
        let results = sample_results();
        let reviews = review_discrepancies(&results);
        assert_eq!(reviews.len(), 1);

        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let report = render_review_report(&results, &reviews, ts);
        assert!(report.contains("Total Discrepancies Reviewed: 1"));
        assert!(report.contains("## Manual Review Summary"));
        assert!(report.contains("## REVIEW MANUALLY (COMPLEX CASE)"));
        assert!(report.contains("**Effective Agreement Rate After Manual Review**: 66.7%"));
    }

    #[test]
    fn effective_rate_counts_keeps_as_agreement() {
        let results = sample_results();
        let reviews = review_discrepancies(&results);
        // The single discrepancy routes to manual review, so only the two
        // original agreements count toward the effective rate
        assert_eq!(reviews[0].recommendation.action, RecommendationAction::Review);
        assert!((effective_agreement_rate(&results, &reviews) - 200.0 / 3.0).abs() < 1e-9);
    }
}
