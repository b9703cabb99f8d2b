use crate::metadata::SpeakerRole;
use crate::types::{DiscrepancyRecord, Sentiment};
use serde::{Deserialize, Serialize};

/// Closed set of recommendation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationAction {
    Keep,
    ChangeToNeutral,
    ChangeToNegative,
    Review,
}

impl RecommendationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationAction::Keep => "KEEP original",
            RecommendationAction::ChangeToNeutral => "CONSIDER CHANGE to neutral",
            RecommendationAction::ChangeToNegative => "CONSIDER CHANGE to negative",
            RecommendationAction::Review => "REVIEW manually",
        }
    }
}

/// Recommendation for one discrepancy: the action plus the note explaining
/// which table rule produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub action: RecommendationAction,
    pub note: &'static str,
}

impl Recommendation {
    fn new(action: RecommendationAction, note: &'static str) -> Self {
        Self { action, note }
    }

    pub fn is_keep(&self) -> bool {
        self.action == RecommendationAction::Keep
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.note.is_empty() {
            f.write_str(self.action.as_str())
        } else {
            write!(f, "{} ({})", self.action.as_str(), self.note)
        }
    }
}

/// Threshold below which the independent analysis is distrusted outright.
const LOW_CONFIDENCE: f64 = 0.6;

/// Fixed decision table over reasoning-text patterns, speaker role and
/// confidence. Evaluated top to bottom, first match wins; meaningful only
/// when the two sentiments differ. Missing fields behave as empty strings
/// and fall through to the final rule.
pub fn recommend(record: &DiscrepancyRecord) -> Recommendation {
    let reasoning = record.reasoning.to_lowercase();
    let role = SpeakerRole::from_speaker(&record.speaker);

    // 1. Clear negative sentiment correctly captured by the original
    if reasoning.contains("worst of all worlds") || reasoning.contains("criticizing govt approach")
    {
        return Recommendation::new(
            RecommendationAction::Keep,
            "correctly identifies negative tone",
        );
    }

    // 2. Ministerial statements about government actions
    if role == SpeakerRole::Minister
        && ["committed", "delivered", "announcement"]
            .iter()
            .any(|p| reasoning.contains(p))
    {
        return Recommendation::new(
            RecommendationAction::Keep,
            "government actions typically reported positively",
        );
    }

    // 3. Parliamentary procedure vs actual sentiment
    if ["thanks for debate", "welcoming", "procedural"]
        .iter()
        .any(|p| reasoning.contains(p))
    {
        return if record.existing_sentiment == Sentiment::Positive {
            Recommendation::new(
                RecommendationAction::ChangeToNeutral,
                "procedural, not substantive endorsement",
            )
        } else {
            Recommendation::new(
                RecommendationAction::Keep,
                "procedural appropriately classified",
            )
        };
    }

    // 4. Opposition vs constructive criticism
    if role == SpeakerRole::Opposition && reasoning.contains("constructive") {
        return if record.independent_sentiment == Sentiment::Negative {
            Recommendation::new(
                RecommendationAction::ChangeToNegative,
                "opposition criticism typically negative",
            )
        } else {
            Recommendation::new(RecommendationAction::Keep, "")
        };
    }

    // 5. Low-confidence independent analysis
    if record.confidence < LOW_CONFIDENCE {
        return Recommendation::new(
            RecommendationAction::Keep,
            "low confidence in independent analysis",
        );
    }

    // 6. Everything else needs a human
    Recommendation::new(RecommendationAction::Review, "complex case")
}
