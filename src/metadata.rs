use crate::lexicon::Lexicon;
use crate::scorer::Score;
use crate::types::Sentiment;

/// Speaker role inferred from the attributed title string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerRole {
    Minister,
    Opposition,
    Peer,
    Other,
}

impl SpeakerRole {
    /// Substring classification of the speaker string. Opposition markers are
    /// checked first so "Shadow Secretary of State" lands on the opposition
    /// benches rather than in government.
    pub fn from_speaker(speaker: &str) -> Self {
        let lower = speaker.to_lowercase();
        if lower.contains("opposition") || lower.contains("shadow") {
            SpeakerRole::Opposition
        } else if ["minister", "secretary", "chancellor"]
            .iter()
            .any(|t| lower.contains(t))
        {
            SpeakerRole::Minister
        } else if ["lord", "baroness", "viscount"]
            .iter()
            .any(|t| lower.contains(t))
        {
            SpeakerRole::Peer
        } else {
            SpeakerRole::Other
        }
    }
}

/// Confidence assigned when a role-based fallback rule fires.
const ROLE_RULE_CONFIDENCE: f64 = 0.8;
/// Confidence for the procedural fallback rule.
const PROCEDURAL_CONFIDENCE: f64 = 0.7;
/// Confidence when nothing at all matched.
const INSUFFICIENT_CONFIDENCE: f64 = 0.5;

/// Independent classification path: infers sentiment from speaker role
/// metadata and the reasoning annotation of a prior classification, not from
/// raw contribution text. Never emits `disregard`.
pub struct MetadataAnalyzer {
    lexicon: Lexicon,
}

impl MetadataAnalyzer {
    pub fn new() -> Self {
        Self { lexicon: Lexicon::metadata() }
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Classify from `(speaker, existing_reasoning)`.
    ///
    /// Keyword counting over the reasoning text decides first; when counts
    /// are non-decisive, four ordered fallback rules apply and the first
    /// match wins.
    pub fn classify(&self, speaker: &str, reasoning: &str) -> Score {
        let role = SpeakerRole::from_speaker(speaker);
        let reasoning_lower = reasoning.to_lowercase();

        let counts = self.lexicon.counts(&reasoning_lower);

        if counts.positive > counts.negative && counts.positive > counts.neutral {
            let confidence = (0.6 + counts.positive as f64 * 0.1).min(0.9);
            return Score {
                sentiment: Sentiment::Positive,
                confidence,
                reasoning: format!("Positive language detected: {}", reasoning),
            };
        }
        if counts.negative > counts.positive && counts.negative > counts.neutral {
            let confidence = (0.6 + counts.negative as f64 * 0.1).min(0.9);
            return Score {
                sentiment: Sentiment::Negative,
                confidence,
                reasoning: format!("Negative language detected: {}", reasoning),
            };
        }
        if counts.neutral > counts.positive && counts.neutral > counts.negative {
            let confidence = (0.5 + counts.neutral as f64 * 0.1).min(0.8);
            return Score {
                sentiment: Sentiment::Neutral,
                confidence,
                reasoning: format!("Neutral/procedural language detected: {}", reasoning),
            };
        }

        // Role-based inference, fixed order, first match wins
        if role == SpeakerRole::Minister && reasoning_lower.contains("promoting") {
            return Score {
                sentiment: Sentiment::Positive,
                confidence: ROLE_RULE_CONFIDENCE,
                reasoning: format!("Minister promoting plan: {}", reasoning),
            };
        }
        if role == SpeakerRole::Opposition
            && (reasoning_lower.contains("criticizing") || reasoning_lower.contains("opposition"))
        {
            return Score {
                sentiment: Sentiment::Negative,
                confidence: ROLE_RULE_CONFIDENCE,
                reasoning: format!("Opposition criticizing: {}", reasoning),
            };
        }
        if reasoning_lower.contains("procedural") || reasoning_lower.contains("question") {
            return Score {
                sentiment: Sentiment::Neutral,
                confidence: PROCEDURAL_CONFIDENCE,
                reasoning: format!("Procedural content: {}", reasoning),
            };
        }
        if reasoning_lower.contains("supportive") || reasoning_lower.contains("praising") {
            return Score {
                sentiment: Sentiment::Positive,
                confidence: ROLE_RULE_CONFIDENCE,
                reasoning: format!("Supportive tone: {}", reasoning),
            };
        }

        Score {
            sentiment: Sentiment::Neutral,
            confidence: INSUFFICIENT_CONFIDENCE,
            reasoning: format!("Insufficient indicators: {}", reasoning),
        }
    }
}

impl Default for MetadataAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_classification() {
        assert_eq!(
            SpeakerRole::from_speaker("Peter Kyle (Minister)"),
            SpeakerRole::Minister
        );
        assert_eq!(
            SpeakerRole::from_speaker("Chancellor of the Exchequer"),
            SpeakerRole::Minister
        );
        assert_eq!(
            SpeakerRole::from_speaker("Shadow Secretary of State"),
            SpeakerRole::Opposition
        );
        assert_eq!(
            SpeakerRole::from_speaker("Alan Mak (Opposition)"),
            SpeakerRole::Opposition
        );
        assert_eq!(
            SpeakerRole::from_speaker("Baroness Kidron"),
            SpeakerRole::Peer
        );
        assert_eq!(SpeakerRole::from_speaker("Dan Aldridge"), SpeakerRole::Other);
    }

    #[test]
    fn decisive_counts_win_before_fallbacks() {
        let analyzer = MetadataAnalyzer::new();
        // "welcomed" and "delivered" are two positive members, nothing else
        let score = analyzer.classify("Dan Aldridge", "Welcomed the plan, delivered remarks");
        assert_eq!(score.sentiment, Sentiment::Positive);
        assert!((score.confidence - 0.8).abs() < 1e-9);
        assert!(score.reasoning.starts_with("Positive language detected:"));
    }

    #[test]
    fn minister_promoting_fallback() {
        let analyzer = MetadataAnalyzer::new();
        // "promoting" (positive) ties with "concern" (negative), forcing the
        // count path to pass and the role rule to decide
        let score = analyzer.classify(
            "Peter Kyle (Minister)",
            "Promoting the plan despite concern",
        );
        assert_eq!(score.sentiment, Sentiment::Positive);
        assert!((score.confidence - 0.8).abs() < 1e-9);
        assert!(score.reasoning.starts_with("Minister promoting plan:"));
    }

    #[test]
    fn opposition_fallback() {
        let analyzer = MetadataAnalyzer::new();
        // "Opposition response" carries no vocabulary member at all
        let score = analyzer.classify("Alan Mak (Opposition)", "Opposition response");
        assert_eq!(score.sentiment, Sentiment::Negative);
        assert!((score.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn insufficient_indicators_default() {
        let analyzer = MetadataAnalyzer::new();
        let score = analyzer.classify("Dan Aldridge", "Brief remarks");
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!((score.confidence - 0.5).abs() < 1e-9);
        assert!(score.reasoning.starts_with("Insufficient indicators:"));
    }

    #[test]
    fn neutral_counts_cap_at_0_8() {
        let analyzer = MetadataAnalyzer::new();
        let score = analyzer.classify(
            "Baroness Kidron",
            "Questioning the review, seeking detail and explanation of the report",
        );
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!(score.confidence <= 0.8);
        assert!(score.reasoning.starts_with("Neutral/procedural language detected:"));
    }
}
