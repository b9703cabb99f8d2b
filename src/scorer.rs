use crate::false_positive::DOMAIN_PHRASES;
use crate::lexicon::Lexicon;
use crate::types::Sentiment;

/// Broader domain-relevance signal than the filter's override list: the
/// scorer also accepts policy-register phrases that never appear inside
/// ordinary words.
const RELEVANCE_PHRASES: &[&str] = &["ai act", "ai governance", "ai strategy", "ai policy"];

/// Confidence floor and ceiling for keyword-derived scores.
const CONFIDENCE_CAP: f64 = 0.9;
/// Base confidence once a vocabulary wins outright.
const WINNER_BASE: f64 = 0.5;
/// Extra confidence distributed by the winner's share of all matches.
const WINNER_SPREAD: f64 = 0.4;
/// No keywords at all, but the text is recognisably about AI.
const RELEVANT_FLOOR: f64 = 0.5;
/// No keywords and no domain signal either.
const NO_SIGNAL_FLOOR: f64 = 0.4;
/// Both positive and negative signal present.
const MIXED_CONFIDENCE: f64 = 0.6;
/// Neutral signal dominates or everything ties.
const BALANCED_CONFIDENCE: f64 = 0.7;

/// One scored snippet: label, confidence in [0,1], and a reasoning string
/// naming the decisive vocabulary.
#[derive(Debug, Clone)]
pub struct Score {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub reasoning: String,
}

/// Keyword sentiment scorer over raw contribution text.
pub struct ContextScorer {
    lexicon: Lexicon,
}

impl ContextScorer {
    pub fn new() -> Self {
        Self { lexicon: Lexicon::context() }
    }

    /// Swap in a user-supplied vocabulary.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Score a snippet together with its companion debate title.
    ///
    /// Deterministic: positive is checked before negative, so a genuine
    /// three-way tie resolves through the neutral branches.
    pub fn classify(&self, context_text: &str, debate_title: &str) -> Score {
        let text = format!("{} {}", context_text, debate_title).to_lowercase();

        let is_domain_relevant = DOMAIN_PHRASES
            .iter()
            .chain(RELEVANCE_PHRASES.iter())
            .any(|phrase| text.contains(phrase));

        let counts = self.lexicon.counts(&text);
        let total = counts.total();

        if total == 0 {
            return if is_domain_relevant {
                Score {
                    sentiment: Sentiment::Neutral,
                    confidence: RELEVANT_FLOOR,
                    reasoning: "Mentions AI but no clear sentiment indicators".to_string(),
                }
            } else {
                Score {
                    sentiment: Sentiment::Neutral,
                    confidence: NO_SIGNAL_FLOOR,
                    reasoning: "General context without strong sentiment".to_string(),
                }
            };
        }

        if counts.positive > counts.negative && counts.positive > counts.neutral {
            let confidence = (WINNER_BASE
                + (counts.positive as f64 / total as f64) * WINNER_SPREAD)
                .min(CONFIDENCE_CAP);
            return Score {
                sentiment: Sentiment::Positive,
                confidence,
                reasoning: format!(
                    "Positive keywords: {} (vs {} negative)",
                    counts.positive, counts.negative
                ),
            };
        }

        if counts.negative > counts.positive && counts.negative > counts.neutral {
            let confidence = (WINNER_BASE
                + (counts.negative as f64 / total as f64) * WINNER_SPREAD)
                .min(CONFIDENCE_CAP);
            return Score {
                sentiment: Sentiment::Negative,
                confidence,
                reasoning: format!(
                    "Negative/concern keywords: {} (vs {} positive)",
                    counts.negative, counts.positive
                ),
            };
        }

        if counts.positive > 0 && counts.negative > 0 {
            return Score {
                sentiment: Sentiment::Neutral,
                confidence: MIXED_CONFIDENCE,
                reasoning: format!(
                    "Mixed sentiment: {} positive, {} negative keywords",
                    counts.positive, counts.negative
                ),
            };
        }

        Score {
            sentiment: Sentiment::Neutral,
            confidence: BALANCED_CONFIDENCE,
            reasoning: "Balanced/procedural discussion".to_string(),
        }
    }
}

impl Default for ContextScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_keywords_win() {
        let scorer = ContextScorer::new();
        let score = scorer.classify(
            "We welcome this significant progress on AI technology",
            "AI Debate",
        );
        assert_eq!(score.sentiment, Sentiment::Positive);
        assert!(score.confidence > 0.5 && score.confidence <= 0.9);
        assert!(score.reasoning.starts_with("Positive keywords:"));
    }

    #[test]
    fn negative_keywords_win() {
        let scorer = ContextScorer::new();
        let score = scorer.classify(
            "There is real danger and harm in this deepfake surveillance threat",
            "",
        );
        assert_eq!(score.sentiment, Sentiment::Negative);
        assert!(score.confidence <= 0.9);
        assert!(score.reasoning.starts_with("Negative/concern keywords:"));
    }

    #[test]
    fn zero_matches_is_low_confidence_neutral() {
        let scorer = ContextScorer::new();
        // No vocabulary member and no domain phrase
        let score = scorer.classify("the honourable member spoke at length", "");
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!((score.confidence - 0.4).abs() < f64::EPSILON);

        // Domain relevance lifts the floor to the higher tier
        let score = scorer.classify("the machine learning programme", "");
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!((score.confidence - 0.5).abs() < f64::EPSILON);
        assert!(score.confidence <= 0.5);
    }

    #[test]
    fn mixed_signal_resolves_to_neutral() {
        let scorer = ContextScorer::new();
        // One positive ("welcome"), one negative ("worry"), tie
        let score = scorer.classify("we welcome it but worry too", "");
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!((score.confidence - 0.6).abs() < f64::EPSILON);
        assert!(score.reasoning.starts_with("Mixed sentiment:"));
    }

    #[test]
    fn neutral_dominance_is_balanced_procedural() {
        let scorer = ContextScorer::new();
        let score = scorer.classify("the committee report and the statement", "");
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!((score.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_caps_at_0_9() {
        let scorer = ContextScorer::new();
        // Many positive members, zero anything else: 0.5 + 1.0 * 0.4 = 0.9
        let score = scorer.classify(
            "opportunity benefit potential innovation growth boost investment",
            "",
        );
        assert_eq!(score.sentiment, Sentiment::Positive);
        assert!(score.confidence <= 0.9);
    }
}
