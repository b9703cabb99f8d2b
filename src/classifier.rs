use crate::error::Result;
use crate::false_positive::FalsePositiveFilter;
use crate::lexicon::Lexicon;
use crate::scorer::ContextScorer;
use crate::types::{ClassificationResult, Mention, MentionType, Sentiment};

/// Confidence recorded when the false-positive filter short-circuits scoring.
const FALSE_POSITIVE_CONFIDENCE: f64 = 0.9;

const FALSE_POSITIVE_REASONING: &str = "False positive - AI appears as part of another word";

/// Orchestrates the false-positive filter and the keyword scorer over one
/// mention record.
pub struct MentionClassifier {
    filter: FalsePositiveFilter,
    scorer: ContextScorer,
}

impl MentionClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            filter: FalsePositiveFilter::new()?,
            scorer: ContextScorer::new(),
        })
    }

    /// Build a classifier with a user-supplied scoring vocabulary.
    pub fn with_lexicon(lexicon: Lexicon) -> Result<Self> {
        Ok(Self {
            filter: FalsePositiveFilter::new()?,
            scorer: ContextScorer::with_lexicon(lexicon),
        })
    }

    /// Pure mapping from one mention to one classification result.
    ///
    /// Only the ambiguous short-form mention type goes through the
    /// false-positive filter; the spelled-out form is never disregarded.
    pub fn classify_mention(&self, mention: &Mention) -> ClassificationResult {
        if mention.mention_type == MentionType::Ai
            && self.filter.is_false_positive(&mention.context_text)
        {
            return ClassificationResult {
                id: mention.contribution_ext_id.clone(),
                sentiment: Sentiment::Disregard,
                confidence: FALSE_POSITIVE_CONFIDENCE,
                reasoning: FALSE_POSITIVE_REASONING.to_string(),
            };
        }

        let score = self
            .scorer
            .classify(&mention.context_text, &mention.debate_title);
        ClassificationResult {
            id: mention.contribution_ext_id.clone(),
            sentiment: score.sentiment,
            confidence: round2(score.confidence),
            reasoning: score.reasoning,
        }
    }

    /// Fold over a batch of mentions. Items are independent; output order
    /// matches input order.
    pub fn classify_batch(&self, mentions: &[Mention]) -> Vec<ClassificationResult> {
        mentions.iter().map(|m| self.classify_mention(m)).collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(id: &str, context: &str, title: &str, mention_type: MentionType) -> Mention {
        Mention {
            contribution_ext_id: id.to_string(),
            context_text: context.to_string(),
            debate_title: title.to_string(),
            mention_type,
        }
    }

    #[test]
    fn ambiguous_false_positive_is_disregarded() {
        let classifier = MentionClassifier::new().unwrap();
        let m = mention(
            "X2",
            "The chairman said he remains cautious",
            "",
            MentionType::Ai,
        );
        let result = classifier.classify_mention(&m);
        assert_eq!(result.sentiment, Sentiment::Disregard);
        assert!((result.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn spelled_out_form_is_never_disregarded() {
        let classifier = MentionClassifier::new().unwrap();
        let m = mention(
            "X3",
            "The chairman said he remains cautious",
            "",
            MentionType::ArtificialIntelligence,
        );
        let result = classifier.classify_mention(&m);
        assert_ne!(result.sentiment, Sentiment::Disregard);
    }

    #[test]
    fn positive_round_trip() {
        let classifier = MentionClassifier::new().unwrap();
        let m = mention(
            "X1",
            "We welcome this significant progress on AI technology",
            "AI Debate",
            MentionType::Ai,
        );
        let result = classifier.classify_mention(&m);
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!(result.confidence >= 0.5 && result.confidence <= 0.9);
    }

    #[test]
    fn confidence_is_rounded_to_two_decimals() {
        let classifier = MentionClassifier::new().unwrap();
        let m = mention(
            "X4",
            "We welcome this significant progress on AI technology",
            "AI Debate",
            MentionType::Ai,
        );
        let result = classifier.classify_mention(&m);
        // 0.5 + (2/3) * 0.4 rounds to 0.77
        assert!((result.confidence - 0.77).abs() < 1e-9);
    }

    #[test]
    fn batch_preserves_order_and_size() {
        let classifier = MentionClassifier::new().unwrap();
        let batch = vec![
            mention("A", "we welcome the opportunity", "", MentionType::Ai),
            mention("B", "grave concern and risk", "", MentionType::Ai),
        ];
        let results = classifier.classify_batch(&batch);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "A");
        assert_eq!(results[1].id, "B");
    }
}
