use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Context-scorer vocabulary, tuned for raw contribution text.
const CONTEXT_POSITIVE: &[&str] = &[
    "opportunity", "opportunities", "benefit", "benefits", "potential",
    "innovation", "innovative", "progress", "advancement", "growth",
    "support", "supporting", "welcome", "welcomed", "exciting",
    "transform", "transformative", "improve", "improvement", "enhance",
    "enable", "enabling", "empower", "productivity", "efficiency",
    "breakthrough", "promising", "optimistic", "lead", "leadership",
    "invest", "investment", "boost", "advantage", "advantageous",
];

const CONTEXT_NEGATIVE: &[&str] = &[
    "risk", "risks", "danger", "dangerous", "threat", "concern", "concerned",
    "worry", "worried", "fear", "fears", "problem", "problems", "challenge",
    "harmful", "harm", "damage", "unsafe", "regulate", "regulation",
    "bias", "biased", "discrimination", "discriminatory", "unemployment",
    "job loss", "job losses", "replace", "replacement", "displace",
    "misinformation", "disinformation", "deepfake", "deepfakes",
    "surveillance", "privacy", "unethical", "ethical concerns",
    "safeguard", "safeguards", "protect", "protection", "caution", "cautious",
];

const CONTEXT_NEUTRAL: &[&str] = &[
    "question", "questions", "ask", "asking", "inquiry", "review",
    "committee", "report", "statement", "update", "minister", "secretary",
    "policy", "legislation", "bill", "amendment", "debate", "discussion",
    "consider", "considering", "examine", "examining", "assess", "assessment",
];

/// Metadata-scorer vocabulary, tuned for the short human-authored reasoning
/// annotations attached to existing classifications.
const METADATA_POSITIVE: &[&str] = &[
    "welcome", "support", "excellent", "opportunity", "progress", "please",
    "thank", "congratulations", "great", "fantastic", "important", "valuable",
    "committed", "delivered", "achieved", "significant", "major", "success",
    "growth", "leading", "positive", "enthusiastic", "promoting", "defending",
    "praising",
];

const METADATA_NEGATIVE: &[&str] = &[
    "concern", "concerned", "worry", "worried", "criticize", "criticism",
    "oppose", "fail", "failure", "inadequate", "insufficient", "disappointed",
    "problem", "issue", "challenge", "risk", "damaging", "harmful", "setback",
    "delay", "negative", "opposing", "criticizing", "highlighting failures",
];

const METADATA_NEUTRAL: &[&str] = &[
    "question", "ask", "seek", "clarify", "understand", "explain", "detail",
    "update", "progress", "report", "information", "consider", "examine",
    "review", "assessment", "analysis", "discussion", "debate", "procedural",
    "informational", "questioning", "balanced", "amendments",
];

/// Presence counts per vocabulary. Each member counts once when contained
/// in the text, substring matching, not tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl KeywordCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Three weighted keyword vocabularies. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: Vec<String>,
    negative: Vec<String>,
    neutral: Vec<String>,
}

/// On-disk shape for a user-supplied lexicon override file
#[derive(Debug, Deserialize)]
struct RawLexicon {
    #[serde(default)]
    positive: Vec<String>,
    #[serde(default)]
    negative: Vec<String>,
    #[serde(default)]
    neutral: Vec<String>,
}

impl Lexicon {
    /// Vocabulary used when scoring raw contribution text.
    pub fn context() -> Self {
        Self::from_slices(CONTEXT_POSITIVE, CONTEXT_NEGATIVE, CONTEXT_NEUTRAL)
    }

    /// Vocabulary used when scoring reasoning annotations in the
    /// metadata-based analysis path.
    pub fn metadata() -> Self {
        Self::from_slices(METADATA_POSITIVE, METADATA_NEGATIVE, METADATA_NEUTRAL)
    }

    fn from_slices(positive: &[&str], negative: &[&str], neutral: &[&str]) -> Self {
        Self {
            positive: positive.iter().map(|s| s.to_string()).collect(),
            negative: negative.iter().map(|s| s.to_string()).collect(),
            neutral: neutral.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load a custom vocabulary from a YAML file with `positive`, `negative`
    /// and `neutral` lists. Members are normalized to lowercase.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let raw: RawLexicon = serde_yaml::from_str(&contents)?;
        Ok(Self {
            positive: raw.positive.iter().map(|s| s.to_lowercase()).collect(),
            negative: raw.negative.iter().map(|s| s.to_lowercase()).collect(),
            neutral: raw.neutral.iter().map(|s| s.to_lowercase()).collect(),
        })
    }

    /// Count vocabulary members contained in `text`. The caller is expected
    /// to pass lowercased text.
    pub fn counts(&self, text: &str) -> KeywordCounts {
        KeywordCounts {
            positive: self.positive.iter().filter(|kw| text.contains(kw.as_str())).count(),
            negative: self.negative.iter().filter(|kw| text.contains(kw.as_str())).count(),
            neutral: self.neutral.iter().filter(|kw| text.contains(kw.as_str())).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn counts_are_presence_counts_not_occurrence_counts() {
        let lexicon = Lexicon::context();
        // "welcome" appears twice but counts once
        let counts = lexicon.counts("we welcome and welcome again this opportunity");
        assert_eq!(counts.positive, 2); // welcome + opportunity
        assert_eq!(counts.negative, 0);
    }

    #[test]
    fn empty_text_has_zero_counts() {
        let lexicon = Lexicon::metadata();
        assert_eq!(lexicon.counts("").total(), 0);
    }

    #[test]
    fn yaml_override_loads_and_lowercases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "positive:\n  - Splendid\nnegative:\n  - dreadful\nneutral: []"
        )
        .unwrap();
        let lexicon = Lexicon::from_yaml_file(file.path()).unwrap();
        let counts = lexicon.counts("a splendid but dreadful plan");
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.negative, 1);
        assert_eq!(counts.neutral, 0);
    }
}
