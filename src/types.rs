use serde::{Deserialize, Serialize};

/// Kind of raw token match that produced a mention.
///
/// The short form "AI" is ambiguous (it collides with substrings of ordinary
/// words), the spelled-out form never is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MentionType {
    Ai,
    ArtificialIntelligence,
}

impl From<String> for MentionType {
    fn from(s: String) -> Self {
        let normalized = s.to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "artificialintelligence" => MentionType::ArtificialIntelligence,
            _ => MentionType::Ai, // Default fallback
        }
    }
}

impl From<MentionType> for String {
    fn from(t: MentionType) -> Self {
        match t {
            MentionType::Ai => "AI".to_string(),
            MentionType::ArtificialIntelligence => "Artificial Intelligence".to_string(),
        }
    }
}

impl Default for MentionType {
    fn default() -> Self {
        MentionType::Ai
    }
}

/// Sentiment label alphabet.
///
/// `Disregard` is only ever produced by the false-positive path; the
/// metadata-based analysis and the persisted store use the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
    Disregard,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
            Sentiment::Disregard => "disregard",
        }
    }

    /// Parse one of the three store tags. `disregard` is never persisted.
    pub fn from_store_tag(s: &str) -> Option<Self> {
        match s {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected AI mention with its surrounding context, read from a batch shard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub contribution_ext_id: String,
    #[serde(default)]
    pub context_text: String,
    #[serde(default)]
    pub debate_title: String,
    #[serde(default)]
    pub mention_type: MentionType,
}

/// Per-mention classification output. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub id: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub reasoning: String,
}

/// An existing, pre-recorded classification read from the sentiment store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SentimentLabel {
    pub ext_id: String,
    pub sentiment: Sentiment,
    pub reasoning: String,
    pub speaker: String,
    pub date: String,
}

/// Comparison of an existing label against an independently computed one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscrepancyRecord {
    pub ext_id: String,
    pub speaker: String,
    pub date: String,
    pub existing_sentiment: Sentiment,
    pub independent_sentiment: Sentiment,
    pub confidence: f64,
    /// Free-text reasoning attached to the existing classification.
    pub reasoning: String,
    /// Reasoning produced by the independent metadata analysis.
    pub independent_reasoning: String,
    pub agreement: bool,
}
