use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Surface forms of "ai" inside ordinary words, as they come back from the
/// Hansard search highlighter. The highlighter sometimes splits letters with
/// stray whitespace, hence the optional interior `[\s]?`.
const FALSE_POSITIVE_PATTERNS: &[&str] = &[
    r"\b(pr|f|m|aw|ch|s|tr|pl|r|cl|str|br|afr|obt|st|dr|gr|upl|sl|p|w|restr|ent|ret|sust|rem|det|expl|att|cert|m)[\s]?ai[\s]?(se|n|m|d|t|r|l|ned|nt|ns|ning|ned|der|rman|rmanship|nst|led|ling|ls)\b",
    r"\bai[\s]?m\b",          // aim
    r"\bs[\s]?ai[\s]?d\b",    // said
    r"\bch[\s]?ai[\s]?r\b",   // chair
    r"\bpr[\s]?ai[\s]?se\b",  // praise
    r"\bm[\s]?ai[\s]?den\b",  // maiden
    r"\bAff[\s]?ai[\s]?rs\b", // Affairs
    r"\brem[\s]?ai[\s]?n\b",  // remain
    r"\bobt[\s]?ai[\s]?n\b",  // obtain
    r"\bcont[\s]?ai[\s]?n\b", // contain
    r"\bsust[\s]?ai[\s]?n\b", // sustain
    r"\bdet[\s]?ai[\s]?l\b",  // detail
];

/// Unambiguous AI-domain phrases. If one of these is present the mention is
/// genuine no matter what the patterns say.
pub const DOMAIN_PHRASES: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "ai system",
    "ai technology",
    "ai model",
    "generative ai",
    "ai regulation",
    "ai safety",
    "ai ethics",
    "chatgpt",
    "large language model",
];

/// A free-standing "AI" token bounded by non-letters or string edges,
/// checked against the whitespace-collapsed original text.
const STANDALONE_AI: &str = r"(?:^|[^a-zA-Z])AI(?:[^a-zA-Z]|$)";

/// Decides whether a raw "AI" token match is spurious (part of "said",
/// "chair", "maiden", ...) rather than a genuine reference to artificial
/// intelligence.
pub struct FalsePositiveFilter {
    patterns: Vec<Regex>,
    standalone: Regex,
}

impl FalsePositiveFilter {
    pub fn new() -> Result<Self> {
        let patterns = FALSE_POSITIVE_PATTERNS
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let standalone = Regex::new(STANDALONE_AI)?;
        Ok(Self { patterns, standalone })
    }

    /// Returns true when the "AI" in `text` is part of another word.
    ///
    /// A domain-phrase hit always wins over a pattern hit. When a pattern
    /// matches and no domain phrase is present, the match is confirmed only
    /// if no free-standing "AI" token survives whitespace collapsing.
    pub fn is_false_positive(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let lower = text.to_lowercase();
        if !self.patterns.iter().any(|p| p.is_match(&lower)) {
            return false;
        }

        if DOMAIN_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
            return false;
        }

        // The standalone check runs on the original casing: the genuine token
        // is always uppercase in Hansard extracts.
        let collapsed: String = text.split_whitespace().collect();
        !self.standalone.is_match(&collapsed)
    }
}
