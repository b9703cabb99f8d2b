use crate::error::Result;
use crate::types::{Sentiment, SentimentLabel};
use regex::Regex;
use std::path::Path;

/// One persisted entry: an annotation comment of the shape
/// `// speaker - YYYY-MM-DD - reasoning` immediately followed by a
/// `"EXT-ID": "sentiment"` mapping line.
const ENTRY_PATTERN: &str =
    r#"//\s*(.+?) - (\d{4}-\d{2}-\d{2}) - (.+)\r?\n\s*"([A-F0-9-]+)":\s*"(positive|neutral|negative)""#;

/// Read-only view of the persisted sentiment mapping.
///
/// Entries that do not match the annotated shape are skipped, never fatal.
pub struct SentimentStore {
    labels: Vec<SentimentLabel>,
}

impl SentimentStore {
    /// Parse the annotated mapping format out of arbitrary surrounding text.
    pub fn parse(content: &str) -> Result<Self> {
        let entry = Regex::new(ENTRY_PATTERN)?;
        let labels = entry
            .captures_iter(content)
            .filter_map(|caps| {
                let sentiment = Sentiment::from_store_tag(caps.get(5)?.as_str())?;
                Some(SentimentLabel {
                    ext_id: caps.get(4)?.as_str().to_string(),
                    sentiment,
                    reasoning: caps.get(3)?.as_str().trim().to_string(),
                    speaker: caps.get(1)?.as_str().trim().to_string(),
                    date: caps.get(2)?.as_str().to_string(),
                })
            })
            .collect();
        Ok(Self { labels })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn labels(&self) -> &[SentimentLabel] {
        &self.labels
    }

    pub fn get(&self, ext_id: &str) -> Option<&SentimentLabel> {
        self.labels.iter().find(|l| l.ext_id == ext_id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
export const sentimentMap: Record<string, Sentiment> = {
  // Alan Mak (Opposition) - 2025-02-12 - "Labour's consultation provides the worst of all worlds"
  "FC359FB7-6918-4E90-9883-00EE708797B5": "negative",

  // Peter Kyle (Minister) - 2025-10-30 - Promoting AI plan, "industrial revolution"
  "A6826669-83CA-4078-8C1C-A4CBA8B1F0CD": "positive",

  // a stray comment without the annotated shape
  "DEADBEEF-0000-0000-0000-000000000000": "neutral",

  // Baroness Levitt - 2025-09-09 - New minister, procedural response
  "69E92665-74FB-4A12-B614-B91DFAAD64F3": "neutral",
};
"#;

    #[test]
    fn parses_annotated_entries() {
        let store = SentimentStore::parse(SAMPLE).unwrap();
        assert_eq!(store.len(), 3);

        let first = &store.labels()[0];
        assert_eq!(first.ext_id, "FC359FB7-6918-4E90-9883-00EE708797B5");
        assert_eq!(first.sentiment, Sentiment::Negative);
        assert_eq!(first.speaker, "Alan Mak (Opposition)");
        assert_eq!(first.date, "2025-02-12");
        assert!(first.reasoning.contains("worst of all worlds"));
    }

    #[test]
    fn unannotated_entries_are_skipped() {
        let store = SentimentStore::parse(SAMPLE).unwrap();
        assert!(store.get("DEADBEEF-0000-0000-0000-000000000000").is_none());
        assert!(store.get("69E92665-74FB-4A12-B614-B91DFAAD64F3").is_some());
    }

    #[test]
    fn empty_input_is_an_empty_store() {
        let store = SentimentStore::parse("").unwrap();
        assert!(store.is_empty());
    }
}
