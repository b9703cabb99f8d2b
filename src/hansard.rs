use crate::error::Result;
use crate::types::{Mention, MentionType};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_BASE_URL: &str = "https://hansard-api.parliament.uk";

/// Public search page for a single contribution.
pub fn debate_url(ext_id: &str) -> String {
    format!(
        "https://hansard.parliament.uk/search/Contributions?contributionExtId={}",
        ext_id
    )
}

/// Page size used by the Hansard search endpoint.
const PAGE_SIZE: usize = 20;
/// The API stops paginating reliably past this offset.
const MAX_SKIP: usize = 500;

/// One contribution as returned by the Hansard search API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HansardContribution {
    #[serde(default)]
    pub contribution_ext_id: Option<String>,
    #[serde(default)]
    pub contribution_text: String,
    #[serde(default)]
    pub debate_section: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    #[serde(default)]
    total_contributions: usize,
    #[serde(default)]
    contributions: Vec<HansardContribution>,
}

/// Blocking client for the Hansard search API. Call from `spawn_blocking`
/// when inside the async runtime.
pub struct HansardClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HansardClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: reqwest::blocking::Client::builder()
                .user_agent(concat!("hansardbot/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut client = Self::new()?;
        client.base_url = base_url.into();
        Ok(client)
    }

    /// Fetch every contribution matching the quoted search term, paginated.
    pub fn search_mentions(&self, term: &str, start_date: &str) -> Result<Vec<Mention>> {
        let mention_type = mention_type_for_term(term);
        let quoted = format!("\"{}\"", term);
        let mut mentions = Vec::new();

        let mut skip = 0;
        loop {
            let response: SearchResponse = self
                .http
                .get(format!("{}/search.json", self.base_url))
                .query(&[
                    ("queryParameters.searchTerm", quoted.as_str()),
                    ("queryParameters.startDate", start_date),
                    ("queryParameters.take", &PAGE_SIZE.to_string()),
                    ("queryParameters.skip", &skip.to_string()),
                    ("queryParameters.orderBy", "SittingDateDesc"),
                ])
                .send()?
                .error_for_status()?
                .json()?;

            let page_len = response.contributions.len();
            mentions.extend(
                response
                    .contributions
                    .into_iter()
                    .filter_map(|c| contribution_to_mention(c, mention_type)),
            );

            skip += PAGE_SIZE;
            if page_len < PAGE_SIZE
                || skip >= MAX_SKIP
                || mentions.len() >= response.total_contributions
            {
                break;
            }
        }

        Ok(mentions)
    }
}

/// The spelled-out search term is never ambiguous; anything else is treated
/// as the short form.
fn mention_type_for_term(term: &str) -> MentionType {
    if term.to_lowercase().contains("artificial intelligence") {
        MentionType::ArtificialIntelligence
    } else {
        MentionType::Ai
    }
}

fn contribution_to_mention(
    contribution: HansardContribution,
    mention_type: MentionType,
) -> Option<Mention> {
    let ext_id = contribution.contribution_ext_id?;
    Some(Mention {
        contribution_ext_id: ext_id,
        context_text: contribution.contribution_text,
        debate_title: contribution.debate_section,
        mention_type,
    })
}

/// Write mentions as numbered batch shards (`batch_01.json`, ...) of
/// `batch_size` records each.
pub fn write_shards(mentions: &[Mention], dir: &Path, batch_size: usize) -> Result<usize> {
    std::fs::create_dir_all(dir)?;
    let mut written = 0;
    for (i, chunk) in mentions.chunks(batch_size.max(1)).enumerate() {
        let path = dir.join(format!("batch_{:02}.json", i + 1));
        let json = serde_json::to_string_pretty(chunk)?;
        std::fs::write(path, json)?;
        written += 1;
    }
    Ok(written)
}
