use crate::config::{Config, SortOrder};
use crate::error::{Error, Result};
use crate::types::Mention;
use async_stream::stream;
use futures::Stream;
use jwalk::WalkDir;
use std::path::PathBuf;

/// Streams mention records out of a directory of JSON batch shards.
///
/// Discovery runs in a blocking thread pool (jwalk is fast but synchronous),
/// parsing happens per shard as the stream is consumed.
pub struct BatchProcessor {
    config: Config,
}

impl BatchProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process batch shards and return a reactive stream of mentions.
    pub fn process(&self) -> impl Stream<Item = Result<Mention>> {
        let config = self.config.clone();
        let config_for_discovery = config.clone();
        Box::pin(stream! {
            let files = match tokio::task::spawn_blocking(move || {
                Self::discover_shards(&config_for_discovery)
            }).await {
                Ok(Ok(files)) => files,
                Ok(Err(e)) => {
                    yield Err(e);
                    return;
                }
                Err(e) => {
                    yield Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Task join error: {}", e)
                    )));
                    return;
                }
            };

            for file in files {
                match Self::read_shard(&file).await {
                    Ok(mentions) => {
                        for mention in mentions {
                            yield Ok(mention);
                        }
                    }
                    Err(e) => yield Err(e),
                }
            }
        })
    }

    /// Convenience wrapper collecting the whole stream, skipping shards that
    /// fail to parse.
    pub async fn collect_mentions(&self) -> Result<Vec<Mention>> {
        use futures::StreamExt;
        let mut mentions = Vec::new();
        let mut stream = self.process();
        while let Some(item) = stream.next().await {
            match item {
                Ok(mention) => mentions.push(mention),
                Err(Error::Json(e)) => {
                    eprintln!("Warning: skipping malformed shard entry: {}", e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(mentions)
    }

    /// Discover all JSON shards, sorted by filename for deterministic
    /// ordering, with the configured order and limit applied.
    fn discover_shards(config: &Config) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry_result in WalkDir::new(&config.batch_dir).into_iter() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(_) => continue,
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().map(|ext| ext == "json").unwrap_or(false) {
                files.push(path);
            }
        }

        files.sort();
        if config.sort_order == SortOrder::Descending {
            files.reverse();
        }

        if let Some(limit) = config.limit {
            files.truncate(limit);
        }

        Ok(files)
    }

    /// Read and parse a single shard into its mention records.
    async fn read_shard(path: &PathBuf) -> Result<Vec<Mention>> {
        let content = tokio::fs::read_to_string(path).await?;
        let mentions: Vec<Mention> = serde_json::from_str(&content)?;
        Ok(mentions)
    }
}
