use crate::error::{Error, Result};
use std::path::PathBuf;

/// Sort order for batch shards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "DESC" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Configuration for the batch processor
#[derive(Debug, Clone)]
pub struct Config {
    pub batch_dir: PathBuf,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
}

impl Config {
    /// Create a new default configuration
    pub fn new(batch_dir: impl Into<PathBuf>) -> Self {
        Self {
            batch_dir: batch_dir.into(),
            sort_order: SortOrder::Ascending,
            limit: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.batch_dir.exists() {
            return Err(Error::Config(format!(
                "Batch directory does not exist: {}",
                self.batch_dir.display()
            )));
        }

        if !self.batch_dir.is_dir() {
            return Err(Error::Config(format!(
                "Batch directory is not a directory: {}",
                self.batch_dir.display()
            )));
        }

        Ok(())
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new(batch_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(batch_dir),
        }
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.config.sort_order = order;
        self
    }

    pub fn sort_order_str(mut self, order: &str) -> Self {
        self.config.sort_order = SortOrder::from(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    pub fn no_limit(mut self) -> Self {
        self.config.limit = None;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
