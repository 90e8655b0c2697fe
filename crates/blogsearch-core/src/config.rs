//! Deployment configuration for the search page.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Configuration binding the page to one hosted search application.
///
/// All values are compile-time constants in a deployment; validation here is a
/// convenience only. The hosted service remains the authority on whether the
/// credentials and index name are actually valid, and rejects them at the
/// first query if they are not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Hosted search application identifier.
    pub app_id: String,

    /// Search-only API key authorizing read-only queries.
    pub api_key: String,

    /// Name of the logical document collection to search.
    pub index_name: String,

    /// Result page size.
    #[serde(default = "default_hits_per_page")]
    pub hits_per_page: usize,

    /// Whether click events are forwarded to the analytics sink.
    #[serde(default = "default_true")]
    pub insights: bool,
}

// Default value functions
fn default_hits_per_page() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl SearchConfig {
    /// Create a configuration with the default page size.
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            index_name: index_name.into(),
            hits_per_page: default_hits_per_page(),
            insights: true,
        }
    }

    /// Override the page size.
    pub fn with_hits_per_page(mut self, hits_per_page: usize) -> Self {
        self.hits_per_page = hits_per_page;
        self
    }

    /// Disable analytics event forwarding.
    pub fn without_insights(mut self) -> Self {
        self.insights = false;
        self
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(CoreError::config("app_id cannot be empty"));
        }

        if self.api_key.is_empty() {
            return Err(CoreError::config("api_key cannot be empty"));
        }

        if self.index_name.is_empty() {
            return Err(CoreError::config("index_name cannot be empty"));
        }

        if self.hits_per_page == 0 {
            return Err(CoreError::config("hits_per_page must be at least 1"));
        }

        Ok(())
    }
}
