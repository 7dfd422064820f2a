use std::time::Duration;
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::error::{FeedError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub html: String,
    /// The candidate that served `html`; used as the base for logo and stream links.
    pub base_url: String,
}

/// Fetches the listing page from the first candidate domain that answers.
///
/// Candidates are tried strictly in order, one at a time. Later domains are
/// mirrors used only when earlier ones fail.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
    domains: Vec<String>,
}

impl SourceFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            domains: config.domains.clone(),
        })
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    async fn fetch_one(&self, domain: &str) -> std::result::Result<String, reqwest::Error> {
        let response = self.client.get(domain).send().await?.error_for_status()?;
        response.text().await
    }

    pub async fn fetch(&self) -> Result<FetchedPage> {
        let mut last_error = String::from("no source domains configured");

        for domain in &self.domains {
            info!("Trying to fetch from: {}", domain);
            match self.fetch_one(domain).await {
                Ok(html) => {
                    info!("Successfully fetched from: {} ({} bytes)", domain, html.len());
                    return Ok(FetchedPage {
                        html,
                        base_url: domain.clone(),
                    });
                }
                Err(e) => {
                    warn!("Failed to fetch from {}: {}", domain, e);
                    last_error = e.to_string();
                }
            }
        }

        Err(FeedError::SourceExhausted {
            attempts: self.domains.len(),
            last_error,
        })
    }
}
