use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_SOURCE_DOMAINS: &[&str] = &["https://www.bayaerial.com/", "https://moralheroes.org/"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Candidate base URLs, tried in order. Each ends with `/`.
    pub domains: Vec<String>,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            domains: DEFAULT_SOURCE_DOMAINS.iter().map(|d| d.to_string()).collect(),
            user_agent: "Mozilla/5.0 (compatible; LiveMatchFeed/1.0)".to_string(),
            request_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    pub server: ServerConfig,
    pub sources: SourceConfig,
}

impl FeedConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("FEED_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env::var("FEED_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            config.server.port = port;
        }
        if let Ok(domains) = env::var("SOURCE_DOMAINS") {
            let domains = parse_domains(&domains);
            if !domains.is_empty() {
                config.sources.domains = domains;
            }
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.sources.user_agent = user_agent;
        }
        if let Some(timeout) = env::var("SOURCE_TIMEOUT_SECS").ok().and_then(|t| t.parse::<u64>().ok()) {
            config.sources.request_timeout_secs = timeout;
        }

        config
    }
}

/// Splits a comma separated domain list, dropping blanks and making sure
/// every entry ends with a slash so path templates can be appended directly.
pub fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            if d.ends_with('/') {
                d.to_string()
            } else {
                format!("{}/", d)
            }
        })
        .collect()
}
