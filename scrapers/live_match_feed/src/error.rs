use scraper::error::SelectorErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Every candidate source failed; nothing was fetched.
    #[error("All source domains failed ({attempts} attempted): {last_error}")]
    SourceExhausted { attempts: usize, last_error: String },

    /// The page was fetched but has no `#matches-data` element.
    #[error("Matches data script not found on the page")]
    PayloadMissing,

    #[error("Matches data is not valid JSON: {0}")]
    PayloadMalformed(#[from] serde_json::Error),

    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl<'a> From<SelectorErrorKind<'a>> for FeedError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        FeedError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
