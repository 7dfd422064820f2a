use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::types::RawMatch;

pub const PAYLOAD_SELECTOR: &str = "#matches-data";

/// Pulls the raw match list out of the page's `#matches-data` script.
pub fn extract_matches(html: &str) -> Result<Vec<RawMatch>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(PAYLOAD_SELECTOR)?;

    let payload = document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|text| !text.is_empty())
        .ok_or(FeedError::PayloadMissing)?;

    debug!("Found matches payload ({} bytes)", payload.len());
    let matches: Vec<RawMatch> = serde_json::from_str(&payload)?;
    Ok(matches)
}
