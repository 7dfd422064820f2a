use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Upstream ids show up as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Reads a field that may be missing or carry an unexpected JSON type.
/// Anything that does not deserialize as `T` becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keeps one entry per upstream anchor even when an entry is malformed, so
/// stream numbering always lines up with the upstream list.
fn lenient_anchors<'de, D>(deserializer: D) -> Result<Option<Vec<RawAnchor>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<serde_json::Value>> = lenient(deserializer)?;
    Ok(entries.map(|entries| {
        entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect()
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAnchor {
    #[serde(default, deserialize_with = "lenient")]
    pub uid: Option<RawId>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMatchData {
    #[serde(default, deserialize_with = "lenient")]
    pub competition_full: Option<String>,
    #[serde(default, deserialize_with = "lenient_anchors")]
    pub anchors: Option<Vec<RawAnchor>>,
}

/// One entry of the `#matches-data` array, as published upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMatch {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient")]
    pub status_id: Option<RawId>,
    /// Only the string `"1"` marks a hot match, so the raw value is kept as-is.
    #[serde(default)]
    pub hot: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub home_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub home_logo: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_logo: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub post_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub match_data: Option<RawMatchData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub server_name: String,
    pub stream_page_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: Option<RawId>,
    pub status: String,
    pub is_hot: bool,
    pub competition: Option<String>,
    /// Pre-rendered in Asia/Yangon local time; not meant to be parsed back.
    pub kickoff_time: Option<String>,
    pub home_team: TeamInfo,
    pub away_team: TeamInfo,
    pub streams: Vec<Stream>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPage {
    pub total_items: usize,
    pub total_pages: i64,
    pub current_page: i64,
    pub items_per_page: i64,
    pub source_domain: String,
    pub data: Vec<Match>,
}
