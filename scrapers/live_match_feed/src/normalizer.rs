use chrono::{DateTime, FixedOffset};

use crate::types::{Match, RawAnchor, RawId, RawMatch, Stream, TeamInfo};

const LOGO_PATH: &str = "wp-content/uploads/truc-tiep/logos/football/team/";
const STREAM_PATH: &str = "truc-tiep/";
const KICKOFF_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";
/// Asia/Yangon is UTC+06:30 all year round.
const YANGON_OFFSET_SECS: i32 = 6 * 3600 + 30 * 60;

/// Maps an upstream status code to its public label.
pub fn format_status(code: i64) -> String {
    match code {
        0 => "Upcoming".to_string(),
        1..=7 => "Live".to_string(),
        8 => "Finished".to_string(),
        9 => "Cancelled".to_string(),
        10 => "Postponed".to_string(),
        other => format!("Unknown({})", other),
    }
}

fn status_label(status: Option<&RawId>) -> String {
    match status {
        Some(RawId::Number(code)) => format_status(*code),
        // Only the canonical spelling of a code counts; " 3" or "03" do not.
        Some(RawId::Text(text)) => match text.parse::<i64>() {
            Ok(code) if code.to_string() == *text => format_status(code),
            _ => format!("Unknown({})", text),
        },
        None => "Unknown(missing)".to_string(),
    }
}

pub fn format_kickoff(epoch_secs: i64) -> Option<String> {
    let offset = FixedOffset::east_opt(YANGON_OFFSET_SECS)?;
    let instant = DateTime::from_timestamp(epoch_secs, 0)?;
    Some(instant.with_timezone(&offset).format(KICKOFF_FORMAT).to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn format_logo_url(file_name: Option<&str>, base_url: Option<&str>) -> Option<String> {
    let file_name = non_empty(file_name)?;
    let base_url = non_empty(base_url)?;
    Some(format!("{}{}{}", base_url, LOGO_PATH, file_name))
}

pub fn format_stream_url(post_name: Option<&str>, anchor_id: Option<&RawId>, base_url: Option<&str>) -> Option<String> {
    let post_name = non_empty(post_name)?;
    let base_url = non_empty(base_url)?;
    let anchor_id = anchor_id.map(RawId::to_string).unwrap_or_default();
    Some(format!("{}{}{}/?blv={}", base_url, STREAM_PATH, post_name, anchor_id))
}

/// Server names are positional; the upstream commentator behind each
/// anchor is only used to build the link.
fn build_streams(anchors: &[RawAnchor], post_name: Option<&str>, base_url: Option<&str>) -> Vec<Stream> {
    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| Stream {
            server_name: format!("Server {}", index + 1),
            stream_page_url: format_stream_url(post_name, anchor.uid.as_ref(), base_url),
        })
        .collect()
}

pub fn normalize_match(raw: &RawMatch, base_url: &str) -> Match {
    let base_url = Some(base_url);
    let post_name = raw.post_name.as_deref();
    let match_data = raw.match_data.as_ref();
    let anchors = match_data.and_then(|d| d.anchors.as_deref()).unwrap_or_default();

    Match {
        match_id: raw.id.clone(),
        status: status_label(raw.status_id.as_ref()),
        is_hot: matches!(&raw.hot, Some(serde_json::Value::String(hot)) if hot == "1"),
        competition: match_data.and_then(|d| d.competition_full.clone()),
        kickoff_time: raw.time.and_then(format_kickoff),
        home_team: TeamInfo {
            name: raw.home_name.clone(),
            logo_url: format_logo_url(raw.home_logo.as_deref(), base_url),
        },
        away_team: TeamInfo {
            name: raw.away_name.clone(),
            logo_url: format_logo_url(raw.away_logo.as_deref(), base_url),
        },
        streams: build_streams(anchors, post_name, base_url),
    }
}
