use crate::types::{Match, MatchPage};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Query string parameters, kept as raw strings so malformed numbers fall
/// back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchQuery {
    pub status: Option<String>,
    pub hot: Option<String>,
    pub league: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl MatchQuery {
    /// Builds a query from raw key/value pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut query.status,
                "hot" => &mut query.hot,
                "league" => &mut query.league,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Only hot matches; every other filter parameter is ignored.
    HotOnly,
    General,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn filter_matches(matches: Vec<Match>, query: &MatchQuery, mode: FilterMode) -> Vec<Match> {
    if mode == FilterMode::HotOnly {
        return matches.into_iter().filter(|m| m.is_hot).collect();
    }

    let status = non_empty(&query.status).map(str::to_lowercase);
    let hot = non_empty(&query.hot);
    let league = non_empty(&query.league).map(str::to_lowercase);

    matches
        .into_iter()
        .filter(|m| status.as_ref().map_or(true, |s| m.status.to_lowercase() == *s))
        .filter(|m| hot.map_or(true, |h| m.is_hot.to_string() == h))
        .filter(|m| {
            league.as_ref().map_or(true, |l| {
                m.competition
                    .as_ref()
                    .is_some_and(|c| c.to_lowercase().contains(l.as_str()))
            })
        })
        .collect()
}

/// Reads the leading integer of `raw` the way a lenient form parser would:
/// `"3"`, `" 3"` and `"3abc"` all give 3. Missing, non-numeric and zero
/// values give `default`.
pub fn parse_positive_or(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => default,
        Ok(value) => sign * value,
    }
}

/// `ceil(total / limit)` for a non-negative `total`. Integer division
/// already rounds toward zero, which is the ceiling for a negative `limit`.
fn ceil_div(total: i64, limit: i64) -> i64 {
    if limit == 0 {
        return 0;
    }
    let quotient = total / limit;
    if limit > 0 && total % limit != 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Resolves a slice bound against `len`; negative bounds count back from the end.
fn slice_bound(index: i64, len: i64) -> i64 {
    if index < 0 {
        len.saturating_add(index).max(0)
    } else {
        index.min(len)
    }
}

pub fn paginate(matches: Vec<Match>, page: i64, limit: i64, source_domain: &str) -> MatchPage {
    let total_items = matches.len();
    let total = total_items as i64;
    let total_pages = ceil_div(total, limit);

    let start = slice_bound(page.saturating_sub(1).saturating_mul(limit), total);
    let end = slice_bound(page.saturating_mul(limit), total);
    let data = if start < end {
        matches
            .into_iter()
            .skip(start as usize)
            .take((end - start) as usize)
            .collect()
    } else {
        Vec::new()
    };

    MatchPage {
        total_items,
        total_pages,
        current_page: page,
        items_per_page: limit,
        source_domain: source_domain.to_string(),
        data,
    }
}

pub fn apply_query(matches: Vec<Match>, query: &MatchQuery, mode: FilterMode, source_domain: &str) -> MatchPage {
    let page = parse_positive_or(query.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_positive_or(query.limit.as_deref(), DEFAULT_LIMIT);
    paginate(filter_matches(matches, query, mode), page, limit, source_domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawId, TeamInfo};
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "https://example.com/";

    fn team(name: &str) -> TeamInfo {
        TeamInfo {
            name: Some(name.to_string()),
            logo_url: None,
        }
    }

    fn make_match(id: i64, status: &str, is_hot: bool, competition: Option<&str>) -> Match {
        Match {
            match_id: Some(RawId::Number(id)),
            status: status.to_string(),
            is_hot,
            competition: competition.map(str::to_string),
            kickoff_time: None,
            home_team: team("Home"),
            away_team: team("Away"),
            streams: vec![],
        }
    }

    fn fixture() -> Vec<Match> {
        vec![
            make_match(1, "Live", true, Some("English Premier League")),
            make_match(2, "Upcoming", false, Some("La Liga")),
            make_match(3, "Live", false, Some("premier league 2")),
            make_match(4, "Finished", true, None),
            make_match(5, "Unknown(12)", false, Some("Serie A")),
        ]
    }

    fn ids(matches: &[Match]) -> Vec<i64> {
        matches
            .iter()
            .map(|m| match m.match_id {
                Some(RawId::Number(n)) => n,
                _ => -1,
            })
            .collect()
    }

    fn numbered(count: i64) -> Vec<Match> {
        (0..count).map(|i| make_match(i, "Live", false, None)).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let filtered = filter_matches(fixture(), &MatchQuery::default(), FilterMode::General);
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_status_filter_is_case_insensitive_exact() {
        let query = MatchQuery {
            status: Some("LIVE".to_string()),
            ..MatchQuery::default()
        };
        assert_eq!(ids(&filter_matches(fixture(), &query, FilterMode::General)), vec![1, 3]);

        let query = MatchQuery {
            status: Some("liv".to_string()),
            ..MatchQuery::default()
        };
        assert!(filter_matches(fixture(), &query, FilterMode::General).is_empty());
    }

    #[test]
    fn test_hot_filter_compares_boolean_text() {
        let query = MatchQuery {
            hot: Some("false".to_string()),
            ..MatchQuery::default()
        };
        assert_eq!(ids(&filter_matches(fixture(), &query, FilterMode::General)), vec![2, 3, 5]);

        let query = MatchQuery {
            hot: Some("1".to_string()),
            ..MatchQuery::default()
        };
        assert!(filter_matches(fixture(), &query, FilterMode::General).is_empty());
    }

    #[test]
    fn test_league_filter_is_substring() {
        let query = MatchQuery {
            league: Some("Premier".to_string()),
            ..MatchQuery::default()
        };
        assert_eq!(ids(&filter_matches(fixture(), &query, FilterMode::General)), vec![1, 3]);
    }

    #[test]
    fn test_filters_combine() {
        let query = MatchQuery {
            status: Some("live".to_string()),
            hot: Some("true".to_string()),
            league: Some("premier".to_string()),
            ..MatchQuery::default()
        };
        assert_eq!(ids(&filter_matches(fixture(), &query, FilterMode::General)), vec![1]);
    }

    #[test]
    fn test_empty_parameters_are_ignored() {
        let query = MatchQuery {
            status: Some(String::new()),
            league: Some(String::new()),
            ..MatchQuery::default()
        };
        assert_eq!(filter_matches(fixture(), &query, FilterMode::General).len(), 5);
    }

    #[test]
    fn test_hot_only_ignores_other_filters() {
        let query = MatchQuery {
            status: Some("Upcoming".to_string()),
            hot: Some("false".to_string()),
            league: Some("La Liga".to_string()),
            ..MatchQuery::default()
        };
        assert_eq!(ids(&filter_matches(fixture(), &query, FilterMode::HotOnly)), vec![1, 4]);
    }

    #[test]
    fn test_parse_positive_or() {
        assert_eq!(parse_positive_or(None, 10), 10);
        assert_eq!(parse_positive_or(Some("3"), 10), 3);
        assert_eq!(parse_positive_or(Some(" 7"), 10), 7);
        assert_eq!(parse_positive_or(Some("4abc"), 10), 4);
        assert_eq!(parse_positive_or(Some("abc"), 10), 10);
        assert_eq!(parse_positive_or(Some(""), 10), 10);
        assert_eq!(parse_positive_or(Some("0"), 10), 10);
        assert_eq!(parse_positive_or(Some("-2"), 10), -2);
        assert_eq!(parse_positive_or(Some("+6"), 10), 6);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let page = paginate(numbered(25), 3, 10, SOURCE);

        assert_eq!(page.total_items, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items_per_page, 10);
        assert_eq!(page.source_domain, SOURCE);
        assert_eq!(ids(&page.data), vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let page = paginate(numbered(25), 5, 10, SOURCE);
        assert_eq!(page.total_pages, 3);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_paginate_negative_limit() {
        let page = paginate(numbered(25), 1, -5, SOURCE);
        assert_eq!(page.total_pages, -5);
        assert_eq!(ids(&page.data), (0..20).collect::<Vec<_>>());

        let page = paginate(numbered(24), 2, -5, SOURCE);
        assert_eq!(page.total_pages, -4);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_paginate_negative_page_counts_from_end() {
        let page = paginate(numbered(25), -1, 10, SOURCE);
        assert_eq!(page.total_pages, 3);
        assert_eq!(ids(&page.data), (5..15).collect::<Vec<_>>());

        let page = paginate(numbered(25), -5, 10, SOURCE);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_paginate_huge_limit() {
        let page = paginate(numbered(3), 1, i64::MAX, SOURCE);
        assert_eq!(page.total_pages, 1);
        assert_eq!(ids(&page.data), vec![0, 1, 2]);

        let page = paginate(numbered(3), 2, i64::MAX, SOURCE);
        assert_eq!(page.total_pages, 1);
        assert!(page.data.is_empty());

        let query = MatchQuery {
            limit: Some("9223372036854775807".to_string()),
            ..MatchQuery::default()
        };
        let page = apply_query(numbered(3), &query, FilterMode::General, SOURCE);
        assert_eq!(page.items_per_page, i64::MAX);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.data.len(), 3);
    }

    #[test]
    fn test_from_pairs_keeps_first_value() {
        let query = MatchQuery::from_pairs(vec![
            ("page".to_string(), "1".to_string()),
            ("page".to_string(), "2".to_string()),
            ("league".to_string(), "liga".to_string()),
            ("sort".to_string(), "asc".to_string()),
        ]);
        assert_eq!(query.page.as_deref(), Some("1"));
        assert_eq!(query.league.as_deref(), Some("liga"));
        assert_eq!(query.status, None);
        assert_eq!(query.limit, None);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::new(), 1, 10, SOURCE);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_apply_query_paginates_filtered_set() {
        let mut matches = numbered(25);
        for m in matches.iter_mut().take(12) {
            m.is_hot = true;
        }
        let query = MatchQuery {
            page: Some("2".to_string()),
            limit: Some("5".to_string()),
            ..MatchQuery::default()
        };

        let page = apply_query(matches, &query, FilterMode::HotOnly, SOURCE);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(ids(&page.data), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_apply_query_defaults() {
        let page = apply_query(numbered(25), &MatchQuery::default(), FilterMode::General, SOURCE);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items_per_page, 10);
        assert_eq!(ids(&page.data), (0..10).collect::<Vec<_>>());
    }
}
