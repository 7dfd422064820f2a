use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    config::FeedConfig,
    error::FeedError,
    extractor::extract_matches,
    fetcher::SourceFetcher,
    normalizer::normalize_match,
    query::{apply_query, FilterMode, MatchQuery},
    types::{Match, MatchPage},
};

const NOT_FOUND_MESSAGE: &str = "Matches data script not found on the page.";
const FAILURE_MESSAGE: &str = "Failed to fetch or process data from all sources.";

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<SourceFetcher>,
}

impl AppState {
    pub fn new(fetcher: SourceFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Wraps a pipeline failure so handlers can return it with `?`.
#[derive(Debug)]
pub struct ApiError(pub FeedError);

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Error processing request: {}", self.0);
        let (status, body) = match self.0 {
            FeedError::PayloadMissing => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: NOT_FOUND_MESSAGE,
                    details: None,
                },
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: FAILURE_MESSAGE,
                    details: Some(other.to_string()),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

async fn load_matches(fetcher: &SourceFetcher, query: &MatchQuery, mode: FilterMode) -> Result<MatchPage, FeedError> {
    let page = fetcher.fetch().await?;
    let raw_matches = extract_matches(&page.html)?;
    let matches: Vec<Match> = raw_matches
        .iter()
        .map(|raw| normalize_match(raw, &page.base_url))
        .collect();
    Ok(apply_query(matches, query, mode, &page.base_url))
}

#[axum::debug_handler]
pub async fn matches_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<MatchPage>, ApiError> {
    let query = MatchQuery::from_pairs(params);
    let page = load_matches(&state.fetcher, &query, FilterMode::General).await?;
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn hot_matches_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<MatchPage>, ApiError> {
    let query = MatchQuery::from_pairs(params);
    let page = load_matches(&state.fetcher, &query, FilterMode::HotOnly).await?;
    Ok(Json(page))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/matches", get(matches_handler))
        .route("/api/matches/hot", get(hot_matches_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}

pub async fn serve(config: FeedConfig) -> anyhow::Result<()> {
    let fetcher = SourceFetcher::new(&config.sources)?;
    info!("Source domains: {:?}", fetcher.domains());
    let app = router(AppState::new(fetcher));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
