use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::answers::AnswerSet;
use crate::catalog::{Gift, Ministry, Question};
use crate::config::Config;
use crate::notify::{dispatch, sinks_from_config, NotificationSink};
use crate::scoring::{ScoringEngine, ScoringOutcome};
use crate::snapshot::{summarize_history, HistorySummary, ResultRecord, SurveyStore};
use crate::survey::{self, ProgressView, SubmitError, Submission};

const DEFAULT_HISTORY_LIMIT: usize = 20;
const MAX_HISTORY_LIMIT: usize = 500;

#[derive(Clone)]
pub struct ApiState {
    config: Arc<Config>,
    engine: ScoringEngine,
    db_path: PathBuf,
    sinks: Arc<Vec<Box<dyn NotificationSink>>>,
}

impl ApiState {
    pub fn new(config: Config, engine: ScoringEngine) -> Self {
        let sinks = sinks_from_config(&config.notifications);
        Self::with_sinks(config, engine, sinks)
    }

    pub fn with_sinks(
        config: Config,
        engine: ScoringEngine,
        sinks: Vec<Box<dyn NotificationSink>>,
    ) -> Self {
        Self {
            db_path: config.resolved_db_path(),
            config: Arc::new(config),
            engine,
            sinks: Arc::new(sinks),
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(error: SubmitError) -> Self {
        match error {
            SubmitError::Incomplete { .. } => Self::bad_request(error.to_string()),
            SubmitError::Store(inner) => Self::internal(format!("{inner:#}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Deserialize)]
struct AnswersRequest {
    #[serde(default)]
    answers: AnswerSet,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct SubmitRequest {
    #[serde(default)]
    allow_incomplete: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct MinistriesQuery {
    gift: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct HistoryQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    catalog_hash: String,
}

#[derive(Debug, Serialize)]
struct ResetResponse {
    member_id: String,
    removed: bool,
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    summary: HistorySummary,
    description: String,
    records: Vec<ResultRecord>,
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/questions", get(list_questions))
        .route("/v1/ministries", get(list_ministries))
        .route("/v1/config", get(show_config))
        .route("/v1/score", post(score))
        .route(
            "/v1/members/:id/progress",
            get(get_progress).put(put_progress).delete(reset_progress),
        )
        .route("/v1/members/:id/submit", post(submit))
        .route("/v1/members/:id/results", get(latest_result))
        .route("/v1/members/:id/history", get(history))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(config: Config, engine: ScoringEngine, bind: SocketAddr) -> Result<()> {
    let app = build_router(ApiState::new(config, engine));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<ApiState>) -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        catalog_hash: state.engine.catalog_hash().to_string(),
    })
}

async fn list_questions(State(state): State<ApiState>) -> Json<ApiResponse<Vec<Question>>> {
    ok(state.engine.catalog().questions.clone())
}

async fn list_ministries(
    State(state): State<ApiState>,
    Query(query): Query<MinistriesQuery>,
) -> ApiResult<Vec<Ministry>> {
    let gift = query
        .gift
        .as_deref()
        .map(str::parse::<Gift>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(ok(state.engine.catalog().ministries_with_gift(gift)))
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config.as_ref().clone())
}

async fn score(
    State(state): State<ApiState>,
    Json(request): Json<AnswersRequest>,
) -> Json<ApiResponse<ScoringOutcome>> {
    ok(state.engine.score(&request.answers))
}

async fn get_progress(
    State(state): State<ApiState>,
    Path(member_id): Path<String>,
) -> ApiResult<ProgressView> {
    let member_id = validate_member(&member_id)?;
    let store = open_store(&state)?;
    let view =
        survey::load_progress(&store, &state.engine, member_id).map_err(ApiError::internal)?;
    Ok(ok(view))
}

async fn put_progress(
    State(state): State<ApiState>,
    Path(member_id): Path<String>,
    Json(request): Json<AnswersRequest>,
) -> ApiResult<ProgressView> {
    let member_id = validate_member(&member_id)?;
    let store = open_store(&state)?;
    let view = survey::save_progress(&store, &state.engine, member_id, request.answers)
        .map_err(ApiError::internal)?;
    Ok(ok(view))
}

async fn reset_progress(
    State(state): State<ApiState>,
    Path(member_id): Path<String>,
) -> ApiResult<ResetResponse> {
    let member_id = validate_member(&member_id)?;
    let store = open_store(&state)?;
    let removed = store
        .reset_progress(member_id)
        .map_err(ApiError::internal)?;
    Ok(ok(ResetResponse {
        member_id: member_id.to_string(),
        removed,
    }))
}

async fn submit(
    State(state): State<ApiState>,
    Path(member_id): Path<String>,
    request: Option<Json<SubmitRequest>>,
) -> ApiResult<Submission> {
    let member_id = validate_member(&member_id)?;
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let submission = {
        let store = open_store(&state)?;
        survey::submit(
            &store,
            &state.engine,
            member_id,
            request.allow_incomplete,
            &state.config.notifications.rules,
        )?
    };
    dispatch(&state.sinks, &submission.notifications).await;
    Ok(ok(submission))
}

async fn latest_result(
    State(state): State<ApiState>,
    Path(member_id): Path<String>,
) -> ApiResult<ResultRecord> {
    let member_id = validate_member(&member_id)?;
    let store = open_store(&state)?;
    match store.latest_result(member_id).map_err(ApiError::internal)? {
        Some(record) => Ok(ok(record)),
        None => Err(ApiError::not_found(format!(
            "no submitted results for member {member_id}"
        ))),
    }
}

async fn history(
    State(state): State<ApiState>,
    Path(member_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<HistoryResponse> {
    let member_id = validate_member(&member_id)?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT);
    let store = open_store(&state)?;
    let records = store
        .load_history(member_id, limit)
        .map_err(ApiError::internal)?;
    let summary = summarize_history(&records);
    Ok(ok(HistoryResponse {
        description: summary.describe(),
        summary,
        records,
    }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn open_store(state: &ApiState) -> std::result::Result<SurveyStore, ApiError> {
    SurveyStore::open(&state.db_path).map_err(|e| ApiError::internal(format!("{e:#}")))
}

fn validate_member(raw: &str) -> std::result::Result<&str, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request("member id cannot be blank"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::validate_member;

    #[test]
    fn rejects_blank_member_ids() {
        assert!(validate_member("  ").is_err());
        assert_eq!(validate_member(" m-17 ").expect("valid"), "m-17");
    }
}
