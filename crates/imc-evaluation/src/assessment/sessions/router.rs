use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::assessment::domain::ThemeId;
use crate::assessment::flow::{CompanyProfile, FlowError};
use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::service::{EvaluationSessionService, SessionServiceError, SessionView};

/// Router builder exposing the evaluation wizard over HTTP. Every route
/// addresses one named transition of the session flow.
pub fn session_router<R>(service: Arc<EvaluationSessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(open_handler::<R>))
        .route("/api/v1/evaluations/:session_id", get(get_handler::<R>))
        .route(
            "/api/v1/evaluations/:session_id/theme",
            post(select_theme_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/company",
            post(company_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/answer",
            post(answer_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/advance",
            post(advance_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/retreat",
            post(retreat_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/goto",
            post(goto_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/complete",
            post(complete_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/change-theme",
            post(change_theme_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/back-to-company",
            post(back_to_company_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:session_id/restart",
            post(restart_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenSessionRequest {
    #[serde(default)]
    theme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThemeRequest {
    theme: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    value: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GotoRequest {
    index: usize,
}

pub(crate) async fn open_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    axum::Json(request): axum::Json<OpenSessionRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let theme_id = match request.theme.as_deref() {
        Some(raw) => match ThemeId::parse(raw) {
            Some(theme_id) => Some(theme_id),
            None => return unknown_theme_response(raw),
        },
        None => None,
    };
    match service.start(theme_id) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.get(&SessionId(session_id)))
}

pub(crate) async fn select_theme_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ThemeRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let Some(theme_id) = ThemeId::parse(&request.theme) else {
        return unknown_theme_response(&request.theme);
    };
    respond(service.select_theme(&SessionId(session_id), theme_id))
}

pub(crate) async fn company_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(profile): axum::Json<CompanyProfile>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.submit_company_info(&SessionId(session_id), profile))
}

pub(crate) async fn answer_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.answer(&SessionId(session_id), request.value))
}

pub(crate) async fn advance_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.advance(&SessionId(session_id)))
}

pub(crate) async fn retreat_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.retreat(&SessionId(session_id)))
}

pub(crate) async fn goto_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<GotoRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.jump_to(&SessionId(session_id), request.index))
}

pub(crate) async fn complete_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.complete(&SessionId(session_id)))
}

pub(crate) async fn change_theme_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.change_theme(&SessionId(session_id)))
}

pub(crate) async fn back_to_company_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.back_to_company_info(&SessionId(session_id)))
}

pub(crate) async fn restart_handler<R>(
    State(service): State<Arc<EvaluationSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.restart(&SessionId(session_id)))
}

fn respond(result: Result<SessionView, SessionServiceError>) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn unknown_theme_response(raw: &str) -> Response {
    let payload = json!({
        "error": format!("unknown theme id '{}'", raw.trim()),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn error_response(error: SessionServiceError) -> Response {
    let status = match &error {
        SessionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SessionServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        SessionServiceError::Flow(FlowError::MissingField { .. })
        | SessionServiceError::Flow(FlowError::UnknownTheme { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SessionServiceError::Flow(FlowError::NoThemeSelected)
        | SessionServiceError::Flow(FlowError::InvalidTransition { .. }) => StatusCode::CONFLICT,
        SessionServiceError::Flow(FlowError::Engine(_)) => StatusCode::BAD_REQUEST,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
