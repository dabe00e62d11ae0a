use crate::infra::AppState;
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use imc_evaluation::assessment::sessions::{
    session_router, EvaluationSessionService, SessionRepository,
};
use imc_evaluation::assessment::{
    answer_options, gauge_percent, resolve, AnswerOption, ScoreBand, ScoreRange, Theme,
    ThemeCatalog, ThemeId, ADVISORY_NOTICE, SCORE_MARKERS,
};
use imc_evaluation::directory::{
    filter_evaluations, search_companies, CompanyRecord, DashboardSnapshot, DirectoryProvider,
    EvaluationQuery, EvaluationRecord, Page,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Minutes a respondent typically needs for one 15-question pass.
const ESTIMATED_MINUTES: u8 = 5;

pub(crate) fn with_evaluation_routes<R>(
    service: Arc<EvaluationSessionService<R>>,
    catalog: Arc<ThemeCatalog>,
    directory: Arc<dyn DirectoryProvider>,
) -> axum::Router
where
    R: SessionRepository + 'static,
{
    session_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/themes", axum::routing::get(theme_index_endpoint))
        .route(
            "/api/v1/themes/:theme_id",
            axum::routing::get(theme_detail_endpoint),
        )
        .route(
            "/api/v1/admin/dashboard",
            axum::routing::get(dashboard_endpoint),
        )
        .route(
            "/api/v1/admin/evaluations",
            axum::routing::get(evaluation_list_endpoint),
        )
        .route(
            "/api/v1/admin/evaluations/:evaluation_id",
            axum::routing::get(evaluation_detail_endpoint),
        )
        .route(
            "/api/v1/admin/companies",
            axum::routing::get(company_list_endpoint),
        )
        .layer(Extension(catalog))
        .layer(Extension(directory))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Card-level theme description for the selection screen.
#[derive(Debug, Serialize)]
pub(crate) struct ThemeSummary {
    pub(crate) id: ThemeId,
    pub(crate) title: &'static str,
    pub(crate) short_title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) icon: &'static str,
    pub(crate) gradient: &'static str,
    pub(crate) question_count: usize,
    pub(crate) estimated_minutes: u8,
}

impl ThemeSummary {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            id: theme.id,
            title: theme.title,
            short_title: theme.short_title,
            description: theme.description,
            icon: theme.accent.icon,
            gradient: theme.accent.gradient,
            question_count: theme.question_count(),
            estimated_minutes: ESTIMATED_MINUTES,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryView {
    pub(crate) name: &'static str,
    pub(crate) questions: Vec<&'static str>,
}

/// Full theme payload: summary plus categories, ranges, and the answer
/// scale a client needs to render the questionnaire without the engine.
#[derive(Debug, Serialize)]
pub(crate) struct ThemeDetail {
    #[serde(flatten)]
    pub(crate) summary: ThemeSummary,
    pub(crate) categories: Vec<CategoryView>,
    pub(crate) score_min: u16,
    pub(crate) score_max: u16,
    pub(crate) ranges: Vec<ScoreRange>,
    pub(crate) options: Vec<AnswerOption>,
}

pub(crate) async fn theme_index_endpoint(
    Extension(catalog): Extension<Arc<ThemeCatalog>>,
) -> Json<Vec<ThemeSummary>> {
    let summaries = catalog.themes().iter().map(ThemeSummary::from_theme).collect();
    Json(summaries)
}

pub(crate) async fn theme_detail_endpoint(
    Extension(catalog): Extension<Arc<ThemeCatalog>>,
    Path(theme_id): Path<String>,
) -> Response {
    let Some(theme) = ThemeId::parse(&theme_id).and_then(|id| catalog.theme(id)) else {
        let payload = json!({ "error": format!("unknown theme id '{theme_id}'") });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    let (score_min, score_max) = theme.score_domain();
    let detail = ThemeDetail {
        summary: ThemeSummary::from_theme(theme),
        categories: theme
            .categories
            .iter()
            .map(|category| CategoryView {
                name: category.name,
                questions: category.questions.clone(),
            })
            .collect(),
        score_min,
        score_max,
        ranges: theme.ranges.clone(),
        options: answer_options().to_vec(),
    };
    (StatusCode::OK, Json(detail)).into_response()
}

pub(crate) async fn dashboard_endpoint(
    Extension(directory): Extension<Arc<dyn DirectoryProvider>>,
) -> Json<DashboardSnapshot> {
    Json(directory.dashboard())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluationListParams {
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) theme: Option<String>,
    #[serde(default)]
    pub(crate) level: Option<String>,
    #[serde(default)]
    pub(crate) page: Option<usize>,
}

/// One row of the back-office evaluation list: the record plus its
/// derived level badge.
#[derive(Debug, Serialize)]
pub(crate) struct EvaluationListEntry {
    #[serde(flatten)]
    pub(crate) record: EvaluationRecord,
    pub(crate) level: ScoreBand,
    pub(crate) level_label: &'static str,
}

pub(crate) async fn evaluation_list_endpoint(
    Extension(directory): Extension<Arc<dyn DirectoryProvider>>,
    Query(params): Query<EvaluationListParams>,
) -> Response {
    let theme = match params.theme.as_deref() {
        Some(raw) => match ThemeId::parse(raw) {
            Some(theme_id) => Some(theme_id),
            None => {
                let payload = json!({ "error": format!("unknown theme id '{raw}'") });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
            }
        },
        None => None,
    };
    let band = match params.level.as_deref() {
        Some(raw) => match ScoreBand::parse(raw) {
            Some(band) => Some(band),
            None => {
                let payload = json!({ "error": format!("unknown level '{raw}'") });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
            }
        },
        None => None,
    };

    let query = EvaluationQuery {
        search: params.search,
        theme,
        band,
        page: params.page.unwrap_or(1),
    };
    let page = filter_evaluations(directory.evaluations(), &query);
    let page = Page {
        items: page
            .items
            .into_iter()
            .map(|record| {
                let level = record.band();
                EvaluationListEntry {
                    record,
                    level,
                    level_label: level.label(),
                }
            })
            .collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
    };
    (StatusCode::OK, Json(page)).into_response()
}

/// Detail view resolved the same way as a live results screen, so a
/// stored total yields the same analysis it produced when completed.
#[derive(Debug, Serialize)]
pub(crate) struct EvaluationDetail {
    #[serde(flatten)]
    pub(crate) record: EvaluationRecord,
    pub(crate) theme_title: &'static str,
    pub(crate) level: ScoreBand,
    pub(crate) range_label: &'static str,
    pub(crate) analysis: &'static str,
    pub(crate) recommendations: Vec<&'static str>,
    pub(crate) gauge_percent: f64,
    pub(crate) score_markers: [u16; 5],
    pub(crate) notice: &'static str,
}

pub(crate) async fn evaluation_detail_endpoint(
    Extension(catalog): Extension<Arc<ThemeCatalog>>,
    Extension(directory): Extension<Arc<dyn DirectoryProvider>>,
    Path(evaluation_id): Path<String>,
) -> Response {
    let Some(record) = directory
        .evaluations()
        .into_iter()
        .find(|record| record.id == evaluation_id)
    else {
        let payload = json!({ "error": format!("evaluation '{evaluation_id}' not found") });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    let Some(theme) = catalog.theme(record.theme_id) else {
        let payload = json!({ "error": format!("theme '{}' not in catalog", record.theme_id) });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
    };
    let range = resolve(theme, record.score);

    let detail = EvaluationDetail {
        theme_title: theme.title,
        level: record.band(),
        range_label: range.label,
        analysis: range.analysis,
        recommendations: range.recommendations.clone(),
        gauge_percent: gauge_percent(record.score),
        score_markers: SCORE_MARKERS,
        notice: ADVISORY_NOTICE,
        record,
    };
    (StatusCode::OK, Json(detail)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompanyListParams {
    #[serde(default)]
    pub(crate) search: Option<String>,
}

pub(crate) async fn company_list_endpoint(
    Extension(directory): Extension<Arc<dyn DirectoryProvider>>,
    Query(params): Query<CompanyListParams>,
) -> Json<Vec<CompanyRecord>> {
    Json(search_companies(
        directory.companies(),
        params.search.as_deref(),
    ))
}
