use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::super::domain::DocumentRecord;
use super::super::draft::{render_draft, DraftStatus};
use super::super::draft_review::draft_review;
use super::super::quality::{
    auto_fix_suggestions, generate_report, Severity, SystemClock, ThreadRandom,
};
use super::repository::KeyValueStore;
use super::service::{ArchiveError, DisclosureArchive};

const MARKDOWN: &str = "text/markdown; charset=utf-8";

#[derive(Debug, Deserialize)]
pub(crate) struct DraftRequest {
    pub(crate) record: DocumentRecord,
    #[serde(default)]
    pub(crate) status: Option<DraftStatus>,
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

/// Catalogue entry for a registered rule.
#[derive(Debug, Serialize)]
pub(crate) struct RuleSummary {
    pub(crate) id: &'static str,
    pub(crate) category: &'static str,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) severity: Severity,
    pub(crate) suggestion: &'static str,
}

/// Router builder exposing checking, drafting and archive endpoints.
pub fn disclosure_router<S>(service: Arc<DisclosureArchive<S>>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route("/api/v1/disclosure/rules", get(rules_handler::<S>))
        .route("/api/v1/disclosure/check", post(check_handler::<S>))
        .route("/api/v1/disclosure/check/report", post(report_handler::<S>))
        .route("/api/v1/disclosure/autofix", post(autofix_handler::<S>))
        .route("/api/v1/disclosure/draft", post(draft_handler))
        .route("/api/v1/disclosure/draft/review", post(draft_review_handler))
        .route(
            "/api/v1/disclosure/draft/current",
            get(load_draft_handler::<S>).put(save_draft_handler::<S>),
        )
        .route(
            "/api/v1/disclosure/documents",
            get(list_documents_handler::<S>).post(save_document_handler::<S>),
        )
        .route(
            "/api/v1/disclosure/documents/:document_id",
            get(document_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn rules_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let catalogue: Vec<RuleSummary> = service
        .checker()
        .registry()
        .rules()
        .iter()
        .flat_map(|group| {
            group.rules.iter().map(move |rule| RuleSummary {
                id: rule.id,
                category: group.category.key(),
                name: rule.name,
                description: rule.description,
                severity: rule.severity,
                suggestion: rule.suggestion,
            })
        })
        .collect();
    (StatusCode::OK, Json(catalogue)).into_response()
}

pub(crate) async fn check_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
    Json(record): Json<DocumentRecord>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    (StatusCode::OK, Json(service.check(&record))).into_response()
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
    Json(record): Json<DocumentRecord>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let report = service.check(&record);
    markdown(generate_report(&report))
}

pub(crate) async fn autofix_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
    Json(record): Json<DocumentRecord>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let suggestions = auto_fix_suggestions(
        &record,
        service.id_prefix(),
        &SystemClock,
        &mut ThreadRandom,
    );
    (StatusCode::OK, Json(suggestions)).into_response()
}

pub(crate) async fn draft_handler(Json(request): Json<DraftRequest>) -> Response {
    let status = request.status.unwrap_or(DraftStatus::Draft);
    let date = request
        .date
        .unwrap_or_else(|| Local::now().date_naive());
    markdown(render_draft(&request.record, status, date))
}

/// Accepts the Markdown draft as the raw request body.
pub(crate) async fn draft_review_handler(markdown: String) -> Response {
    (StatusCode::OK, Json(draft_review(&markdown))).into_response()
}

pub(crate) async fn save_draft_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
    Json(record): Json<DocumentRecord>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.save_draft(&record) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn load_draft_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.load_draft() {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => not_found("no draft saved"),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn save_document_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
    Json(record): Json<DocumentRecord>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let today = Local::now().date_naive();
    match service.save_document(record, today) {
        Ok(document) => (StatusCode::CREATED, Json(document.entry)).into_response(),
        Err(ArchiveError::NotReady { failed }) => {
            let payload = json!({
                "error": "document is not ready to save",
                "failed_rules": failed,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn list_documents_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.list_documents() {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn document_handler<S>(
    State(service): State<Arc<DisclosureArchive<S>>>,
    Path(document_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.load_document(&document_id) {
        Ok(Some(document)) => markdown(document.markdown),
        Ok(None) => not_found(&format!("document {document_id} not found")),
        Err(error) => internal_error(error),
    }
}

fn markdown(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, MARKDOWN)], body).into_response()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

fn internal_error(error: ArchiveError) -> Response {
    tracing::error!(%error, "archive request failed");
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
