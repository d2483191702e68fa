use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{FieldUpdate, FileField, FileHandle};
use super::service::{ApplicationFormService, ApplicationServiceError, SessionId};
use super::steps;
use super::submission::{SubmissionGateway, SubmitOutcome};

/// Router builder exposing the stepper over HTTP.
pub fn application_router<G>(service: Arc<ApplicationFormService<G>>) -> Router
where
    G: SubmissionGateway + 'static,
{
    Router::new()
        .route("/api/v1/steps", get(steps_handler))
        .route("/api/v1/applications", post(open_handler::<G>))
        .route(
            "/api/v1/applications/:session_id",
            get(view_handler::<G>),
        )
        .route(
            "/api/v1/applications/:session_id/fields",
            patch(update_field_handler::<G>),
        )
        .route(
            "/api/v1/applications/:session_id/files/:field",
            post(add_files_handler::<G>),
        )
        .route(
            "/api/v1/applications/:session_id/files/:field/:index",
            delete(remove_file_handler::<G>),
        )
        .route(
            "/api/v1/applications/:session_id/advance",
            post(advance_handler::<G>),
        )
        .route(
            "/api/v1/applications/:session_id/back",
            post(back_handler::<G>),
        )
        .route(
            "/api/v1/applications/:session_id/submit",
            post(submit_handler::<G>),
        )
        .with_state(service)
}

pub(crate) async fn steps_handler() -> Response {
    (StatusCode::OK, Json(steps::overview())).into_response()
}

pub(crate) async fn open_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    match service.open() {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    match service.view(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_field_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
    Path(session_id): Path<String>,
    Json(update): Json<FieldUpdate>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    let update = match update {
        FieldUpdate::Files { field, files } => FieldUpdate::Files {
            field,
            files: guess_media_types(files),
        },
        other => other,
    };

    match service.update_field(&SessionId(session_id), update) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn add_files_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
    Path((session_id, field)): Path<(String, String)>,
    Json(files): Json<Vec<FileHandle>>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    let field = match field.parse::<FileField>() {
        Ok(field) => field,
        Err(err) => return not_found(err.to_string()),
    };

    match service.add_files(&SessionId(session_id), field, guess_media_types(files)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_file_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
    Path((session_id, field, index)): Path<(String, String, usize)>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    let field = match field.parse::<FileField>() {
        Ok(field) => field,
        Err(err) => return not_found(err.to_string()),
    };

    match service.remove_file(&SessionId(session_id), field, index) {
        Ok(removal) => (StatusCode::OK, Json(removal)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn advance_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    match service.advance(&SessionId(session_id)) {
        Ok(navigation) => (StatusCode::OK, Json(navigation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn back_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    match service.back(&SessionId(session_id)) {
        Ok(navigation) => (StatusCode::OK, Json(navigation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<ApplicationFormService<G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    G: SubmissionGateway + 'static,
{
    let result = match service.submit(&SessionId(session_id)) {
        Ok(result) => result,
        Err(err) => return error_response(err),
    };

    match result.outcome {
        SubmitOutcome::Accepted(receipt) => {
            let payload = json!({ "receipt": receipt, "session": result.session });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        SubmitOutcome::AlreadySubmitted(receipt) => {
            let payload = json!({ "receipt": receipt, "session": result.session });
            (StatusCode::OK, Json(payload)).into_response()
        }
        SubmitOutcome::Rejected(errors) => {
            let payload = json!({
                "error": "final step failed validation",
                "errors": errors,
                "session": result.session,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        SubmitOutcome::NotAtFinalStep { current_step } => {
            let payload = json!({
                "error": "application can only be submitted from the declaration step",
                "current_step": current_step,
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
    }
}

fn guess_media_types(files: Vec<FileHandle>) -> Vec<FileHandle> {
    files
        .into_iter()
        .map(FileHandle::with_guessed_media_type)
        .collect()
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

fn error_response(err: ApplicationServiceError) -> Response {
    let status = match &err {
        ApplicationServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ApplicationServiceError::AlreadySubmitted(_) => StatusCode::CONFLICT,
        ApplicationServiceError::CapacityReached(_) => StatusCode::SERVICE_UNAVAILABLE,
        ApplicationServiceError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        ApplicationServiceError::Submission(_) => StatusCode::BAD_GATEWAY,
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
