use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::editor::{EditorSession, SessionSummary};
use crate::errors::AppError;
use crate::forms::schema::{self, SchemaLimits, ValidationErrors};
use crate::forms::Propagation;
use crate::models::{Photo, PhotoBlob, ResumeData, TemplateId};
use crate::state::AppState;

const PHOTO_FIELD: &str = "photo";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateResumeRequest {
    /// Previously persisted record to edit. Omitted for a blank résumé.
    pub resume: Option<ResumeData>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub id: Uuid,
    pub resume: ResumeData,
}

#[derive(Debug, Serialize)]
pub struct FormChangeResponse {
    pub propagated: bool,
    pub errors: ValidationErrors,
    pub resume: ResumeData,
}

impl FormChangeResponse {
    fn new(outcome: Propagation, session: &EditorSession) -> Self {
        FormChangeResponse {
            propagated: outcome.propagated(),
            errors: outcome.errors(),
            resume: session.resume(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    /// The highlighted template; `null` when the stored identifier is unknown.
    pub selected: Option<TemplateId>,
    pub resume: ResumeData,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUrlRequest {
    pub url: String,
}

pub(crate) fn find_session(state: &AppState, id: Uuid) -> Result<Arc<EditorSession>, AppError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// POST /api/v1/resumes
///
/// Without a body the session starts from a blank résumé. A supplied record must
/// pass the color, email and photo rules before it reaches the store.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    body: Option<Json<CreateResumeRequest>>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let initial = body.and_then(|Json(req)| req.resume).unwrap_or_default();
    let limits = SchemaLimits {
        max_photo_bytes: state.config.max_photo_bytes,
    };
    let initial = schema::stored_record(initial, limits)
        .map_err(|errors| AppError::Validation(format!("Invalid resume: {errors}")))?;

    let session = state.sessions.create(initial);
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse {
            id: session.id,
            resume: session.resume(),
        }),
    ))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.sessions.list())
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let session = find_session(&state, id)?;
    Ok(Json(ResumeResponse {
        id,
        resume: session.resume(),
    }))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_close_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}

/// GET /api/v1/resumes/:id/forms/:form
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path((id, form)): Path<(Uuid, String)>,
) -> Result<Json<Value>, AppError> {
    let session = find_session(&state, id)?;
    Ok(Json(session.form_draft(&form)?))
}

/// PATCH /api/v1/resumes/:id/forms/:form
///
/// The body carries every value of the form. An invalid draft is still a 200:
/// `propagated` is false and `errors` lists the offending fields.
pub async fn handle_change_form(
    State(state): State<AppState>,
    Path((id, form)): Path<(Uuid, String)>,
    Json(values): Json<Value>,
) -> Result<Json<FormChangeResponse>, AppError> {
    let session = find_session(&state, id)?;
    let outcome = session.change_form(&form, values)?;
    Ok(Json(FormChangeResponse::new(outcome, &session)))
}

/// PUT /api/v1/resumes/:id/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<TemplateResponse>, AppError> {
    let session = find_session(&state, id)?;
    let selected = session.select_template(&req.template);
    Ok(Json(TemplateResponse {
        selected,
        resume: session.resume(),
    }))
}

/// POST /api/v1/resumes/:id/photo
///
/// Multipart upload; the file goes in the `photo` field.
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<FormChangeResponse>, AppError> {
    let session = find_session(&state, id)?;

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read photo upload: {e}")))?;
        upload = Some((content_type, bytes));
    }

    let (content_type, bytes) = upload
        .ok_or_else(|| AppError::Validation(format!("Missing multipart field '{PHOTO_FIELD}'")))?;
    let outcome = session.change_photo(Photo::Blob(PhotoBlob::new(content_type, bytes)));
    Ok(Json(FormChangeResponse::new(outcome, &session)))
}

/// PUT /api/v1/resumes/:id/photo
pub async fn handle_set_photo_url(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PhotoUrlRequest>,
) -> Result<Json<FormChangeResponse>, AppError> {
    let session = find_session(&state, id)?;
    let outcome = session.change_photo(Photo::Url(req.url));
    Ok(Json(FormChangeResponse::new(outcome, &session)))
}

/// DELETE /api/v1/resumes/:id/photo
pub async fn handle_clear_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormChangeResponse>, AppError> {
    let session = find_session(&state, id)?;
    let outcome = session.change_photo(Photo::None);
    Ok(Json(FormChangeResponse::new(outcome, &session)))
}
