use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/photos/:handle
///
/// Serves the photo behind a live display handle. Released handles are 404.
pub async fn handle_get_photo(
    State(state): State<AppState>,
    Path(handle): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let blob = state
        .photos
        .resolve(handle)
        .ok_or_else(|| AppError::NotFound(format!("Display handle {handle} is not live")))?;

    Ok((
        [
            (header::CONTENT_TYPE, blob.content_type.clone()),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        blob.bytes,
    ))
}
