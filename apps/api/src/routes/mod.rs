pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::photo::handlers as photo;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Oversized photos must still reach the form schema to get a field error.
    let body_limit = state.config.max_photo_bytes.saturating_mul(2);

    Router::new()
        .route("/health", get(health::health_handler))
        // Editor sessions
        .route(
            "/api/v1/resumes",
            post(editor::handle_create_resume).get(editor::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(editor::handle_get_resume).delete(editor::handle_close_resume),
        )
        .route(
            "/api/v1/resumes/:id/forms/:form",
            get(editor::handle_get_form).patch(editor::handle_change_form),
        )
        .route(
            "/api/v1/resumes/:id/template",
            put(editor::handle_select_template),
        )
        .route(
            "/api/v1/resumes/:id/photo",
            post(editor::handle_upload_photo)
                .put(editor::handle_set_photo_url)
                .delete(editor::handle_clear_photo),
        )
        // Rendering
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route("/api/v1/resumes/:id/preview", get(render::handle_get_preview))
        .route("/api/v1/resumes/:id/preview/ws", get(render::handle_preview_ws))
        .route("/api/v1/photos/:handle", get(photo::handle_get_photo))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
