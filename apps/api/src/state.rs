use crate::config::Config;
use crate::editor::session::SessionSettings;
use crate::editor::SessionRegistry;
use crate::forms::schema::SchemaLimits;
use crate::photo::DisplayHandleRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Open editor sessions.
    pub sessions: SessionRegistry,
    /// Live display handles, shared by every preview mount.
    pub photos: DisplayHandleRegistry,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let photos = DisplayHandleRegistry::new(config.max_display_handles);
        let settings = SessionSettings {
            limits: SchemaLimits {
                max_photo_bytes: config.max_photo_bytes,
            },
            reference_width: config.reference_width,
        };
        AppState {
            sessions: SessionRegistry::new(photos.clone(), settings),
            photos,
            config,
        }
    }
}
