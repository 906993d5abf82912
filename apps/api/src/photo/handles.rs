//! Display handles: transient, revocable URLs for in-memory photo uploads.
//!
//! A handle is live from `acquire` until the `DisplayHandle` is dropped. While live,
//! its URL resolves to the photo bytes; afterwards it resolves to nothing.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::PhotoBlob;

/// URL prefix under which live handles are served.
pub const HANDLE_URL_PREFIX: &str = "/api/v1/photos";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandleError {
    #[error("display handle limit reached ({0} live)")]
    Exhausted(usize),

    #[error("cannot display content type '{0}'")]
    UnsupportedContent(String),
}

struct Registry {
    live: Mutex<HashMap<Uuid, PhotoBlob>>,
    max_live: usize,
}

/// Process-wide table of live handles. Cheap to clone.
#[derive(Clone)]
pub struct DisplayHandleRegistry {
    inner: Arc<Registry>,
}

impl DisplayHandleRegistry {
    pub fn new(max_live: usize) -> Self {
        DisplayHandleRegistry {
            inner: Arc::new(Registry {
                live: Mutex::new(HashMap::new()),
                max_live,
            }),
        }
    }

    /// Creates a handle for `blob`. Released when the returned guard is dropped.
    pub fn acquire(&self, blob: &PhotoBlob) -> Result<DisplayHandle, HandleError> {
        if !blob.content_type.starts_with("image/") {
            return Err(HandleError::UnsupportedContent(blob.content_type.clone()));
        }

        let mut live = self.inner.live.lock();
        if live.len() >= self.inner.max_live {
            warn!(live = live.len(), "display handle limit reached");
            return Err(HandleError::Exhausted(live.len()));
        }
        let id = Uuid::new_v4();
        live.insert(id, blob.clone());
        debug!(handle = %id, blob = %blob.id, "display handle acquired");

        Ok(DisplayHandle {
            id,
            url: format!("{HANDLE_URL_PREFIX}/{id}"),
            registry: Arc::clone(&self.inner),
        })
    }

    /// The photo behind a live handle.
    pub fn resolve(&self, id: Uuid) -> Option<PhotoBlob> {
        self.inner.live.lock().get(&id).cloned()
    }

    pub fn live_count(&self) -> usize {
        self.inner.live.lock().len()
    }
}

/// RAII guard for one live handle.
pub struct DisplayHandle {
    id: Uuid,
    url: String,
    registry: Arc<Registry>,
}

impl DisplayHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayHandle")
            .field("id", &self.id)
            .field("url", &self.url)
            .finish()
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        self.registry.live.lock().remove(&self.id);
        debug!(handle = %self.id, "display handle released");
    }
}
