use tracing::warn;
use uuid::Uuid;

use crate::models::Photo;
use crate::photo::handles::{DisplayHandle, DisplayHandleRegistry};

enum Source {
    /// Handle for the blob with this upload id.
    Handle { blob: Uuid, handle: DisplayHandle },
    Url(String),
}

/// The photo as seen by one mounted renderer.
///
/// Follows the photo in the shared state: a new blob releases the previous handle
/// before acquiring its own; a URL is used as-is; a cleared photo releases
/// everything. Dropping the display releases whatever it holds.
pub struct PhotoDisplay {
    registry: DisplayHandleRegistry,
    source: Option<Source>,
}

impl PhotoDisplay {
    pub fn new(registry: DisplayHandleRegistry) -> Self {
        PhotoDisplay {
            registry,
            source: None,
        }
    }

    /// Brings the display in line with `photo`. Unchanged blobs keep their handle.
    pub fn sync(&mut self, photo: &Photo) {
        match photo {
            Photo::None => self.source = None,
            Photo::Url(url) => {
                if !matches!(&self.source, Some(Source::Url(current)) if current == url) {
                    self.source = Some(Source::Url(url.clone()));
                }
            }
            Photo::Blob(blob) => {
                if matches!(&self.source, Some(Source::Handle { blob: current, .. }) if *current == blob.id)
                {
                    return;
                }
                // Release first so a replacement never needs two live handles.
                self.source = None;
                match self.registry.acquire(blob) {
                    Ok(handle) => {
                        self.source = Some(Source::Handle {
                            blob: blob.id,
                            handle,
                        })
                    }
                    Err(e) => warn!(blob = %blob.id, "photo not displayed: {e}"),
                }
            }
        }
    }

    /// Image source for the renderer, if there is anything to show.
    pub fn src(&self) -> Option<&str> {
        match &self.source {
            Some(Source::Handle { handle, .. }) => Some(handle.url()),
            Some(Source::Url(url)) => Some(url),
            None => None,
        }
    }

    /// Id of the held handle, if the current photo is a blob.
    pub fn handle_id(&self) -> Option<Uuid> {
        match &self.source {
            Some(Source::Handle { handle, .. }) => Some(handle.id()),
            _ => None,
        }
    }
}
