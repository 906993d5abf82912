use tokio::sync::watch;

use crate::editor::ResumeStore;
use crate::models::ResumeData;
use crate::photo::{DisplayHandleRegistry, PhotoDisplay};
use crate::render::document::Document;
use crate::render::sections::AvailableWidth;
use crate::render::{render_resume, RenderInput};

/// A mounted preview: one renderer instance following one session's state.
///
/// The mount owns its photo display, so while it lives a blob photo has exactly
/// one display handle held on its behalf. Dropping the mount releases it.
pub struct PreviewMount {
    rx: watch::Receiver<ResumeData>,
    photo: PhotoDisplay,
    width: AvailableWidth,
    reference_width: f64,
}

impl PreviewMount {
    pub fn mount(
        store: &ResumeStore,
        registry: DisplayHandleRegistry,
        width: AvailableWidth,
        reference_width: f64,
    ) -> Self {
        let mut mount = PreviewMount {
            rx: store.subscribe(),
            photo: PhotoDisplay::new(registry),
            width,
            reference_width,
        };
        mount.sync_photo();
        mount
    }

    /// Brings the photo display in line with the latest state without rendering.
    pub fn sync_photo(&mut self) {
        let photo = self.rx.borrow().photo.clone();
        self.photo.sync(&photo);
    }

    /// Records a new container measurement.
    pub fn set_width(&mut self, width: AvailableWidth) {
        self.width = width;
    }

    /// Renders the latest state and marks it as seen.
    pub fn render(&mut self) -> Document {
        let resume = self.rx.borrow_and_update().clone();
        self.photo.sync(&resume.photo);
        render_resume(&RenderInput {
            resume: &resume,
            photo_src: self.photo.src(),
            width: self.width,
            reference_width: self.reference_width,
        })
    }

    /// Waits for a state change. `false` once the owning store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
