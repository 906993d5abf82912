use serde::Serialize;

use crate::forms::schema::{self, SchemaLimits, ValidationErrors};
use crate::forms::{FormDraft, Valid};
use crate::models::{Photo, ResumeData};

/// The photo field. Kept apart from the personal-info draft because its values
/// arrive as uploads or resolved URLs rather than as JSON form values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhotoDraft {
    pub photo: Photo,
}

impl FormDraft for PhotoDraft {
    type Output = Photo;

    const FORM: &'static str = "photo";

    fn from_resume(resume: &ResumeData) -> Self {
        PhotoDraft {
            photo: resume.photo.clone(),
        }
    }

    fn validate(&self, limits: &SchemaLimits) -> Result<Valid<Photo>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let photo = match &self.photo {
            Photo::Url(url) => Photo::Url(url.trim().to_string()),
            other => other.clone(),
        };
        schema::photo("photo", &photo, limits.max_photo_bytes, &mut errors);
        errors.into_result(Valid::new(photo))
    }

    fn merge(valid: &Valid<Photo>, base: &ResumeData) -> ResumeData {
        ResumeData {
            photo: valid.get().clone(),
            ..base.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::store::ResumeStore;
    use crate::forms::FormController;
    use crate::models::PhotoBlob;
    use bytes::Bytes;

    #[test]
    fn test_oversized_upload_does_not_propagate() {
        let store = ResumeStore::new(ResumeData::default());
        let limits = SchemaLimits { max_photo_bytes: 8 };
        let mut form: FormController<PhotoDraft> = FormController::mount(store.clone(), limits);

        let big = PhotoBlob::new("image/png", Bytes::from_static(b"0123456789"));
        let outcome = form.on_change(PhotoDraft { photo: Photo::Blob(big) });
        assert!(!outcome.propagated());
        assert!(store.snapshot().photo.is_none());

        let small = PhotoBlob::new("image/png", Bytes::from_static(b"0123"));
        let outcome = form.on_change(PhotoDraft {
            photo: Photo::Blob(small.clone()),
        });
        assert!(outcome.propagated());
        assert_eq!(store.snapshot().photo, Photo::Blob(small));
    }

    #[test]
    fn test_clearing_photo() {
        let store = ResumeStore::new(ResumeData {
            photo: Photo::Url("https://cdn.example.com/me.jpg".to_string()),
            ..Default::default()
        });
        let mut form: FormController<PhotoDraft> =
            FormController::mount(store.clone(), SchemaLimits::default());
        assert!(form.on_change(PhotoDraft { photo: Photo::None }).propagated());
        assert!(store.snapshot().photo.is_none());
    }
}
