use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::editor::ResumeStore;
use crate::errors::AppError;
use crate::forms::education::EducationDraft;
use crate::forms::personal_info::PersonalInfoDraft;
use crate::forms::photo::PhotoDraft;
use crate::forms::schema::SchemaLimits;
use crate::forms::skills::SkillsDraft;
use crate::forms::summary::SummaryDraft;
use crate::forms::work_experience::WorkExperienceDraft;
use crate::forms::{FormController, FormDraft, GeneralInfoDraft, Propagation, TemplatePicker};
use crate::models::{Photo, ResumeData, TemplateId};
use crate::photo::DisplayHandleRegistry;
use crate::render::document::Document;
use crate::render::sections::AvailableWidth;
use crate::render::PreviewMount;

/// Settings every new session is created with.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub limits: SchemaLimits,
    pub reference_width: f64,
}

/// One résumé open for editing.
///
/// Every form controller, the template picker and the session preview hold the
/// same store. Dropping the session drops the store's last sender, which ends
/// every live preview stream mounted on it.
pub struct EditorSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    store: ResumeStore,
    photos: DisplayHandleRegistry,
    reference_width: f64,
    general_info: Mutex<FormController<GeneralInfoDraft>>,
    personal_info: Mutex<FormController<PersonalInfoDraft>>,
    photo: Mutex<FormController<PhotoDraft>>,
    summary: Mutex<FormController<SummaryDraft>>,
    work_experience: Mutex<FormController<WorkExperienceDraft>>,
    education: Mutex<FormController<EducationDraft>>,
    skills: Mutex<FormController<SkillsDraft>>,
    picker: Mutex<TemplatePicker>,
    preview: Mutex<PreviewMount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: Uuid,
    pub title: String,
    pub template: Option<TemplateId>,
    pub created_at: DateTime<Utc>,
}

impl EditorSession {
    pub fn new(
        initial: ResumeData,
        photos: DisplayHandleRegistry,
        settings: SessionSettings,
    ) -> Self {
        let store = ResumeStore::new(initial);
        let limits = settings.limits;
        EditorSession {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            general_info: Mutex::new(FormController::mount(store.clone(), limits)),
            personal_info: Mutex::new(FormController::mount(store.clone(), limits)),
            photo: Mutex::new(FormController::mount(store.clone(), limits)),
            summary: Mutex::new(FormController::mount(store.clone(), limits)),
            work_experience: Mutex::new(FormController::mount(store.clone(), limits)),
            education: Mutex::new(FormController::mount(store.clone(), limits)),
            skills: Mutex::new(FormController::mount(store.clone(), limits)),
            picker: Mutex::new(TemplatePicker::mount(store.clone())),
            preview: Mutex::new(PreviewMount::mount(
                &store,
                photos.clone(),
                AvailableWidth::Unmeasured,
                settings.reference_width,
            )),
            reference_width: settings.reference_width,
            photos,
            store,
        }
    }

    pub fn resume(&self) -> ResumeData {
        self.store.snapshot()
    }

    pub fn summary(&self) -> SessionSummary {
        let resume = self.store.snapshot();
        SessionSummary {
            id: self.id,
            template: resume.selected_template(),
            title: resume.title,
            created_at: self.created_at,
        }
    }

    /// Applies a change event to the named form.
    pub fn change_form(&self, form: &str, values: Value) -> Result<Propagation, AppError> {
        match form {
            GeneralInfoDraft::FORM => change(&self.general_info, values),
            PersonalInfoDraft::FORM => change(&self.personal_info, values),
            SummaryDraft::FORM => change(&self.summary, values),
            WorkExperienceDraft::FORM => change(&self.work_experience, values),
            EducationDraft::FORM => change(&self.education, values),
            SkillsDraft::FORM => change(&self.skills, values),
            PhotoDraft::FORM => Err(AppError::UnprocessableEntity(
                "The photo is set through the photo endpoints".to_string(),
            )),
            other => Err(AppError::NotFound(format!("Form '{other}' not found"))),
        }
    }

    /// The named form's current draft.
    pub fn form_draft(&self, form: &str) -> Result<Value, AppError> {
        match form {
            GeneralInfoDraft::FORM => draft(&self.general_info),
            PersonalInfoDraft::FORM => draft(&self.personal_info),
            PhotoDraft::FORM => draft(&self.photo),
            SummaryDraft::FORM => draft(&self.summary),
            WorkExperienceDraft::FORM => draft(&self.work_experience),
            EducationDraft::FORM => draft(&self.education),
            SkillsDraft::FORM => draft(&self.skills),
            other => Err(AppError::NotFound(format!("Form '{other}' not found"))),
        }
    }

    /// Change event on the photo form. The session preview swaps its display
    /// handle straight away so a replaced upload stops being served.
    pub fn change_photo(&self, photo: Photo) -> Propagation {
        let outcome = self.photo.lock().on_change(PhotoDraft { photo });
        self.preview.lock().sync_photo();
        outcome
    }

    pub fn select_template(&self, raw: &str) -> Option<TemplateId> {
        self.picker.lock().select(raw)
    }

    #[cfg(test)]
    pub fn selected_template(&self) -> Option<TemplateId> {
        self.picker.lock().selected()
    }

    /// Renders the session preview at `width`.
    pub fn preview(&self, width: AvailableWidth) -> Document {
        let mut preview = self.preview.lock();
        preview.set_width(width);
        preview.render()
    }

    /// A new preview mount, independent of the session's own.
    pub fn mount_preview(&self, width: AvailableWidth) -> PreviewMount {
        PreviewMount::mount(&self.store, self.photos.clone(), width, self.reference_width)
    }
}

fn change<D>(form: &Mutex<FormController<D>>, values: Value) -> Result<Propagation, AppError>
where
    D: FormDraft + DeserializeOwned,
{
    let draft: D = serde_json::from_value(values)
        .map_err(|e| AppError::Validation(format!("Invalid {} values: {e}", D::FORM)))?;
    Ok(form.lock().on_change(draft))
}

fn draft<D>(form: &Mutex<FormController<D>>) -> Result<Value, AppError>
where
    D: FormDraft + Serialize,
{
    serde_json::to_value(form.lock().draft()).map_err(|e| AppError::Internal(e.into()))
}

/// Open sessions by id.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<EditorSession>>>>,
    photos: DisplayHandleRegistry,
    settings: SessionSettings,
}

impl SessionRegistry {
    pub fn new(photos: DisplayHandleRegistry, settings: SessionSettings) -> Self {
        SessionRegistry {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            photos,
            settings,
        }
    }

    pub fn create(&self, initial: ResumeData) -> Arc<EditorSession> {
        let session = Arc::new(EditorSession::new(
            initial,
            self.photos.clone(),
            self.settings,
        ));
        self.sessions.write().insert(session.id, session.clone());
        info!(session = %session.id, "editor session opened");
        session
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<EditorSession>> {
        self.sessions.read().get(&id).cloned()
    }

    /// Summaries of every open session, oldest first.
    pub fn list(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<_> = self
            .sessions
            .read()
            .values()
            .map(|session| session.summary())
            .collect();
        summaries.sort_by_key(|s| (s.created_at, s.id));
        summaries
    }

    /// Removes the session. Its mounts unmount once the last in-flight user lets go.
    pub fn close(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().remove(&id);
        if removed.is_some() {
            info!(session = %id, "editor session closed");
        }
        removed.is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }
}
