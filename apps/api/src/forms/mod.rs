//! Form Controller: validated drafts merged into the shared résumé.
//!
//! Every change event carries the full form values. The controller replaces its
//! draft, validates it, and only a valid draft is merged into the store. An invalid
//! draft is a normal outcome: nothing propagates and the field errors are returned
//! for inline display.

pub mod education;
pub mod general_info;
pub mod personal_info;
pub mod photo;
pub mod schema;
pub mod skills;
pub mod summary;
pub mod work_experience;

use serde::Serialize;
use tracing::debug;

use crate::editor::ResumeStore;
use crate::models::ResumeData;
use schema::{SchemaLimits, ValidationErrors};

pub use general_info::{GeneralInfoDraft, TemplatePicker};

/// Values that passed a draft's schema. Only `FormDraft::validate` builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct Valid<D>(D);

impl<D> Valid<D> {
    pub(crate) fn new(draft: D) -> Self {
        Valid(draft)
    }

    pub fn get(&self) -> &D {
        &self.0
    }
}

/// One editor step's subset of résumé fields.
pub trait FormDraft: Clone + Send + Sync + 'static {
    /// Path segment identifying the form (`general-info`, `skills`, ...).
    const FORM: &'static str;

    /// Initial values pulled from the shared record. Absent values become empty.
    fn from_resume(resume: &ResumeData) -> Self;

    /// Typed, normalised values produced by a successful validation.
    type Output: Clone + Send + Sync;

    /// Checks and normalises the whole draft.
    fn validate(&self, limits: &SchemaLimits) -> Result<Valid<Self::Output>, ValidationErrors>;

    /// Shallow merge: the owned fields come from the draft, everything else from `base`.
    fn merge(valid: &Valid<Self::Output>, base: &ResumeData) -> ResumeData;
}

/// Outcome of a change event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Propagation {
    /// The draft was valid and merged. `changed` is false when the merge was a no-op.
    Merged { changed: bool },
    /// The draft was invalid; shared state was not touched.
    Skipped { errors: ValidationErrors },
}

impl Propagation {
    pub fn propagated(&self) -> bool {
        matches!(self, Propagation::Merged { .. })
    }

    pub fn errors(&self) -> ValidationErrors {
        match self {
            Propagation::Merged { .. } => ValidationErrors::new(),
            Propagation::Skipped { errors } => errors.clone(),
        }
    }
}

/// Form-local draft bound to a shared store.
pub struct FormController<D: FormDraft> {
    draft: D,
    store: ResumeStore,
    limits: SchemaLimits,
}

impl<D: FormDraft> FormController<D> {
    /// Mounts the form with the store's current values.
    pub fn mount(store: ResumeStore, limits: SchemaLimits) -> Self {
        let draft = D::from_resume(&store.snapshot());
        FormController {
            draft,
            store,
            limits,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Handles one change event: replace the draft, validate, merge if valid.
    ///
    /// The merge is computed against the store's latest state, not the state at
    /// mount, so fields owned by other forms are never rolled back.
    pub fn on_change(&mut self, values: D) -> Propagation {
        self.draft = values;
        match self.draft.validate(&self.limits) {
            Ok(valid) => {
                let changed = self.store.update(|current| D::merge(&valid, current));
                debug!(form = D::FORM, changed, "draft merged");
                Propagation::Merged { changed }
            }
            Err(errors) => {
                debug!(form = D::FORM, errors = errors.len(), "draft invalid, not merged");
                Propagation::Skipped { errors }
            }
        }
    }
}
