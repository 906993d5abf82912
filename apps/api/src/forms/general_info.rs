use serde::{Deserialize, Serialize};
use tracing::info;

use crate::editor::ResumeStore;
use crate::forms::schema::{optional_string, SchemaLimits, ValidationErrors};
use crate::forms::{FormDraft, Valid};
use crate::models::{ResumeData, TemplateId};

/// Project name and description. Neither appears on the résumé itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralInfoDraft {
    pub title: String,
    pub description: String,
}

impl FormDraft for GeneralInfoDraft {
    type Output = Self;

    const FORM: &'static str = "general-info";

    fn from_resume(resume: &ResumeData) -> Self {
        GeneralInfoDraft {
            title: resume.title.clone(),
            description: resume.description.clone(),
        }
    }

    fn validate(&self, _limits: &SchemaLimits) -> Result<Valid<Self>, ValidationErrors> {
        let normalized = GeneralInfoDraft {
            title: optional_string(&self.title),
            description: optional_string(&self.description),
        };
        Ok(Valid::new(normalized))
    }

    fn merge(valid: &Valid<Self>, base: &ResumeData) -> ResumeData {
        let draft = valid.get();
        ResumeData {
            title: draft.title.clone(),
            description: draft.description.clone(),
            ..base.clone()
        }
    }
}

/// Template selection on the general-info step.
///
/// Bypasses validation: a selection is written straight into shared state and the
/// local highlight follows it, whatever the state of the draft.
pub struct TemplatePicker {
    selected: Option<TemplateId>,
    store: ResumeStore,
}

impl TemplatePicker {
    pub fn mount(store: ResumeStore) -> Self {
        let selected = store.snapshot().selected_template();
        TemplatePicker { selected, store }
    }

    /// The highlighted template, if any.
    #[cfg(test)]
    pub fn selected(&self) -> Option<TemplateId> {
        self.selected
    }

    /// Stores `raw` as the template identifier. Unknown identifiers are kept in the
    /// record but highlight nothing.
    pub fn select(&mut self, raw: &str) -> Option<TemplateId> {
        let raw = raw.trim().to_string();
        self.selected = TemplateId::parse(&raw);
        info!(template = %raw, known = self.selected.is_some(), "template selected");
        self.store.update(|current| ResumeData {
            template: Some(raw),
            ..current.clone()
        });
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormController;

    #[test]
    fn test_any_strings_are_valid() {
        let draft = GeneralInfoDraft {
            title: String::new(),
            description: "   ".to_string(),
        };
        let valid = draft.validate(&SchemaLimits::default()).unwrap();
        assert_eq!(valid.get().description, "");
    }

    #[test]
    fn test_template_selection_writes_immediately() {
        let store = ResumeStore::new(ResumeData::default());
        let mut picker = TemplatePicker::mount(store.clone());
        assert_eq!(picker.selected(), None);

        assert_eq!(picker.select("minimalist"), Some(TemplateId::Minimalist));
        assert_eq!(store.snapshot().template.as_deref(), Some("minimalist"));
        assert_eq!(store.snapshot().selected_template(), Some(TemplateId::Minimalist));
    }

    #[test]
    fn test_template_selection_ignores_draft_validity() {
        let store = ResumeStore::new(ResumeData::default());
        let mut form: FormController<GeneralInfoDraft> =
            FormController::mount(store.clone(), SchemaLimits::default());
        let mut picker = TemplatePicker::mount(store.clone());

        form.on_change(GeneralInfoDraft {
            title: "Draft title".to_string(),
            description: String::new(),
        });
        picker.select("classic-two-column");

        let state = store.snapshot();
        assert_eq!(state.title, "Draft title");
        assert_eq!(state.selected_template(), Some(TemplateId::ClassicTwoColumn));
    }

    #[test]
    fn test_unknown_template_highlights_nothing() {
        let store = ResumeStore::new(ResumeData {
            template: Some("default".to_string()),
            ..Default::default()
        });
        let mut picker = TemplatePicker::mount(store.clone());
        assert_eq!(picker.selected(), Some(TemplateId::Default));

        assert_eq!(picker.select("retro"), None);
        assert_eq!(picker.selected(), None);
        assert_eq!(store.snapshot().selected_template(), None);
    }
}
