use serde::{Deserialize, Serialize};

use crate::forms::schema::{skill_labels, SchemaLimits, ValidationErrors};
use crate::forms::{FormDraft, Valid};
use crate::models::ResumeData;

/// Skill labels. The form sends either a list or a single comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillsDraft {
    pub skills: SkillsInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    /// Free text as typed, e.g. `"Rust, SQL, Kubernetes"`.
    Text(String),
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::List(Vec::new())
    }
}

impl FormDraft for SkillsDraft {
    type Output = Vec<String>;

    const FORM: &'static str = "skills";

    fn from_resume(resume: &ResumeData) -> Self {
        SkillsDraft {
            skills: SkillsInput::List(resume.skills.clone()),
        }
    }

    fn validate(&self, _limits: &SchemaLimits) -> Result<Valid<Vec<String>>, ValidationErrors> {
        let labels = match &self.skills {
            SkillsInput::List(items) => skill_labels(items),
            SkillsInput::Text(text) => skill_labels(text.split(',')),
        };
        Ok(Valid::new(labels))
    }

    fn merge(valid: &Valid<Vec<String>>, base: &ResumeData) -> ResumeData {
        ResumeData {
            skills: valid.get().clone(),
            ..base.clone()
        }
    }
}
