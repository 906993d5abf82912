use serde::{Deserialize, Serialize};

use crate::forms::schema::{optional_string, SchemaLimits, ValidationErrors};
use crate::forms::{FormDraft, Valid};
use crate::models::ResumeData;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryDraft {
    pub summary: String,
}

impl FormDraft for SummaryDraft {
    type Output = Self;

    const FORM: &'static str = "summary";

    fn from_resume(resume: &ResumeData) -> Self {
        SummaryDraft {
            summary: resume.summary.clone(),
        }
    }

    fn validate(&self, _limits: &SchemaLimits) -> Result<Valid<Self>, ValidationErrors> {
        Ok(Valid::new(SummaryDraft {
            summary: optional_string(&self.summary),
        }))
    }

    fn merge(valid: &Valid<Self>, base: &ResumeData) -> ResumeData {
        ResumeData {
            summary: valid.get().summary.clone(),
            ..base.clone()
        }
    }
}
