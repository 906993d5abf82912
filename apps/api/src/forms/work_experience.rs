use serde::{Deserialize, Serialize};

use crate::forms::schema::{
    input_date, optional_date, optional_string, SchemaLimits, ValidationErrors,
};
use crate::forms::{FormDraft, Valid};
use crate::models::{ResumeData, WorkExperience};

/// One work-experience row as typed into the form. Dates are raw `yyyy-mm-dd` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceInput {
    pub position: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

/// The whole work-experience list. Row order is preserved, empty rows included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceDraft {
    pub work_experiences: Vec<WorkExperienceInput>,
}

impl WorkExperienceDraft {
    pub fn new(rows: Vec<WorkExperienceInput>) -> Self {
        WorkExperienceDraft {
            work_experiences: rows,
        }
    }
}

impl FormDraft for WorkExperienceDraft {
    type Output = Vec<WorkExperience>;

    const FORM: &'static str = "work-experience";

    fn from_resume(resume: &ResumeData) -> Self {
        WorkExperienceDraft::new(
            resume
                .work_experiences
                .iter()
                .map(|exp| WorkExperienceInput {
                    position: exp.position.clone(),
                    company: exp.company.clone(),
                    start_date: input_date(exp.start_date),
                    end_date: input_date(exp.end_date),
                    description: exp.description.clone(),
                })
                .collect(),
        )
    }

    fn validate(
        &self,
        _limits: &SchemaLimits,
    ) -> Result<Valid<Vec<WorkExperience>>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let parsed: Vec<WorkExperience> = self
            .work_experiences
            .iter()
            .enumerate()
            .map(|(i, row)| WorkExperience {
                position: optional_string(&row.position),
                company: optional_string(&row.company),
                start_date: optional_date(
                    &format!("workExperiences.{i}.startDate"),
                    &row.start_date,
                    &mut errors,
                ),
                end_date: optional_date(
                    &format!("workExperiences.{i}.endDate"),
                    &row.end_date,
                    &mut errors,
                ),
                // Inner line breaks are kept; only the ends are trimmed.
                description: optional_string(&row.description),
            })
            .collect();
        errors.into_result(Valid::new(parsed))
    }

    fn merge(valid: &Valid<Vec<WorkExperience>>, base: &ResumeData) -> ResumeData {
        ResumeData {
            work_experiences: valid.get().clone(),
            ..base.clone()
        }
    }
}
