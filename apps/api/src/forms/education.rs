use serde::{Deserialize, Serialize};

use crate::forms::schema::{
    input_date, optional_date, optional_string, SchemaLimits, ValidationErrors,
};
use crate::forms::{FormDraft, Valid};
use crate::models::{Education, ResumeData};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationInput {
    pub degree: String,
    pub school: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationDraft {
    pub educations: Vec<EducationInput>,
}

impl FormDraft for EducationDraft {
    type Output = Vec<Education>;

    const FORM: &'static str = "education";

    fn from_resume(resume: &ResumeData) -> Self {
        EducationDraft {
            educations: resume
                .educations
                .iter()
                .map(|edu| EducationInput {
                    degree: edu.degree.clone(),
                    school: edu.school.clone(),
                    start_date: input_date(edu.start_date),
                    end_date: input_date(edu.end_date),
                })
                .collect(),
        }
    }

    fn validate(&self, _limits: &SchemaLimits) -> Result<Valid<Vec<Education>>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let parsed: Vec<Education> = self
            .educations
            .iter()
            .enumerate()
            .map(|(i, row)| Education {
                degree: optional_string(&row.degree),
                school: optional_string(&row.school),
                start_date: optional_date(
                    &format!("educations.{i}.startDate"),
                    &row.start_date,
                    &mut errors,
                ),
                end_date: optional_date(
                    &format!("educations.{i}.endDate"),
                    &row.end_date,
                    &mut errors,
                ),
            })
            .collect();
        errors.into_result(Valid::new(parsed))
    }

    fn merge(valid: &Valid<Vec<Education>>, base: &ResumeData) -> ResumeData {
        ResumeData {
            educations: valid.get().clone(),
            ..base.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_education_rows_parse() {
        let draft = EducationDraft {
            educations: vec![EducationInput {
                degree: "BSc ".to_string(),
                school: "MIT".to_string(),
                start_date: "2018-09-01".to_string(),
                end_date: "2022-06-01".to_string(),
            }],
        };
        let valid = draft.validate(&SchemaLimits::default()).unwrap();
        let merged = EducationDraft::merge(&valid, &ResumeData::default());
        let edu = &merged.educations[0];
        assert_eq!(edu.degree, "BSc");
        assert_eq!(edu.start_date, NaiveDate::from_ymd_opt(2018, 9, 1));
        assert_eq!(edu.end_date, NaiveDate::from_ymd_opt(2022, 6, 1));
    }

    #[test]
    fn test_end_date_error_is_reported() {
        let draft = EducationDraft {
            educations: vec![EducationInput {
                end_date: "2022/06/01".to_string(),
                ..Default::default()
            }],
        };
        let errors = draft.validate(&SchemaLimits::default()).unwrap_err();
        assert!(errors.has_field("educations.0.endDate"));
    }
}
