use serde::{Deserialize, Serialize};

use crate::forms::schema::{
    optional_color_hex, optional_email, optional_string, SchemaLimits, ValidationErrors,
};
use crate::forms::{FormDraft, Valid};
use crate::models::{BorderStyle, ResumeData};

/// Personal header fields. The photo has its own form (see `forms::photo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoDraft {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub color_hex: String,
    pub border_style: BorderStyle,
}

impl FormDraft for PersonalInfoDraft {
    type Output = Self;

    const FORM: &'static str = "personal-info";

    fn from_resume(resume: &ResumeData) -> Self {
        PersonalInfoDraft {
            first_name: resume.first_name.clone(),
            last_name: resume.last_name.clone(),
            job_title: resume.job_title.clone(),
            city: resume.city.clone(),
            country: resume.country.clone(),
            phone: resume.phone.clone(),
            email: resume.email.clone(),
            color_hex: resume.color_hex.clone(),
            border_style: resume.border_style,
        }
    }

    fn validate(&self, _limits: &SchemaLimits) -> Result<Valid<Self>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let normalized = PersonalInfoDraft {
            first_name: optional_string(&self.first_name),
            last_name: optional_string(&self.last_name),
            job_title: optional_string(&self.job_title),
            city: optional_string(&self.city),
            country: optional_string(&self.country),
            phone: optional_string(&self.phone),
            email: optional_email("email", &self.email, &mut errors),
            color_hex: optional_color_hex("colorHex", &self.color_hex, &mut errors),
            border_style: self.border_style,
        };
        errors.into_result(Valid::new(normalized))
    }

    fn merge(valid: &Valid<Self>, base: &ResumeData) -> ResumeData {
        let draft = valid.get().clone();
        ResumeData {
            first_name: draft.first_name,
            last_name: draft.last_name,
            job_title: draft.job_title,
            city: draft.city,
            country: draft.country,
            phone: draft.phone,
            email: draft.email,
            color_hex: draft.color_hex,
            border_style: draft.border_style,
            ..base.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_color_and_trims() {
        let draft = PersonalInfoDraft {
            first_name: " Ada ".to_string(),
            color_hex: "2563EB".to_string(),
            border_style: BorderStyle::Circle,
            ..Default::default()
        };
        let valid = draft.validate(&SchemaLimits::default()).unwrap();
        assert_eq!(valid.get().first_name, "Ada");
        assert_eq!(valid.get().color_hex, "#2563eb");

        let merged = PersonalInfoDraft::merge(&valid, &ResumeData::default());
        assert_eq!(merged.border_style, BorderStyle::Circle);
        assert_eq!(merged.color_hex, "#2563eb");
    }

    #[test]
    fn test_collects_every_failing_field() {
        let draft = PersonalInfoDraft {
            email: "nope".to_string(),
            color_hex: "#zzzzzz".to_string(),
            ..Default::default()
        };
        let errors = draft.validate(&SchemaLimits::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("email"));
        assert!(errors.has_field("colorHex"));
    }
}
