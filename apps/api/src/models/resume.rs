use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::photo::Photo;

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Shape applied to the photo and to skill badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    Square,
    Circle,
    /// Moderate rounding. Also the fallback for any unrecognised value.
    #[default]
    #[serde(alias = "squircle", other)]
    Rounded,
}

/// The fixed set of known template variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "minimalist")]
    Minimalist,
    #[serde(rename = "classic-two-column")]
    ClassicTwoColumn,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Default,
        TemplateId::Minimalist,
        TemplateId::ClassicTwoColumn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Default => "default",
            TemplateId::Minimalist => "minimalist",
            TemplateId::ClassicTwoColumn => "classic-two-column",
        }
    }

    /// Human-readable name shown in the template picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateId::Default => "Default",
            TemplateId::Minimalist => "Minimalist",
            TemplateId::ClassicTwoColumn => "Two Column",
        }
    }

    /// Resolves a stored identifier. Unknown identifiers mean "no template selected".
    pub fn parse(raw: &str) -> Option<TemplateId> {
        TemplateId::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Collection entries
// ────────────────────────────────────────────────────────────────────────────

/// One job. No identity beyond its position in the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub position: String,
    pub company: String,
    pub start_date: Option<NaiveDate>,
    /// `None` means the position is ongoing.
    pub end_date: Option<NaiveDate>,
    pub description: String,
}

impl WorkExperience {
    /// True iff every field is empty or absent. Empty entries are never rendered.
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
            && self.company.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.description.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Education {
    pub fn is_empty(&self) -> bool {
        self.degree.is_empty()
            && self.school.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ResumeData
// ────────────────────────────────────────────────────────────────────────────

/// The shared résumé record edited by the forms and projected by the templates.
///
/// Display formatting (date strings, dropping empty entries) is never stored here;
/// renderers compute it from this record on every render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    // Meta
    pub title: String,
    pub description: String,
    /// Raw template identifier as selected by the user. See [`ResumeData::selected_template`].
    pub template: Option<String>,

    // Personal
    pub photo: Photo,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub color_hex: String,
    pub border_style: BorderStyle,

    pub summary: String,

    // Collections
    pub work_experiences: Vec<WorkExperience>,
    pub educations: Vec<Education>,
    pub skills: Vec<String>,
}

impl ResumeData {
    /// The selected template, or `None` when nothing (or an unknown id) is stored.
    pub fn selected_template(&self) -> Option<TemplateId> {
        self.template.as_deref().and_then(TemplateId::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_style_unknown_value_is_rounded() {
        let style: BorderStyle = serde_json::from_str("\"hexagon\"").unwrap();
        assert_eq!(style, BorderStyle::Rounded);
        let style: BorderStyle = serde_json::from_str("\"squircle\"").unwrap();
        assert_eq!(style, BorderStyle::Rounded);
        let style: BorderStyle = serde_json::from_str("\"circle\"").unwrap();
        assert_eq!(style, BorderStyle::Circle);
    }

    #[test]
    fn test_unknown_template_is_no_selection() {
        let resume = ResumeData {
            template: Some("neon-brutalist".to_string()),
            ..Default::default()
        };
        assert_eq!(resume.selected_template(), None);

        let resume = ResumeData {
            template: Some("classic-two-column".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resume.selected_template(),
            Some(TemplateId::ClassicTwoColumn)
        );
    }

    #[test]
    fn test_entry_emptiness() {
        assert!(WorkExperience::default().is_empty());
        assert!(Education::default().is_empty());

        let only_end = Education {
            end_date: NaiveDate::from_ymd_opt(2022, 6, 1),
            ..Default::default()
        };
        assert!(!only_end.is_empty());

        let only_description = WorkExperience {
            description: "Kept the lights on".to_string(),
            ..Default::default()
        };
        assert!(!only_description.is_empty());
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let json = serde_json::json!({
            "firstName": "Ada",
            "colorHex": "#2563eb",
            "workExperiences": [{ "position": "Engineer", "startDate": "2023-01-15" }],
            "educations": [],
            "skills": ["Rust"]
        });
        let resume: ResumeData = serde_json::from_value(json).unwrap();
        assert_eq!(resume.first_name, "Ada");
        assert_eq!(resume.color_hex, "#2563eb");
        assert_eq!(
            resume.work_experiences[0].start_date,
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert_eq!(resume.border_style, BorderStyle::Rounded);
        assert!(resume.photo.is_none());
    }
}
