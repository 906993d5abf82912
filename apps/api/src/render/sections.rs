//! Section policy shared by every template variant.
//!
//! Variants decide arrangement and styling only. Whether a section shows, which
//! entries it lists, how dates read and how shapes round all come from here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BorderStyle, Education, ResumeData, WorkExperience};

/// Nominal full page width the documents are authored at.
pub const REFERENCE_WIDTH: f64 = 794.0;

pub const DEFAULT_ACCENT: &str = "#000000";

const SQUARE_RADIUS: &str = "0px";
const CIRCLE_RADIUS: &str = "9999px";

/// Width of the container the document is shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "width", rename_all = "snake_case")]
pub enum AvailableWidth {
    /// Not measured yet (before first layout).
    #[default]
    Unmeasured,
    Measured(f64),
}

impl AvailableWidth {
    pub fn from_query(width: Option<f64>) -> Self {
        width.map_or(AvailableWidth::Unmeasured, AvailableWidth::Measured)
    }
}

/// Uniform scale factor `width / reference`, or `None` when the content must be
/// hidden: unmeasured, or a measurement that is not a positive finite number.
pub fn scale_factor(width: AvailableWidth, reference: f64) -> Option<f64> {
    match width {
        AvailableWidth::Measured(w) if w.is_finite() && w > 0.0 && reference > 0.0 => {
            Some(w / reference)
        }
        _ => None,
    }
}

/// Per-variant default radii, used for any border style other than square or circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radii {
    pub photo: &'static str,
    pub badge: &'static str,
}

pub fn photo_radius(style: BorderStyle, radii: &Radii) -> &'static str {
    radius(style, radii.photo)
}

pub fn badge_radius(style: BorderStyle, radii: &Radii) -> &'static str {
    radius(style, radii.badge)
}

fn radius(style: BorderStyle, fallback: &'static str) -> &'static str {
    match style {
        BorderStyle::Square => SQUARE_RADIUS,
        BorderStyle::Circle => CIRCLE_RADIUS,
        BorderStyle::Rounded => fallback,
    }
}

pub fn accent(resume: &ResumeData) -> &str {
    if resume.color_hex.is_empty() {
        DEFAULT_ACCENT
    } else {
        &resume.color_hex
    }
}

/// `"MMM yyyy"`, e.g. `Jan 2023`.
pub fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// `"Jun 2022 - Mar 2023"`, `"Jan 2023 - Present"`, or nothing without a start date.
pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    let start = start?;
    let end = end.map_or_else(|| "Present".to_string(), month_year);
    Some(format!("{} - {end}", month_year(start)))
}

/// Joins the two halves of an entry headline, skipping an empty side.
pub fn headline(primary: &str, secondary: &str) -> String {
    match (primary.is_empty(), secondary.is_empty()) {
        (false, false) => format!("{primary} — {secondary}"),
        (false, true) => primary.to_string(),
        (true, false) => secondary.to_string(),
        (true, true) => String::new(),
    }
}

pub fn summary(resume: &ResumeData) -> Option<&str> {
    (!resume.summary.is_empty()).then_some(resume.summary.as_str())
}

/// Non-empty work entries in source order. `None` hides the section.
pub fn work_experiences(resume: &ResumeData) -> Option<Vec<&WorkExperience>> {
    let visible: Vec<_> = resume
        .work_experiences
        .iter()
        .filter(|exp| !exp.is_empty())
        .collect();
    (!visible.is_empty()).then_some(visible)
}

pub fn educations(resume: &ResumeData) -> Option<Vec<&Education>> {
    let visible: Vec<_> = resume
        .educations
        .iter()
        .filter(|edu| !edu.is_empty())
        .collect();
    (!visible.is_empty()).then_some(visible)
}

pub fn skills(resume: &ResumeData) -> Option<&[String]> {
    (!resume.skills.is_empty()).then_some(resume.skills.as_slice())
}

pub fn full_name(resume: &ResumeData) -> String {
    [resume.first_name.as_str(), resume.last_name.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Contact parts that are present, in display order: location, phone, email.
pub fn contact_parts(resume: &ResumeData) -> Vec<String> {
    let location = [resume.city.as_str(), resume.country.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    [location, resume.phone.clone(), resume.email.clone()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_date_range_ongoing() {
        assert_eq!(
            date_range(date(2023, 1, 15), None).as_deref(),
            Some("Jan 2023 - Present")
        );
    }

    #[test]
    fn test_date_range_closed() {
        assert_eq!(
            date_range(date(2022, 6, 1), date(2023, 3, 1)).as_deref(),
            Some("Jun 2022 - Mar 2023")
        );
    }

    #[test]
    fn test_date_range_requires_start() {
        assert_eq!(date_range(None, date(2023, 3, 1)), None);
        assert_eq!(date_range(None, None), None);
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(scale_factor(AvailableWidth::Measured(397.0), 794.0), Some(0.5));
        assert_eq!(scale_factor(AvailableWidth::Measured(794.0), 794.0), Some(1.0));
        assert_eq!(scale_factor(AvailableWidth::Measured(0.0), 794.0), None);
        assert_eq!(scale_factor(AvailableWidth::Measured(f64::NAN), 794.0), None);
        assert_eq!(scale_factor(AvailableWidth::Unmeasured, 794.0), None);
    }

    #[test]
    fn test_unmeasured_and_zero_are_distinct_states() {
        assert_ne!(AvailableWidth::from_query(None), AvailableWidth::from_query(Some(0.0)));
    }

    #[test]
    fn test_radius_mapping() {
        let radii = Radii {
            photo: "10%",
            badge: "8px",
        };
        assert_eq!(photo_radius(BorderStyle::Square, &radii), "0px");
        assert_eq!(photo_radius(BorderStyle::Circle, &radii), "9999px");
        assert_eq!(photo_radius(BorderStyle::Rounded, &radii), "10%");
        assert_eq!(badge_radius(BorderStyle::Rounded, &radii), "8px");
    }

    #[test]
    fn test_headline() {
        assert_eq!(headline("BSc", "MIT"), "BSc — MIT");
        assert_eq!(headline("", "MIT"), "MIT");
        assert_eq!(headline("BSc", ""), "BSc");
    }

    #[test]
    fn test_entry_filtering_keeps_partial_entries() {
        let resume = ResumeData {
            work_experiences: vec![
                WorkExperience::default(),
                WorkExperience {
                    company: "Acme".to_string(),
                    ..Default::default()
                },
                WorkExperience::default(),
            ],
            educations: vec![Education::default()],
            ..Default::default()
        };
        let visible = work_experiences(&resume).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].company, "Acme");
        assert!(educations(&resume).is_none());
        // Source data is untouched.
        assert_eq!(resume.work_experiences.len(), 3);
    }

    #[test]
    fn test_contact_parts_skip_missing() {
        let resume = ResumeData {
            city: "Berlin".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(
            contact_parts(&resume),
            vec!["Berlin".to_string(), "ada@example.com".to_string()]
        );
        assert_eq!(full_name(&resume), "");
    }
}
