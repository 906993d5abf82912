//! Draft schema: field rules shared by every editor form.
//!
//! All text fields are optional: an empty string always passes. Rules only reject
//! values that are present and malformed. Normalisation (trimming, `#` prefix on
//! colors) happens as part of validation so a valid draft is also a clean one.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{Photo, PhotoBlob, ResumeData};

/// Upload limit used when no configuration overrides it (4 MiB).
pub const DEFAULT_MAX_PHOTO_BYTES: usize = 4 * 1024 * 1024;

/// Limits that come from configuration rather than from the field rules themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaLimits {
    pub max_photo_bytes: usize,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        SchemaLimits {
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every rule a draft failed. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` if no rule failed.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field rules
// ────────────────────────────────────────────────────────────────────────────

/// Optional free text: any string, trimmed.
pub fn optional_string(value: &str) -> String {
    value.trim().to_string()
}

/// Optional email. Present values need exactly one `@` with text on both sides.
pub fn optional_email(field: &str, value: &str, errors: &mut ValidationErrors) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let mut parts = value.split('@');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if !valid {
        errors.push(field, "Invalid email address");
    }
    value.to_string()
}

/// Optional hex color (`#rgb` or `#rrggbb`). A missing `#` is added; output is lowercase.
pub fn optional_color_hex(field: &str, value: &str, errors: &mut ValidationErrors) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let digits = value.strip_prefix('#').unwrap_or(value);
    let valid =
        matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        errors.push(field, "Color must be a hex value like #2563eb");
        return value.to_string();
    }
    format!("#{}", digits.to_ascii_lowercase())
}

/// Optional `yyyy-mm-dd` date.
pub fn optional_date(
    field: &str,
    value: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, "Date must be formatted as yyyy-mm-dd");
            None
        }
    }
}

/// Formats a stored date back into form input (`yyyy-mm-dd`, or empty).
pub fn input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Trims labels, drops empty ones, removes duplicates keeping the first occurrence.
pub fn skill_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim();
        if !label.is_empty() && !out.iter().any(|existing| existing == label) {
            out.push(label.to_string());
        }
    }
    out
}

/// Photo rules: blobs must be images within `max_bytes`; URLs must be absolute http(s).
pub fn photo(field: &str, photo: &Photo, max_bytes: usize, errors: &mut ValidationErrors) {
    match photo {
        Photo::None => {}
        Photo::Blob(blob) => blob_rules(field, blob, max_bytes, errors),
        Photo::Url(raw) => match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
            _ => errors.push(field, "Photo must be an http(s) URL"),
        },
    }
}

fn blob_rules(field: &str, blob: &PhotoBlob, max_bytes: usize, errors: &mut ValidationErrors) {
    if !blob.content_type.starts_with("image/") {
        errors.push(field, "Must be an image file");
    }
    if blob.size() > max_bytes {
        errors.push(
            field,
            format!("File must be less than {}", size_label(max_bytes)),
        );
    }
}

fn size_label(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{}KB", bytes / KB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Rules for a record loaded from outside the forms.
///
/// Only fields that end up in markup attributes are checked: the accent color and
/// the photo. Both are normalised the way the personal-info and photo forms would.
pub fn stored_record(
    resume: ResumeData,
    limits: SchemaLimits,
) -> Result<ResumeData, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let color_hex = optional_color_hex("colorHex", &resume.color_hex, &mut errors);
    let email = optional_email("email", &resume.email, &mut errors);
    photo("photo", &resume.photo, limits.max_photo_bytes, &mut errors);
    errors.into_result(ResumeData {
        color_hex,
        email,
        ..resume
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_optional_string_trims() {
        assert_eq!(optional_string("  My cool resume "), "My cool resume");
        assert_eq!(optional_string(""), "");
    }

    #[test]
    fn test_email_rules() {
        let mut errors = ValidationErrors::new();
        assert_eq!(optional_email("email", " ada@example.com ", &mut errors), "ada@example.com");
        assert_eq!(optional_email("email", "", &mut errors), "");
        assert!(errors.is_empty());

        optional_email("email", "ada.example.com", &mut errors);
        optional_email("email", "a@b@c", &mut errors);
        optional_email("email", "@example.com", &mut errors);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_color_rules() {
        let mut errors = ValidationErrors::new();
        assert_eq!(optional_color_hex("colorHex", "2563EB", &mut errors), "#2563eb");
        assert_eq!(optional_color_hex("colorHex", "#abc", &mut errors), "#abc");
        assert!(errors.is_empty());

        optional_color_hex("colorHex", "#12345", &mut errors);
        optional_color_hex("colorHex", "blue", &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("colorHex"));
    }

    #[test]
    fn test_date_rules() {
        let mut errors = ValidationErrors::new();
        assert_eq!(
            optional_date("startDate", "2023-01-15", &mut errors),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert_eq!(optional_date("startDate", " ", &mut errors), None);
        assert!(errors.is_empty());

        assert_eq!(optional_date("startDate", "15/01/2023", &mut errors), None);
        assert_eq!(optional_date("endDate", "2023-02-30", &mut errors), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_skill_labels_dedup_and_trim() {
        let skills = skill_labels([" Rust", "", "SQL ", "Rust", "  "]);
        assert_eq!(skills, vec!["Rust".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_photo_rules() {
        let mut errors = ValidationErrors::new();
        let png = PhotoBlob::new("image/png", Bytes::from_static(b"png"));
        photo("photo", &Photo::Blob(png), DEFAULT_MAX_PHOTO_BYTES, &mut errors);
        photo("photo", &Photo::Url("https://cdn.example.com/a.png".into()), 10, &mut errors);
        photo("photo", &Photo::None, 10, &mut errors);
        assert!(errors.is_empty());

        let pdf = PhotoBlob::new("application/pdf", Bytes::from_static(b"%PDF"));
        photo("photo", &Photo::Blob(pdf), DEFAULT_MAX_PHOTO_BYTES, &mut errors);
        assert_eq!(errors.iter().next().unwrap().message, "Must be an image file");

        let mut errors = ValidationErrors::new();
        let big = PhotoBlob::new("image/jpeg", Bytes::from(vec![0u8; 2 * 1024 * 1024 + 1]));
        photo("photo", &Photo::Blob(big), 2 * 1024 * 1024, &mut errors);
        assert_eq!(errors.iter().next().unwrap().message, "File must be less than 2MB");

        let mut errors = ValidationErrors::new();
        photo("photo", &Photo::Url("ftp://host/a.png".into()), 10, &mut errors);
        photo("photo", &Photo::Url("not a url".into()), 10, &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_size_limit_message_below_one_megabyte() {
        let mut errors = ValidationErrors::new();
        let blob = PhotoBlob::new("image/png", Bytes::from(vec![0u8; 600 * 1024]));
        photo("photo", &Photo::Blob(blob.clone()), 512 * 1024, &mut errors);
        photo("photo", &Photo::Blob(blob), 300, &mut errors);
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["File must be less than 512KB", "File must be less than 300 bytes"]
        );
        assert_eq!(size_label(3 * 1024 * 1024 / 2), "1.5MB");
    }

    #[test]
    fn test_stored_record_normalises_and_rejects_markup() {
        let clean = stored_record(
            ResumeData {
                color_hex: " 2563EB ".to_string(),
                photo: Photo::Url("https://cdn.example.com/me.png".to_string()),
                ..Default::default()
            },
            SchemaLimits::default(),
        )
        .unwrap();
        assert_eq!(clean.color_hex, "#2563eb");

        let errors = stored_record(
            ResumeData {
                color_hex: "red;position:fixed".to_string(),
                photo: Photo::Url("javascript:alert(1)".to_string()),
                ..Default::default()
            },
            SchemaLimits::default(),
        )
        .unwrap_err();
        assert!(errors.has_field("colorHex"));
        assert!(errors.has_field("photo"));
        assert_eq!(
            errors.to_string(),
            "colorHex: Color must be a hex value like #2563eb; photo: Photo must be an http(s) URL"
        );
    }
}
