//! Minimalist template: one column, centred header, no rules or tinted panels.

use crate::models::{ResumeData, TemplateId};
use crate::render::document::Element;
use crate::render::sections::{self, Radii};
use crate::render::{RenderInput, TemplateRenderer};

const RADII: Radii = Radii {
    photo: "8%",
    badge: "12px",
};

pub struct MinimalistTemplate;

impl TemplateRenderer for MinimalistTemplate {
    fn template(&self) -> TemplateId {
        TemplateId::Minimalist
    }

    fn page(&self, input: &RenderInput<'_>) -> Element {
        let resume = input.resume;
        let accent = sections::accent(resume);

        Element::new("div")
            .class("space-y-6 p-8")
            .style("padding", "32px")
            .style("font-family", "Helvetica, Arial, sans-serif")
            .child(header(resume, input.photo_src))
            .maybe_child(sections::summary(resume).map(|text| {
                block("summary", "Professional Summary", accent)
                    .child(Element::new("p").class("whitespace-pre-line text-sm").text(text))
            }))
            .maybe_child(sections::work_experiences(resume).map(|entries| {
                block("work-experience", "Work Experience", accent).children(entries.into_iter().map(
                    |exp| {
                        entry(
                            sections::headline(&exp.position, &exp.company),
                            sections::date_range(exp.start_date, exp.end_date),
                        )
                        .maybe_child((!exp.description.is_empty()).then(|| {
                            Element::new("p")
                                .class("whitespace-pre-line text-xs")
                                .text(&exp.description)
                        }))
                    },
                ))
            }))
            .maybe_child(sections::educations(resume).map(|entries| {
                block("education", "Education", accent).children(entries.into_iter().map(|edu| {
                    entry(
                        sections::headline(&edu.degree, &edu.school),
                        sections::date_range(edu.start_date, edu.end_date),
                    )
                }))
            }))
            .maybe_child(sections::skills(resume).map(|labels| {
                let radius = sections::badge_radius(resume.border_style, &RADII);
                block("skills", "Skills", accent).child(
                    Element::new("div")
                        .class("flex flex-wrap gap-2")
                        .style("display", "flex")
                        .style("gap", "8px")
                        .children(labels.iter().map(|skill| {
                            Element::new("span")
                                .attr("data-role", "skill")
                                .style("background-color", accent)
                                .style("color", "#ffffff")
                                .style("padding", "2px 8px")
                                .style("border-radius", radius)
                                .text(skill)
                        })),
                )
            }))
    }
}

fn header(resume: &ResumeData, photo_src: Option<&str>) -> Element {
    let photo = photo_src.map(|src| {
        Element::new("img")
            .attr("src", src)
            .attr("width", "80")
            .attr("height", "80")
            .attr("alt", "Author photo")
            .style("margin", "0 auto")
            .style(
                "border-radius",
                sections::photo_radius(resume.border_style, &RADII),
            )
    });

    let contact = sections::contact_parts(resume);
    Element::new("div")
        .section("personal")
        .class("text-center")
        .style("text-align", "center")
        .maybe_child(photo)
        .child(
            Element::new("h1")
                .class("text-2xl font-light tracking-wide")
                .text(sections::full_name(resume)),
        )
        .maybe_child(
            (!resume.job_title.is_empty())
                .then(|| Element::new("p").class("text-sm").text(&resume.job_title)),
        )
        .maybe_child((!contact.is_empty()).then(|| {
            Element::new("p")
                .class("text-xs text-gray-500")
                .text(contact.join(" | "))
        }))
}

/// A titled section with an accent heading.
fn block(section: &str, title: &str, accent: &str) -> Element {
    Element::new("div").section(section).class("space-y-2").child(
        Element::new("h2")
            .class("text-sm font-semibold uppercase tracking-wider")
            .attr("data-role", "heading")
            .style("color", accent)
            .text(title),
    )
}

fn entry(title: String, dates: Option<String>) -> Element {
    Element::new("div")
        .attr("data-role", "entry")
        .class("break-inside-avoid")
        .child(Element::new("h3").class("text-sm font-medium").text(title))
        .maybe_child(dates.map(|d| {
            Element::new("p")
                .attr("data-role", "dates")
                .class("text-xs text-gray-500")
                .text(d)
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sections::{AvailableWidth, REFERENCE_WIDTH};

    #[test]
    fn test_single_column_without_rules() {
        let resume = ResumeData {
            first_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555".to_string(),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let doc = MinimalistTemplate.render(&RenderInput {
            resume: &resume,
            photo_src: None,
            width: AvailableWidth::Measured(REFERENCE_WIDTH),
            reference_width: REFERENCE_WIDTH,
        });
        assert!(doc.root.find(&|el| el.tag == "hr").is_none());
        assert!(doc.to_html().contains("555 | ada@example.com"));
    }
}
