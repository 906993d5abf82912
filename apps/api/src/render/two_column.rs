//! Classic two-column template: fixed-width tinted sidebar with photo, contact
//! details and skills; main column with summary, experience and education.

use crate::models::{Education, ResumeData, TemplateId, WorkExperience};
use crate::render::document::Element;
use crate::render::sections::{self, Radii};
use crate::render::{RenderInput, TemplateRenderer};

const RADII: Radii = Radii {
    photo: "12%",
    badge: "4px",
};

/// Sidebar width in reference-width pixels.
pub const SIDEBAR_WIDTH: f64 = 240.0;
const SIDEBAR_TINT: &str = "#f1f5f9";

pub struct ClassicTwoColumnTemplate;

impl TemplateRenderer for ClassicTwoColumnTemplate {
    fn template(&self) -> TemplateId {
        TemplateId::ClassicTwoColumn
    }

    fn page(&self, input: &RenderInput<'_>) -> Element {
        let resume = input.resume;
        let accent = sections::accent(resume);
        let main_width = (input.reference_width - SIDEBAR_WIDTH).max(0.0);

        Element::new("div")
            .class("grid")
            .style("display", "grid")
            .style(
                "grid-template-columns",
                format!("{SIDEBAR_WIDTH}px {main_width}px"),
            )
            .style("min-height", "1123px")
            .child(sidebar(resume, input.photo_src, accent))
            .child(
                Element::new("main")
                    .class("space-y-5 p-6")
                    .style("padding", "24px")
                    .maybe_child(sections::summary(resume).map(|text| {
                        main_section("summary", "Profile", accent).child(
                            Element::new("p")
                                .class("whitespace-pre-line text-sm")
                                .text(text),
                        )
                    }))
                    .maybe_child(sections::work_experiences(resume).map(|entries| {
                        main_section("work-experience", "Experience", accent)
                            .children(entries.into_iter().map(work_entry))
                    }))
                    .maybe_child(sections::educations(resume).map(|entries| {
                        main_section("education", "Education", accent)
                            .children(entries.into_iter().map(education_entry))
                    })),
            )
    }
}

fn sidebar(resume: &ResumeData, photo_src: Option<&str>, accent: &str) -> Element {
    let photo = photo_src.map(|src| {
        Element::new("img")
            .attr("src", src)
            .attr("width", "160")
            .attr("height", "160")
            .attr("alt", "Author photo")
            .class("object-cover")
            .style(
                "border-radius",
                sections::photo_radius(resume.border_style, &RADII),
            )
    });

    let personal = Element::new("div")
        .section("personal")
        .class("space-y-1")
        .maybe_child(photo)
        .child(
            Element::new("h1")
                .class("text-2xl font-bold")
                .text(sections::full_name(resume)),
        )
        .child(
            Element::new("p")
                .class("text-sm font-medium")
                .style("color", accent)
                .text(&resume.job_title),
        )
        .children(
            sections::contact_parts(resume)
                .into_iter()
                .map(|line| Element::new("p").class("text-xs").text(line)),
        );

    let skills = sections::skills(resume).map(|labels| {
        let radius = sections::badge_radius(resume.border_style, &RADII);
        Element::new("div")
            .section("skills")
            .class("space-y-2")
            .child(heading("Skills", accent))
            .children(labels.iter().map(|skill| {
                Element::new("span")
                    .attr("data-role", "skill")
                    .class("inline-block text-xs text-white")
                    .style("background-color", accent)
                    .style("border-radius", radius)
                    .style("padding", "2px 6px")
                    .style("margin", "0 4px 4px 0")
                    .text(skill)
            }))
    });

    Element::new("aside")
        .class("space-y-6 p-5")
        .style("background-color", SIDEBAR_TINT)
        .style("padding", "20px")
        .child(personal)
        .maybe_child(skills)
}

fn heading(text: &str, accent: &str) -> Element {
    Element::new("h2")
        .class("text-xs font-bold uppercase tracking-widest")
        .attr("data-role", "heading")
        .style("color", accent)
        .text(text)
}

/// A main-column section: accent rule, then heading.
fn main_section(section: &str, title: &str, accent: &str) -> Element {
    Element::new("section")
        .section(section)
        .class("space-y-3")
        .child(Element::new("hr").style("border-color", accent))
        .child(heading(title, accent))
}

fn entry(title: String, dates: Option<String>) -> Element {
    Element::new("div")
        .attr("data-role", "entry")
        .class("break-inside-avoid space-y-1")
        .child(Element::new("p").class("text-sm font-semibold").text(title))
        .maybe_child(dates.map(|d| {
            Element::new("p")
                .attr("data-role", "dates")
                .class("text-xs italic")
                .text(d)
        }))
}

fn work_entry(exp: &WorkExperience) -> Element {
    entry(
        sections::headline(&exp.position, &exp.company),
        sections::date_range(exp.start_date, exp.end_date),
    )
    .maybe_child((!exp.description.is_empty()).then(|| {
        Element::new("p")
            .class("whitespace-pre-line text-xs")
            .text(&exp.description)
    }))
}

fn education_entry(edu: &Education) -> Element {
    entry(
        sections::headline(&edu.degree, &edu.school),
        sections::date_range(edu.start_date, edu.end_date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sections::{AvailableWidth, REFERENCE_WIDTH};

    #[test]
    fn test_sidebar_is_fixed_width_and_holds_skills() {
        let resume = ResumeData {
            skills: vec!["Go".to_string()],
            summary: "Hello".to_string(),
            ..Default::default()
        };
        let doc = ClassicTwoColumnTemplate.render(&RenderInput {
            resume: &resume,
            photo_src: Some("https://cdn.example.com/me.png"),
            width: AvailableWidth::Measured(REFERENCE_WIDTH),
            reference_width: REFERENCE_WIDTH,
        });
        let grid = doc.root.find(&|el| el.tag == "div" && el.get_style("display") == Some("grid")).unwrap();
        assert_eq!(grid.get_style("grid-template-columns"), Some("240px 554px"));

        let aside = doc.root.find(&|el| el.tag == "aside").unwrap();
        assert!(aside.find(&|el| el.get_attr("data-section") == Some("skills")).is_some());
        assert!(aside.find(&|el| el.tag == "img").is_some());
        assert!(aside.find(&|el| el.get_attr("data-section") == Some("summary")).is_none());
    }
}
