//! Default template: tinted left third (header + skills), right two thirds for
//! summary, experience and education, with accent rules between sections.

use crate::models::{Education, ResumeData, TemplateId, WorkExperience};
use crate::render::document::Element;
use crate::render::sections::{self, Radii};
use crate::render::{RenderInput, TemplateRenderer};

const RADII: Radii = Radii {
    photo: "10%",
    badge: "8px",
};

const SIDEBAR_TINT: &str = "#e5e7eb";

pub struct DefaultTemplate;

impl TemplateRenderer for DefaultTemplate {
    fn template(&self) -> TemplateId {
        TemplateId::Default
    }

    fn page(&self, input: &RenderInput<'_>) -> Element {
        let resume = input.resume;
        let accent = sections::accent(resume);

        let left = Element::new("div")
            .class("w-1/3 space-y-6 p-4")
            .style("width", "33.333%")
            .style("background-color", SIDEBAR_TINT)
            .style("padding", "16px")
            .child(personal_header(resume, input.photo_src, accent))
            .maybe_child(skills(resume, accent));

        let right = Element::new("div")
            .class("w-2/3 space-y-6 p-4")
            .style("width", "66.667%")
            .style("padding", "16px")
            .maybe_child(summary(resume, accent))
            .maybe_child(work_experience(resume, accent))
            .maybe_child(education(resume, accent));

        Element::new("div")
            .class("flex justify-between")
            .style("display", "flex")
            .style("min-height", "1123px")
            .child(left)
            .child(right)
    }
}

fn heading(text: &str, accent: &str) -> Element {
    Element::new("p")
        .class("text-lg font-semibold")
        .attr("data-role", "heading")
        .style("color", accent)
        .text(text)
}

fn rule(accent: &str) -> Element {
    Element::new("hr")
        .class("border-2")
        .style("border-color", accent)
}

fn personal_header(resume: &ResumeData, photo_src: Option<&str>, accent: &str) -> Element {
    let photo = photo_src.map(|src| {
        Element::new("img")
            .attr("src", src)
            .attr("width", "100")
            .attr("height", "100")
            .attr("alt", "Author photo")
            .class("aspect-square object-cover")
            .style(
                "border-radius",
                sections::photo_radius(resume.border_style, &RADII),
            )
    });

    Element::new("div")
        .section("personal")
        .maybe_child(photo)
        .child(
            Element::new("h1")
                .class("text-3xl font-bold")
                .style("color", accent)
                .text(sections::full_name(resume)),
        )
        .child(Element::new("p").class("text-lg").text(&resume.job_title))
        .children(
            sections::contact_parts(resume)
                .into_iter()
                .map(|line| Element::new("p").class("text-sm text-gray-500").text(line)),
        )
}

fn summary(resume: &ResumeData, accent: &str) -> Option<Element> {
    let text = sections::summary(resume)?;
    Some(
        Element::new("div")
            .section("summary")
            .class("break-inside-avoid space-y-3")
            .child(heading("Professional profile", accent))
            .child(
                Element::new("div")
                    .class("whitespace-pre-line text-sm")
                    .text(text),
            ),
    )
}

fn entry_row(title: String, dates: Option<String>, accent: &str) -> Element {
    Element::new("div")
        .class("flex items-center justify-between text-sm font-semibold")
        .style("color", accent)
        .child(Element::new("span").text(title))
        .maybe_child(dates.map(|d| Element::new("span").attr("data-role", "dates").text(d)))
}

fn work_entry(exp: &WorkExperience, accent: &str) -> Element {
    Element::new("div")
        .class("break-inside-avoid space-y-1")
        .attr("data-role", "entry")
        .child(entry_row(
            sections::headline(&exp.position, &exp.company),
            sections::date_range(exp.start_date, exp.end_date),
            accent,
        ))
        .child(
            Element::new("div")
                .class("whitespace-pre-line text-xs")
                .text(&exp.description),
        )
}

fn work_experience(resume: &ResumeData, accent: &str) -> Option<Element> {
    let entries = sections::work_experiences(resume)?;
    Some(
        Element::new("div")
            .section("work-experience")
            .class("space-y-3")
            .child(rule(accent))
            .child(heading("Work experience", accent))
            .children(entries.into_iter().map(|exp| work_entry(exp, accent))),
    )
}

fn education_entry(edu: &Education, accent: &str) -> Element {
    Element::new("div")
        .class("break-inside-avoid space-y-1")
        .attr("data-role", "entry")
        .child(entry_row(
            sections::headline(&edu.degree, &edu.school),
            sections::date_range(edu.start_date, edu.end_date),
            accent,
        ))
}

fn education(resume: &ResumeData, accent: &str) -> Option<Element> {
    let entries = sections::educations(resume)?;
    Some(
        Element::new("div")
            .section("education")
            .class("space-y-3")
            .child(rule(accent))
            .child(heading("Education", accent))
            .children(entries.into_iter().map(|edu| education_entry(edu, accent))),
    )
}

fn skills(resume: &ResumeData, accent: &str) -> Option<Element> {
    let labels = sections::skills(resume)?;
    let radius = sections::badge_radius(resume.border_style, &RADII);
    Some(
        Element::new("div")
            .section("skills")
            .class("break-inside-avoid space-y-3")
            .child(rule(accent))
            .child(heading("Skills", accent))
            .child(
                Element::new("div")
                    .class("flex flex-wrap gap-2")
                    .children(labels.iter().map(|skill| {
                        Element::new("span")
                            .attr("data-role", "skill")
                            .class("badge text-white")
                            .style("background-color", accent)
                            .style("border-radius", radius)
                            .text(skill)
                    })),
            ),
    )
}
