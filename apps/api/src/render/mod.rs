// Template rendering: pure projection of ResumeData into a document tree.
// Variants share section policy (sections.rs) and differ only in arrangement.
// A PreviewMount is a live renderer instance bound to one session's state.

pub mod default;
pub mod document;
pub mod handlers;
pub mod minimalist;
pub mod preview;
pub mod sections;
pub mod two_column;

use crate::models::{ResumeData, TemplateId};
use document::{Document, Element};
use sections::{scale_factor, AvailableWidth};

pub use preview::PreviewMount;

/// Everything a render depends on. Same input, same document.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub resume: &'a ResumeData,
    /// Display source for the photo, already resolved by the mount.
    pub photo_src: Option<&'a str>,
    pub width: AvailableWidth,
    pub reference_width: f64,
}

/// One visual template.
pub trait TemplateRenderer: Send + Sync {
    fn template(&self) -> TemplateId;

    /// The page content at the reference width.
    fn page(&self, input: &RenderInput<'_>) -> Element;

    /// The page wrapped in its scaling frame.
    ///
    /// A measured width scales the page by `width / reference_width`. Without a
    /// usable measurement the page is laid out at scale 1 but hidden.
    fn render(&self, input: &RenderInput<'_>) -> Document {
        let scale = scale_factor(input.width, input.reference_width);
        let mut content = self
            .page(input)
            .attr("id", "resumePreviewContent")
            .style("width", format!("{}px", input.reference_width));
        content = match scale {
            Some(factor) => content.style("zoom", factor.to_string()),
            None => content.class("invisible").style("visibility", "hidden"),
        };

        let root = Element::new("div")
            .class("resume-preview")
            .attr("data-template", self.template().as_str())
            .style("aspect-ratio", "210/297")
            .style("background", "#ffffff")
            .style("color", "#000000")
            .child(content);

        Document {
            template: self.template(),
            scale,
            root,
        }
    }
}

static DEFAULT: default::DefaultTemplate = default::DefaultTemplate;
static MINIMALIST: minimalist::MinimalistTemplate = minimalist::MinimalistTemplate;
static TWO_COLUMN: two_column::ClassicTwoColumnTemplate = two_column::ClassicTwoColumnTemplate;

/// The renderer for a selection. No selection renders with the default variant.
pub fn renderer_for(template: Option<TemplateId>) -> &'static dyn TemplateRenderer {
    match template.unwrap_or_default() {
        TemplateId::Default => &DEFAULT,
        TemplateId::Minimalist => &MINIMALIST,
        TemplateId::ClassicTwoColumn => &TWO_COLUMN,
    }
}

/// Renders `resume` with the template it selects.
pub fn render_resume(input: &RenderInput<'_>) -> Document {
    renderer_for(input.resume.selected_template()).render(input)
}
