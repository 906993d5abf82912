//! Document tree produced by the template renderers.
//!
//! Attribute and style order is insertion order, so identical input always serialises
//! to identical markup.

use serde::Serialize;

use crate::models::TemplateId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(&'static str, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<(&'static str, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            attrs: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Adds a class, joining any classes already set.
    pub fn class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|(n, _)| *n == "class") {
            Some((_, existing)) => {
                existing.push(' ');
                existing.push_str(class);
                self
            }
            None => self.attr("class", class),
        }
    }

    /// Marks the element as a named résumé section.
    pub fn section(self, name: &str) -> Self {
        self.attr("data-section", name)
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.style.push((property, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Appends `child` only when present.
    pub fn maybe_child(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text { text: text.into() })
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for the first element matching `pred`, including `self`.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(el) => el.find(pred),
            Node::Text { .. } => None,
        })
    }

    /// All elements matching `pred`, in document order.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            if let Node::Element(el) = child {
                el.find_all(pred, out);
            }
        }
    }

    /// Concatenated text of this subtree, one text node per line.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.collect_text(&mut lines);
        lines.join("\n")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Node::Element(el) => el.collect_text(out),
                Node::Text { text } => out.push(text),
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, out);
            out.push('"');
        }
        if !self.style.is_empty() {
            let css: Vec<String> = self
                .style
                .iter()
                .map(|(p, v)| format!("{p}:{v}"))
                .collect();
            out.push_str(" style=\"");
            escape_into(&css.join(";"), out);
            out.push('"');
        }
        out.push('>');
        if is_void(self.tag) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text { text } => escape_into(text, out),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "hr" | "br")
}

/// HTML-escapes `text`. Carriage returns are normalised to `\n`.
fn escape_into(text: &str, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push('\n');
                }
            }
            _ => out.push(c),
        }
    }
}

/// A rendered résumé: the page tree plus what produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub template: TemplateId,
    /// `None` while the content is hidden awaiting a width measurement.
    pub scale: Option<f64>,
    pub root: Element,
}

impl Document {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.root.write_html(&mut out);
        out
    }

    /// The element tagged `data-section="<name>"`, if rendered.
    pub fn section(&self, name: &str) -> Option<&Element> {
        self.root
            .find(&|el| el.get_attr("data-section") == Some(name))
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escaping_and_order() {
        let el = Element::new("p")
            .class("a")
            .style("color", "#000")
            .style("font-size", "12px")
            .text("Tom & \"Jerry\" <script>");
        let doc = Document {
            template: TemplateId::Default,
            scale: Some(1.0),
            root: el,
        };
        assert_eq!(
            doc.to_html(),
            "<p class=\"a\" style=\"color:#000;font-size:12px\">Tom &amp; &quot;Jerry&quot; &lt;script&gt;</p>"
        );
    }

    #[test]
    fn test_classes_accumulate() {
        let el = Element::new("div").class("flex").class("invisible");
        assert_eq!(el.get_attr("class"), Some("flex invisible"));
        assert_eq!(el.attrs.len(), 1);
    }

    #[test]
    fn test_void_elements_have_no_close_tag() {
        let mut out = String::new();
        Element::new("div")
            .child(Element::new("hr"))
            .child(Element::new("img").attr("src", "/x"))
            .write_html(&mut out);
        assert_eq!(out, "<div><hr><img src=\"/x\"></div>");
    }

    #[test]
    fn test_carriage_returns_normalised() {
        let mut out = String::new();
        escape_into("a\r\nb\rc", &mut out);
        assert_eq!(out, "a\nb\nc");
    }

    #[test]
    fn test_find_section_and_text() {
        let root = Element::new("div")
            .child(Element::new("section").section("skills").text("Rust"))
            .text("tail");
        assert_eq!(root.text_content(), "Rust\ntail");
        assert!(root
            .find(&|el| el.get_attr("data-section") == Some("skills"))
            .is_some());
        assert!(root
            .find(&|el| el.get_attr("data-section") == Some("summary"))
            .is_none());
    }
}
