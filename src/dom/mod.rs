//! Document model for Distributed.
//!
//! The page has a fixed set of regions that handlers render into, plus the
//! location fragment that drives routing. Regions hold HTML; text written
//! through [`Document::set_text`] is escaped first.

mod text;

pub use text::{escape_html, html_to_text};

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The regions of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Error display.
    Error,
    /// Main content area.
    Content,
    /// Page heading (the current board or route).
    Heading,
    /// Board description shown above the post list.
    Description,
    /// Login/logout link.
    Login,
}

impl ElementId {
    /// All regions, in page order.
    pub const ALL: [ElementId; 5] = [
        ElementId::Login,
        ElementId::Heading,
        ElementId::Error,
        ElementId::Description,
        ElementId::Content,
    ];

    /// DOM id of the region.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::Error => "error",
            ElementId::Content => "content",
            ElementId::Heading => "board",
            ElementId::Description => "description",
            ElementId::Login => "login",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single region's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Inner HTML.
    pub html: String,
    /// Link target, for anchor elements.
    pub href: Option<String>,
}

#[derive(Debug, Default)]
struct DocumentState {
    elements: HashMap<ElementId, Element>,
    fragment: String,
}

/// The page: its regions and the location fragment.
#[derive(Debug)]
pub struct Document {
    state: Mutex<DocumentState>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a fresh page with the logged-out login link.
    pub fn new() -> Self {
        let mut elements = HashMap::new();
        for id in ElementId::ALL {
            elements.insert(id, Element::default());
        }
        elements.insert(
            ElementId::Login,
            Element {
                html: "Login".to_string(),
                href: Some("#login".to_string()),
            },
        );
        Self {
            state: Mutex::new(DocumentState {
                elements,
                fragment: String::new(),
            }),
        }
    }

    /// Replace a region's HTML.
    pub fn set_html(&self, id: ElementId, html: impl Into<String>) {
        self.lock().elements.entry(id).or_default().html = html.into();
    }

    /// Replace a region's content with escaped text.
    pub fn set_text(&self, id: ElementId, text: &str) {
        self.set_html(id, escape_html(text));
    }

    /// Empty a region.
    pub fn clear(&self, id: ElementId) {
        self.set_html(id, String::new());
    }

    /// Set a region's link target.
    pub fn set_href(&self, id: ElementId, href: impl Into<String>) {
        self.lock().elements.entry(id).or_default().href = Some(href.into());
    }

    /// A region's HTML.
    pub fn html(&self, id: ElementId) -> String {
        self.lock()
            .elements
            .get(&id)
            .map(|e| e.html.clone())
            .unwrap_or_default()
    }

    /// A region's content as plain text.
    pub fn text(&self, id: ElementId) -> String {
        html_to_text(&self.html(id))
    }

    /// A region's link target.
    pub fn href(&self, id: ElementId) -> Option<String> {
        self.lock().elements.get(&id).and_then(|e| e.href.clone())
    }

    /// The current location fragment, without `#`.
    pub fn fragment(&self) -> String {
        self.lock().fragment.clone()
    }

    /// Set the location fragment; a leading `#` is dropped.
    pub fn set_fragment(&self, fragment: &str) {
        self.lock().fragment = fragment.strip_prefix('#').unwrap_or(fragment).to_string();
    }

    /// Render the page as text, one labelled section per non-empty region.
    pub fn render_text(&self) -> String {
        self.render(|doc, id| doc.text(id))
    }

    /// Render the page as HTML, one labelled section per non-empty region.
    pub fn render_html(&self) -> String {
        self.render(|doc, id| doc.html(id))
    }

    fn render(&self, region: impl Fn(&Self, ElementId) -> String) -> String {
        let mut out = String::new();
        for id in ElementId::ALL {
            let body = region(self, id);
            if body.trim().is_empty() {
                continue;
            }
            out.push_str(&format!("[{id}]"));
            if let Some(href) = self.href(id) {
                out.push_str(&format!(" ({href})"));
            }
            out.push('\n');
            out.push_str(body.trim_end());
            out.push_str("\n\n");
        }
        out
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert_eq!(doc.html(ElementId::Login), "Login");
        assert_eq!(doc.href(ElementId::Login), Some("#login".to_string()));
        assert_eq!(doc.html(ElementId::Content), "");
        assert_eq!(doc.fragment(), "");
    }

    #[test]
    fn test_set_text_escapes() {
        let doc = Document::new();
        doc.set_text(ElementId::Error, "<b>bad</b>");
        assert_eq!(doc.html(ElementId::Error), "&lt;b&gt;bad&lt;/b&gt;");
        assert_eq!(doc.text(ElementId::Error), "<b>bad</b>");
    }

    #[test]
    fn test_set_html_and_clear() {
        let doc = Document::new();
        doc.set_html(ElementId::Content, "<p>one</p>");
        doc.set_html(ElementId::Content, "<p>two</p>");
        assert_eq!(doc.html(ElementId::Content), "<p>two</p>");
        doc.clear(ElementId::Content);
        assert_eq!(doc.html(ElementId::Content), "");
    }

    #[test]
    fn test_set_fragment_strips_hash() {
        let doc = Document::new();
        doc.set_fragment("#comments=42");
        assert_eq!(doc.fragment(), "comments=42");
        doc.set_fragment("general");
        assert_eq!(doc.fragment(), "general");
    }

    #[test]
    fn test_render_text_skips_empty_regions() {
        let doc = Document::new();
        doc.set_text(ElementId::Heading, "All");
        doc.set_html(ElementId::Content, "<p>There are no posts on this board</p>");

        let rendered = doc.render_text();
        assert!(rendered.starts_with("[login] (#login)\nLogin\n\n[board]\nAll\n\n"));
        assert!(rendered.contains("[content]\nThere are no posts on this board\n"));
        assert!(!rendered.contains("[error]"));
    }
}
