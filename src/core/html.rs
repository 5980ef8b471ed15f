// src/core/html.rs
//
// Structural search over a parsed page. The extractor only needs two
// capabilities, so they live behind `MarkupTree`; `HtmlPage` provides them
// on top of `scraper`. Tests can supply their own tree.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::starts_with_label;

/// One text node under the description container, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLeaf {
    /// Raw text, untrimmed.
    pub text: String,
    /// Whether the immediate parent element carries any non-blank text.
    pub parent_has_text: bool,
}

impl TextLeaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), parent_has_text: true }
    }
}

pub trait MarkupTree {
    /// Whitespace-stripped strings (document order) nested under the first
    /// element whose visible text starts with `label`.
    fn find_first_text_starting_with(&self, label: &str) -> Option<Vec<String>>;

    /// All text leaves under the description container, depth-first.
    /// `None` when the page has no such container.
    fn container_leaves(&self) -> Option<Vec<TextLeaf>>;
}

/// Elements whose text is never rendered.
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

pub struct HtmlPage<'s> {
    doc: Html,
    container: &'s Selector,
}

impl<'s> HtmlPage<'s> {
    pub fn parse(markup: &str, container: &'s Selector) -> Self {
        Self { doc: Html::parse_document(markup), container }
    }
}

fn is_invisible(el: &ElementRef) -> bool {
    INVISIBLE.iter().any(|t| el.value().name().eq_ignore_ascii_case(t))
}

fn has_visible_text(el: &ElementRef) -> bool {
    el.text().any(|t| !t.trim().is_empty())
}

impl MarkupTree for HtmlPage<'_> {
    fn find_first_text_starting_with(&self, label: &str) -> Option<Vec<String>> {
        // Pre-order walk: the outermost element whose text begins with the
        // label wins, same as a first-match search from the root.
        let hit = self
            .doc
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| {
                let text: String = el.text().collect();
                starts_with_label(&text, label)
            })?;

        Some(
            hit.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    fn container_leaves(&self) -> Option<Vec<TextLeaf>> {
        let container = self.doc.select(self.container).next()?;
        let mut leaves = Vec::new();

        for node in container.descendants() {
            let Some(text) = node.value().as_text() else { continue };
            let parent = node.parent().and_then(ElementRef::wrap);
            if parent.as_ref().is_some_and(is_invisible) {
                continue;
            }
            leaves.push(TextLeaf {
                text: (**text).to_string(),
                parent_has_text: parent.as_ref().is_some_and(has_visible_text),
            });
        }
        Some(leaves)
    }
}
