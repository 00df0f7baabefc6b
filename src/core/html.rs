// src/core/html.rs
//! Typed view over a parsed page.
//!
//! Parsers never walk the raw tree; they ask a [`Node`] for an attribute,
//! its children or its text.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

/// Build a selector from a literal. Literals are checked by the tests.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad selector {css}: {e:?}"))
}

pub struct Document(Html);

impl Document {
    pub fn parse(html: &str) -> Self {
        Document(Html::parse_document(html))
    }

    pub fn select<'a, 'b>(&'a self, sel: &'b Selector) -> impl Iterator<Item = Node<'a>> + 'b
    where
        'a: 'b,
    {
        self.0.select(sel).map(Node)
    }

    pub fn first<'a>(&'a self, sel: &Selector) -> Option<Node<'a>> {
        self.0.select(sel).next().map(Node)
    }

    /// `<title>` text, NBSP kept as-is.
    pub fn title(&self) -> Option<String> {
        let sel = selector("title");
        self.first(&sel).map(|n| n.text()).filter(|t| !t.trim().is_empty())
    }
}

#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn attribute(self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Element children only
    pub fn children(self) -> impl Iterator<Item = Node<'a>> {
        self.0.children().filter_map(ElementRef::wrap).map(Node)
    }

    pub fn select<'b>(self, sel: &'b Selector) -> impl Iterator<Item = Node<'a>> + 'b
    where
        'a: 'b,
    {
        self.0.select(sel).map(Node)
    }

    /// All descendant text, concatenated verbatim.
    pub fn text(self) -> String {
        self.0.text().collect()
    }

    /// Descendant text, leaving out everything inside `skip`.
    pub fn text_without(self, skip: Node<'a>) -> String {
        let skip = skip.0.id();
        self.0
            .descendants()
            .filter(|n| !n.ancestors().any(|a| a.id() == skip))
            .filter_map(|n| n.value().as_text().map(|t| &**t))
            .collect()
    }

    /// Text with `<br>` and block boundaries turned into newlines.
    pub fn text_lines(self) -> String {
        let mut out = s!();
        for n in self.0.descendants().skip(1) {
            let v = n.value();
            if let Some(t) = v.as_text() {
                out.push_str(t);
            } else if let Some(el) = v.as_element() {
                if matches!(el.name(), "br" | "p" | "div" | "li" | "tr") {
                    out.push('\n');
                }
            }
        }
        out
    }

    /// First non-blank sibling after this element, as normalized text.
    pub fn following_text(self) -> Option<String> {
        let mut cur = self.0.next_sibling();
        while let Some(n) = cur {
            let text = if let Some(t) = n.value().as_text() {
                normalize_ws(t)
            } else if let Some(el) = ElementRef::wrap(n) {
                normalize_ws(&el.text().collect::<String>())
            } else {
                s!()
            };
            if !text.is_empty() {
                return Some(text);
            }
            cur = n.next_sibling();
        }
        None
    }
}
