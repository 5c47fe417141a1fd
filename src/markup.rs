//! Tolerant markup parsing with CSS selector queries.
//!
//! Both forum pages and ATOM feeds go through the same HTML5 parser. The
//! parser never fails: broken markup yields a best-effort tree and an empty
//! body yields an empty one. Element names come out lowercased, so feed
//! selectors are written in lowercase.
//!
//! The only failure mode is an unparsable selector string, surfaced as
//! [`MarkupError::InvalidSelector`].

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Errors raised while querying a parsed document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Compile a CSS selector, mapping the parser's borrowed error into an owned one.
pub fn compile(selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|e| MarkupError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// A parsed document tree.
///
/// Wraps [`scraper::Html`], which is not `Send`; keep a `Document` inside a
/// synchronous scope and never hold one across an `.await`.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse `body` as an HTML document.
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<Node<'_>>, MarkupError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).map(Node).collect())
    }

    /// The first element matching `selector`, if any.
    pub fn select_first(&self, selector: &str) -> Result<Option<Node<'_>>, MarkupError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).next().map(Node))
    }
}

/// A single element within a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Descendants of this node matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<Node<'a>>, MarkupError> {
        let selector = compile(selector)?;
        Ok(self.0.select(&selector).map(Node).collect())
    }

    /// The first descendant matching `selector`, if any.
    pub fn select_first(&self, selector: &str) -> Result<Option<Node<'a>>, MarkupError> {
        let selector = compile(selector)?;
        Ok(self.0.select(&selector).next().map(Node))
    }

    /// Concatenated text content of this node and its descendants.
    ///
    /// With `strip_whitespace`, leading and trailing whitespace is removed.
    pub fn text(&self, strip_whitespace: bool) -> String {
        let text: String = self.0.text().collect();
        if strip_whitespace {
            text.trim().to_string()
        } else {
            text
        }
    }

    /// Value of attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_body() {
        let doc = Document::parse("");
        assert!(doc.select("div.message").unwrap().is_empty());
        assert!(doc.select_first("entry").unwrap().is_none());
    }

    #[test]
    fn test_parse_malformed_markup() {
        let doc = Document::parse("<div class=\"message\"><b><font color='#FFF3A5'>Hi</b></div><p <<");
        let nodes = doc.select("div.message").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text(true), "Hi");
    }

    #[test]
    fn test_non_markup_body() {
        let doc = Document::parse("{\"not\": \"html\"}");
        assert!(doc.select("entry").unwrap().is_empty());
    }

    #[test]
    fn test_select_preserves_document_order() {
        let doc = Document::parse("<ul><li>one</li><li>two</li><li>three</li></ul>");
        let texts: Vec<String> = doc
            .select("li")
            .unwrap()
            .iter()
            .map(|n| n.text(true))
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_text_strip() {
        let doc = Document::parse("<p>  padded  </p>");
        let node = doc.select_first("p").unwrap().unwrap();
        assert_eq!(node.text(true), "padded");
        assert_eq!(node.text(false), "  padded  ");
    }

    #[test]
    fn test_attribute() {
        let doc = Document::parse("<a href=\"https://x/1\">link</a><a>bare</a>");
        let links = doc.select("a").unwrap();
        assert_eq!(links[0].attribute("href"), Some("https://x/1"));
        assert_eq!(links[1].attribute("href"), None);
    }

    #[test]
    fn test_nested_select_is_scoped() {
        let doc = Document::parse(
            "<div id=\"a\"><span>in a</span></div><div id=\"b\"><span>in b</span></div>",
        );
        let b = doc.select_first("#b").unwrap().unwrap();
        let spans = b.select("span").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(true), "in b");
    }

    #[test]
    fn test_atom_feed_parses_as_html() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>feed title</title>
  <entry>
    <author><name>alice</name></author>
    <link href="https://x/1" />
    <updated>2025-01-02T00:00:00Z</updated>
    <title>Finals Recap</title>
  </entry>
</feed>"#;
        let doc = Document::parse(feed);
        let entries = doc.select("entry").unwrap();
        assert_eq!(entries.len(), 1);
        let entry = entries[0];
        assert_eq!(entry.select_first("title").unwrap().unwrap().text(true), "Finals Recap");
        assert_eq!(
            entry.select_first("link").unwrap().unwrap().attribute("href"),
            Some("https://x/1")
        );
        assert_eq!(entry.select_first("author name").unwrap().unwrap().text(true), "alice");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse("<p>x</p>");
        let err = doc.select("p[").unwrap_err();
        assert!(matches!(err, MarkupError::InvalidSelector { ref selector, .. } if selector == "p["));
    }
}
