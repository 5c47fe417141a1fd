//! Data models for normalized news items and the response envelope.
//!
//! - [`NewsItem`]: one normalized item, identical in shape for every source
//! - [`ResponseEnvelope`]: the `{"data": {"status", "segments"}}` wrapper
//!   returned by every `/api/<source>_news` route
//!
//! Every field is a required string. Missing upstream values are replaced
//! by per-source sentinel strings before an item is built, so the JSON never
//! omits a key.

use serde::{Deserialize, Serialize};

/// Status reported inside the envelope when the upstream fetch fails.
pub const FETCH_FAILED_STATUS: u16 = 500;

/// A news item in its canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// Headline, never empty.
    pub title: String,
    /// Author name or the source's author sentinel.
    pub author: String,
    /// `YYYY-MM-DD` or the literal `"Unknown Date"`.
    pub date: String,
    /// Absolute URL of the item, or a sentinel such as `"#"`.
    pub url_path: String,
    /// Body snippet or placeholder text.
    pub description: String,
}

/// The outer response object wrapping a status code and the item list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseEnvelope {
    pub data: EnvelopeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnvelopeData {
    /// HTTP-style status of the upstream fetch (the upstream 2xx code, or 500).
    pub status: u16,
    /// Normalized items in source document order.
    pub segments: Vec<NewsItem>,
}

impl ResponseEnvelope {
    /// Wrap `segments` with `status`.
    ///
    /// A 500 status always carries an empty list; any items passed alongside
    /// it are discarded.
    pub fn build(status: u16, segments: Vec<NewsItem>) -> Self {
        let segments = if status == FETCH_FAILED_STATUS {
            Vec::new()
        } else {
            segments
        };
        Self {
            data: EnvelopeData { status, segments },
        }
    }

    /// Envelope reported when the upstream fetch fails.
    pub fn failed() -> Self {
        Self::build(FETCH_FAILED_STATUS, Vec::new())
    }

    pub fn status(&self) -> u16 {
        self.data.status
    }

    pub fn segments(&self) -> &[NewsItem] {
        &self.data.segments
    }
}
