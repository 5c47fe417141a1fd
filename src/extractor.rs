//! Config-driven item extraction.
//!
//! Extraction runs in three stages for every source:
//!
//! 1. **Container discovery**: select all item containers. Zero containers is
//!    a valid, empty result and not an error.
//! 2. **Field extraction**: read raw field values from each container using
//!    the source's [`FieldRule`]s. A rule whose selector matches nothing
//!    yields `None`, which the normalizer later turns into a sentinel.
//! 3. **Isolation**: each candidate item is its own
//!    `Result<_, ExtractionFault>`. Faulty items are logged and skipped; the
//!    remaining containers are still processed.

use crate::markup::{Document, MarkupError, Node};
use crate::models::NewsItem;
use crate::normalize::normalize;
use crate::scrapers::{FieldRule, Read, SourceConfig, TitleRule};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single candidate item was skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionFault {
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("title is empty after cleanup")]
    EmptyTitle,
}

/// Field values as read from the markup, before sentinels and cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Parse `body` and extract normalized items for `config`.
///
/// Returns `Ok(None)` when no container matched at all, so callers can tell
/// "nothing on the page" apart from "containers held no usable items".
/// Only an unparsable container selector is an error; everything below the
/// container level is isolated per item.
pub fn extract_document(
    config: &SourceConfig,
    body: &str,
) -> Result<Option<Vec<NewsItem>>, MarkupError> {
    let document = Document::parse(body);
    let containers = document.select(config.container_selector)?;

    if containers.is_empty() {
        info!(
            source = config.name,
            selector = config.container_selector,
            "Found 0 containers"
        );
        return Ok(None);
    }
    debug!(source = config.name, count = containers.len(), "Found containers");

    let mut items = Vec::new();
    for (index, container) in containers.iter().enumerate() {
        for candidate in extract_container(config, container) {
            match candidate.and_then(|raw| normalize(raw, config)) {
                Ok(item) => items.push(item),
                Err(ExtractionFault::EmptyTitle) => {
                    debug!(source = config.name, index, "Skipped item with empty title");
                }
                Err(e) => {
                    warn!(source = config.name, index, error = %e, "Skipped one item");
                }
            }
        }
    }

    if items.is_empty() {
        warn!(
            source = config.name,
            containers = containers.len(),
            "Containers matched but yielded 0 items"
        );
    }
    Ok(Some(items))
}

/// Extract every candidate item from one container.
pub fn extract_container(
    config: &SourceConfig,
    container: &Node<'_>,
) -> Vec<Result<RawItem, ExtractionFault>> {
    match &config.title {
        TitleRule::EachMatch(selector) => {
            let titles = match container.select(selector) {
                Ok(titles) => titles,
                Err(e) => return vec![Err(e.into())],
            };
            if titles.is_empty() {
                return Vec::new();
            }
            let shared = match read_fields(config, container) {
                Ok(shared) => shared,
                Err(e) => return vec![Err(e)],
            };
            titles
                .iter()
                .map(|node| {
                    Ok(RawItem {
                        title: Some(node.text(true)),
                        ..shared.clone()
                    })
                })
                .collect()
        }
        TitleRule::FirstMatch(rule) => {
            let item = read_field(container, rule).and_then(|title| {
                Ok(RawItem {
                    title,
                    ..read_fields(config, container)?
                })
            });
            vec![item]
        }
    }
}

fn read_fields(config: &SourceConfig, container: &Node<'_>) -> Result<RawItem, ExtractionFault> {
    Ok(RawItem {
        title: None,
        link: read_field(container, &config.link)?,
        date: read_field(container, &config.date)?,
        author: read_field(container, &config.author)?,
        description: read_field(container, &config.description)?,
    })
}

fn read_field(container: &Node<'_>, rule: &FieldRule) -> Result<Option<String>, ExtractionFault> {
    let Some(selector) = rule.selector else {
        return Ok(None);
    };
    let value = container.select_first(selector)?.and_then(|node| match rule.read {
        Read::Text => Some(node.text(true)),
        Read::Attribute(name) => node.attribute(name).map(str::to_string),
    });
    Ok(value)
}
