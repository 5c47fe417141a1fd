//! Field-level cleanup from [`RawItem`] to [`NewsItem`].

use crate::extractor::{ExtractionFault, RawItem};
use crate::models::NewsItem;
use crate::scrapers::{FieldRule, Missing, SourceConfig, TitleRule, Transform};
use regex::Regex;

/// Turn raw field values into a [`NewsItem`].
///
/// Missing values are replaced according to each field's [`Missing`] policy,
/// the title loses its tag prefix, and the item is rejected if nothing of
/// the title is left.
pub fn normalize(raw: RawItem, config: &SourceConfig) -> Result<NewsItem, ExtractionFault> {
    let title = match &config.title {
        TitleRule::EachMatch(_) => raw.title.unwrap_or_default(),
        TitleRule::FirstMatch(rule) => resolve(raw.title, rule, "title", config)?,
    };
    let title = match config.title_prefix {
        Some(prefix) => strip_title_prefix(&title, prefix),
        None => title.trim().to_string(),
    };
    if title.is_empty() {
        return Err(ExtractionFault::EmptyTitle);
    }

    Ok(NewsItem {
        title,
        author: resolve(raw.author, &config.author, "author", config)?,
        date: resolve(raw.date, &config.date, "date", config)?,
        url_path: resolve(raw.link, &config.link, "link", config)?,
        description: resolve(raw.description, &config.description, "description", config)?,
    })
}

fn resolve(
    value: Option<String>,
    rule: &FieldRule,
    field: &'static str,
    config: &SourceConfig,
) -> Result<String, ExtractionFault> {
    match value {
        Some(value) => Ok(match rule.transform {
            Transform::None => value,
            Transform::DateOnly => truncate_to_date(&value).to_string(),
        }),
        None => match rule.missing {
            Missing::Sentinel(sentinel) => Ok(sentinel.to_string()),
            Missing::PageUrl => Ok(config.target_url.clone()),
            Missing::Required => Err(ExtractionFault::MissingField(field)),
        },
    }
}

/// Remove the leading tag(s) matched by `prefix`, then surrounding whitespace.
///
/// Idempotent as long as `prefix` is anchored and consumes repeated tags.
pub fn strip_title_prefix(title: &str, prefix: &Regex) -> String {
    prefix.replace(title, "").trim().to_string()
}

/// Date portion of an ISO-8601 timestamp: everything before the `T`.
pub fn truncate_to_date(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _)| date)
        .trim()
}
