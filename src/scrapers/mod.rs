//! News source definitions.
//!
//! Every source is described by a [`SourceConfig`]: where to fetch from,
//! which headers to send, how to find item containers and how to read each
//! field out of a container. The shared [`crate::pipeline`] turns a config
//! into a [`crate::models::ResponseEnvelope`]; sources contain no code of
//! their own beyond the config and its constants.
//!
//! # Supported Sources
//!
//! | Source | Module | Route | Method |
//! |--------|--------|-------|--------|
//! | MMO-Champion Overwatch | [`mmo_champion`] | `/api/ow_news` | HTML scraping |
//! | r/RocketLeagueEsports | [`reddit`] | `/api/rl_news` | ATOM feed |

use crate::markup::{self, MarkupError};
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Duration;

pub mod mmo_champion;
pub mod reddit;

/// Immutable description of one scraping target.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Short identifier used in logs and route names.
    pub name: &'static str,
    /// Absolute URL fetched on every request.
    pub target_url: String,
    pub request_headers: BTreeMap<String, String>,
    pub timeout: Duration,
    /// Selects the top-level item containers.
    pub container_selector: &'static str,
    pub title: TitleRule,
    /// Leading tag stripped from every title, e.g. `[OW]`.
    pub title_prefix: Option<&'static Regex>,
    pub link: FieldRule,
    pub date: FieldRule,
    pub author: FieldRule,
    pub description: FieldRule,
}

/// How titles are located inside a container.
#[derive(Debug, Clone)]
pub enum TitleRule {
    /// Every match becomes its own item; no match yields no item.
    EachMatch(&'static str),
    /// One item per container, titled by the first match.
    FirstMatch(FieldRule),
}

/// How a single field is read from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// `None` means the field is never read and always takes its fallback.
    pub selector: Option<&'static str>,
    pub read: Read,
    pub missing: Missing,
    pub transform: Transform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    Text,
    Attribute(&'static str),
}

/// What to do when a field cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Sentinel(&'static str),
    /// Use the source's `target_url`.
    PageUrl,
    /// The item is faulty and gets skipped.
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    None,
    /// Keep the date part of an ISO-8601 timestamp.
    DateOnly,
}

impl FieldRule {
    /// A field with no selector that always reads `value`.
    pub const fn constant(value: &'static str) -> Self {
        Self {
            selector: None,
            read: Read::Text,
            missing: Missing::Sentinel(value),
            transform: Transform::None,
        }
    }

    /// A field that always reads the source's page URL.
    pub const fn page_url() -> Self {
        Self {
            selector: None,
            read: Read::Text,
            missing: Missing::PageUrl,
            transform: Transform::None,
        }
    }

    /// Stripped text of the first node matching `selector`.
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector: Some(selector),
            read: Read::Text,
            missing: Missing::Required,
            transform: Transform::None,
        }
    }

    /// Attribute `name` of the first node matching `selector`.
    pub const fn attribute(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector: Some(selector),
            read: Read::Attribute(name),
            missing: Missing::Required,
            transform: Transform::None,
        }
    }

    pub fn or(mut self, sentinel: &'static str) -> Self {
        self.missing = Missing::Sentinel(sentinel);
        self
    }

    pub fn date_only(mut self) -> Self {
        self.transform = Transform::DateOnly;
        self
    }
}

impl SourceConfig {
    /// Point the source at a different URL, keeping everything else.
    #[cfg(test)]
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = url.into();
        self
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Compile every selector once so a typo fails at startup instead of per request.
    pub fn validate(&self) -> Result<(), MarkupError> {
        markup::compile(self.container_selector)?;
        let title = match &self.title {
            TitleRule::EachMatch(selector) => Some(*selector),
            TitleRule::FirstMatch(rule) => rule.selector,
        };
        let fields = [&self.link, &self.date, &self.author, &self.description];
        for selector in title
            .into_iter()
            .chain(fields.iter().filter_map(|rule| rule.selector))
        {
            markup::compile(selector)?;
        }
        Ok(())
    }
}

/// Browser-like header set shared by sources that only need a User-Agent.
pub(crate) fn user_agent_headers(user_agent: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("User-Agent".to_string(), user_agent.to_string())])
}
