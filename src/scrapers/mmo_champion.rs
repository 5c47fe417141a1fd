//! MMO-Champion Overwatch news scraper.
//!
//! The Overwatch content page is a single forum-style page of `div.message`
//! posts. Headlines are marked up as yellow bold text
//! (`<b><font color="#FFF3A5">`), and a post may hold several of them, so
//! every highlighted run becomes its own item.
//!
//! Only titles are read from the page. Author, date and description are
//! fixed placeholders and every item links back to the page itself.

use super::{FieldRule, SourceConfig, TitleRule, user_agent_headers};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

pub const NAME: &str = "ow";
pub const PAGE_URL: &str = "https://www.mmo-champion.com/content/7421-overwatch";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const TIMEOUT: Duration = Duration::from_secs(15);

pub const CONTAINER_SELECTOR: &str = "div.message";
pub const TITLE_SELECTOR: &str = "b font[color='#FFF3A5']";

pub const AUTHOR: &str = "MMO-Champion";
pub const DATE: &str = "Unknown Date";
pub const DESCRIPTION: &str = "No summary available...";

/// Matches any run of leading `[OW]` tags, case-insensitively.
static TITLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:\s*\[OW\]\s*)+").unwrap());

/// Source config for `/api/ow_news`.
pub fn source() -> SourceConfig {
    SourceConfig {
        name: NAME,
        target_url: PAGE_URL.to_string(),
        request_headers: user_agent_headers(USER_AGENT),
        timeout: TIMEOUT,
        container_selector: CONTAINER_SELECTOR,
        title: TitleRule::EachMatch(TITLE_SELECTOR),
        title_prefix: Some(&*TITLE_TAG),
        link: FieldRule::page_url(),
        date: FieldRule::constant(DATE),
        author: FieldRule::constant(AUTHOR),
        description: FieldRule::constant(DESCRIPTION),
    }
}
