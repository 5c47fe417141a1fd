//! r/RocketLeagueEsports ATOM feed scraper.
//!
//! Reddit serves subreddit listings as ATOM at `/.rss`. The feed is parsed
//! with the same tolerant HTML parser as the forum pages, which lowercases
//! element names, so selectors here are lowercase. Each `<entry>` becomes
//! one item.
//!
//! # Field mapping
//!
//! | Field | Selector | Missing |
//! |-------|----------|---------|
//! | title | `title` | `"No Title Found"` |
//! | url_path | `link[href]` | `"#"` |
//! | date | `updated`, date part only | entry skipped |
//! | author | `author name` | `"Reddit"` |
//! | description | `content` | `"..."` |

use super::{FieldRule, SourceConfig, TitleRule, user_agent_headers};
use std::time::Duration;

pub const NAME: &str = "rl";
pub const FEED_URL: &str = "https://www.reddit.com/r/RocketLeagueEsports/.rss";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36";
pub const TIMEOUT: Duration = Duration::from_secs(15);

pub const CONTAINER_SELECTOR: &str = "entry";

pub const MISSING_TITLE: &str = "No Title Found";
pub const MISSING_LINK: &str = "#";
pub const MISSING_AUTHOR: &str = "Reddit";
pub const MISSING_DESCRIPTION: &str = "...";

/// Source config for `/api/rl_news`.
pub fn source() -> SourceConfig {
    SourceConfig {
        name: NAME,
        target_url: FEED_URL.to_string(),
        request_headers: user_agent_headers(USER_AGENT),
        timeout: TIMEOUT,
        container_selector: CONTAINER_SELECTOR,
        title: TitleRule::FirstMatch(FieldRule::text("title").or(MISSING_TITLE)),
        title_prefix: None,
        link: FieldRule::attribute("link", "href").or(MISSING_LINK),
        date: FieldRule::text("updated").date_only(),
        author: FieldRule::text("author name").or(MISSING_AUTHOR),
        description: FieldRule::text("content").or(MISSING_DESCRIPTION),
    }
}
