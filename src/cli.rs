//! Command-line interface definitions for eClips News.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;

/// Command-line arguments for the news API server.
///
/// # Examples
///
/// ```sh
/// # Listen on the default 127.0.0.1:5000
/// eclips_news
///
/// # Listen on all interfaces
/// eclips_news --host 0.0.0.0 --port 8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "ECLIPS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, env = "ECLIPS_PORT", default_value_t = 5000)]
    pub port: u16,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
