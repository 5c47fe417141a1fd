//! Fetch → parse → extract → normalize → envelope, for one source.
//!
//! Failures are contained at the narrowest scope:
//!
//! - a faulty item is skipped inside [`extract_document`]
//! - a failed fetch becomes a `500` envelope with no segments
//! - anything else (an unparsable container selector) is a [`PipelineError`]
//!   and is left for the HTTP layer to report

use crate::extractor::extract_document;
use crate::fetcher::Fetcher;
use crate::markup::MarkupError;
use crate::models::ResponseEnvelope;
use crate::scrapers::SourceConfig;
use crate::utils::truncate_for_log;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// A fault that escaped per-item and per-fetch containment.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{source_name} extraction failed: {error}")]
    Markup {
        source_name: &'static str,
        #[source]
        error: MarkupError,
    },
}

/// Run the full pipeline for `source`.
#[instrument(level = "info", skip_all, fields(source = source.name))]
pub async fn run(fetcher: &Fetcher, source: &SourceConfig) -> Result<ResponseEnvelope, PipelineError> {
    let fetched = match fetcher
        .fetch(&source.target_url, &source.request_headers, source.timeout)
        .await
    {
        Ok(fetched) => fetched,
        Err(e) => {
            error!(error = %e, url = %source.target_url, "Fetch failed");
            return Ok(ResponseEnvelope::failed());
        }
    };

    // The parsed document is not Send; keep it inside this synchronous call.
    let items = extract_document(source, &fetched.body).map_err(|error| PipelineError::Markup {
        source_name: source.name,
        error,
    })?;

    let Some(items) = items else {
        debug!(body_preview = %truncate_for_log(&fetched.body, 300), "Body without containers");
        return Ok(ResponseEnvelope::build(fetched.status, Vec::new()));
    };

    let envelope = ResponseEnvelope::build(fetched.status, items);
    info!(
        count = envelope.segments().len(),
        status = envelope.status(),
        "Scraped items"
    );
    Ok(envelope)
}
