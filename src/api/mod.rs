pub mod model;


use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::term::SearchTerm;

pub use model::{Element, ElementColor, Part, SearchHit, SearchKind};
use model::Envelope;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const GENERIC_SEARCH_ERROR: &str = "An error occurred while searching";
const INVALID_TERM_FALLBACK: &str = "Invalid search term";

/// Why a search action failed. Every variant is terminal for the action and
/// ends up as a visible message in the result surface; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Network unreachable, timeout, or an unparseable success body.
    #[error("Unable to connect to the server. Please try again later.")]
    Transport,
    /// HTTP 404: the term matched nothing.
    #[error("No {kind} matching \"{term}\" was found in the Rebrickable database.")]
    NotFound { kind: SearchKind, term: String },
    /// HTTP 400: the server rejected the term.
    #[error("{0}")]
    Rejected(String),
    /// 2xx envelope carrying `success: false`.
    #[error("{0}")]
    Api(String),
    /// Any other non-2xx status.
    #[error("An error occurred while connecting to the server")]
    Server(u16),
}

/// Blocking client for the search proxy. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("bricklook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, http })
    }

    /// The single outbound GET per search action. No retry, and cancellation
    /// happens upstream by dropping the channel this runs behind.
    pub fn search(&self, kind: SearchKind, term: &SearchTerm) -> Result<SearchHit, SearchError> {
        let url = format!(
            "{}/api/search/{}/{}",
            self.base_url,
            kind.path_segment(),
            urlencoding::encode(term.as_str())
        );
        debug!(%url, "Issuing search request");

        let response = match self.http.get(&url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, %url, "Search request failed in transport");
                return Err(SearchError::Transport);
            }
        };

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, %status, "Failed to read response body");
                return Err(SearchError::Transport);
            }
        };

        decode_response(kind, term.as_str(), status, &body)
    }
}

/// Maps an HTTP status and body into a hit or a `SearchError`. Pure, so the
/// whole branch table is testable without a server.
pub(crate) fn decode_response(
    kind: SearchKind,
    term: &str,
    status: StatusCode,
    body: &str,
) -> Result<SearchHit, SearchError> {
    if status.is_success() {
        return decode_success(kind, body);
    }

    match status.as_u16() {
        404 => {
            debug!(%kind, term, "Search returned no results");
            Err(SearchError::NotFound {
                kind,
                term: term.to_string(),
            })
        }
        400 => Err(SearchError::Rejected(
            body_error(body).unwrap_or_else(|| INVALID_TERM_FALLBACK.to_string()),
        )),
        code => {
            warn!(%status, "Search returned server error");
            Err(SearchError::Server(code))
        }
    }
}

fn decode_success(kind: SearchKind, body: &str) -> Result<SearchHit, SearchError> {
    match kind {
        SearchKind::Part => {
            let env: Envelope<Part> = parse_envelope(body)?;
            finish(env.success, env.data.map(SearchHit::Part), env.error)
        }
        SearchKind::Element => {
            let env: Envelope<Element> = parse_envelope(body)?;
            finish(env.success, env.data.map(SearchHit::Element), env.error)
        }
    }
}

fn parse_envelope<T: serde::de::DeserializeOwned>(body: &str) -> Result<Envelope<T>, SearchError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse success response body");
        SearchError::Transport
    })
}

fn finish(
    success: bool,
    data: Option<SearchHit>,
    error: Option<String>,
) -> Result<SearchHit, SearchError> {
    if success && let Some(hit) = data {
        return Ok(hit);
    }
    Err(SearchError::Api(
        error
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| GENERIC_SEARCH_ERROR.to_string()),
    ))
}

fn body_error(body: &str) -> Option<String> {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.error)
        .filter(|msg| !msg.is_empty())
}
