// Data-fetch layer: thin typed wrappers over HTTP GET + JSON parsing.
//
// All app-side traffic goes through `ApiClient`, normally pointed at the
// local proxy. Responses are parsed strictly first; on failure a lenient
// repair pass strips trailing commas and parsing is retried once, because
// the upstream has been seen emitting them.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::REQUEST_TIMEOUT_SECS;
use crate::models::{Bootstrap, EntryProfile, ManagerHistory, Standing, StandingsPage, TeamPicks};

/// How much of an error body is kept for diagnostics.
const SNIPPET_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {source}")]
    Build { source: reqwest::Error },

    #[error("HTTP {status} {status_text} @ {url}: {snippet}")]
    Http {
        status: u16,
        status_text: String,
        url: String,
        snippet: String,
    },

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Client for the fantasy API, addressed through a base URL (the local
/// proxy's `/api` root in production, a stub server in tests).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (no trailing slash). Every
    /// request carries a fixed timeout so a hung upstream call cannot
    /// stall a render indefinitely.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|source| FetchError::Build { source })?;
        Ok(ApiClient {
            http,
            base_url: base_url.into(),
        })
    }

    /// GET `path` (relative to the base URL) and parse the body as JSON.
    ///
    /// Non-2xx responses fail with the status, status text, URL, and a
    /// truncated body snippet. A strict parse failure is retried once
    /// after stripping trailing commas.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
                url,
                snippet: body.chars().take(SNIPPET_CHARS).collect(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) => serde_json::from_str(&strip_trailing_commas(&body))
                .map_err(|source| FetchError::Parse { url, source }),
        }
    }

    /// Fetch a manager's profile.
    pub async fn entry(&self, entry_id: u64) -> Result<EntryProfile, FetchError> {
        self.get_json(&format!("/entry/{entry_id}/")).await
    }

    /// Fetch a manager's per-gameweek season history.
    pub async fn history(&self, entry_id: u64) -> Result<ManagerHistory, FetchError> {
        self.get_json(&format!("/entry/{entry_id}/history/")).await
    }

    /// Fetch the bootstrap reference snapshot (gameweeks and players).
    pub async fn bootstrap(&self) -> Result<Bootstrap, FetchError> {
        self.get_json("/bootstrap-static/").await
    }

    /// Fetch a manager's picks for one gameweek.
    ///
    /// Captain data is decorative, so any failure is swallowed and
    /// reported as `None` rather than propagated.
    pub async fn picks(&self, entry_id: u64, event: u32) -> Option<TeamPicks> {
        match self
            .get_json(&format!("/entry/{entry_id}/event/{event}/picks/"))
            .await
        {
            Ok(picks) => Some(picks),
            Err(e) => {
                debug!(entry_id, event, "picks unavailable: {e}");
                None
            }
        }
    }

    /// Fetch a league's standings, optionally pinned to a historical
    /// gameweek. Empty standings fall back to the new-entries placeholder
    /// list.
    pub async fn standings(
        &self,
        league_id: u64,
        event: Option<u32>,
    ) -> Result<Vec<Standing>, FetchError> {
        let mut path = format!("/leagues-classic/{league_id}/standings/");
        if let Some(event) = event {
            path.push_str(&format!("?event={event}"));
        }
        let page: StandingsPage = self.get_json(&path).await?;
        let standings = page.into_standings();
        if standings.is_empty() {
            warn!(league_id, "standings page had no results and no new entries");
        }
        Ok(standings)
    }
}

// ---------------------------------------------------------------------------
// Lenient JSON repair
// ---------------------------------------------------------------------------

/// Remove commas that sit (possibly across whitespace) directly before a
/// closing `}` or `]`.
///
/// Deliberately string-blind, like the regex it replaces: a literal `",]"`
/// inside a JSON string would also be rewritten. The repair only runs
/// after strict parsing has already failed, so well-formed bodies are
/// never touched.
pub fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c == ',' {
            let rest = text[i + 1..].trim_start();
            if rest.starts_with('}') || rest.starts_with(']') {
                continue;
            }
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
