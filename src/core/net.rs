// src/core/net.rs
//! Content retrieval.
//!
//! [`Transport`] is the page-fetching collaborator; [`HttpTransport`] is the
//! blocking `reqwest` implementation. [`RetrievalGateway`] sits in front of a
//! transport and turns every failure into empty content.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

pub trait Transport {
    /// Establish the session. Called lazily before the first fetch.
    fn open(&mut self) -> Result<(), FetchError> {
        Ok(())
    }

    /// Fetch one page, waiting at most `wait` for it to be ready.
    fn fetch_page(&mut self, url: &str, wait: Duration) -> Result<String, FetchError>;

    /// Tear the session down.
    fn close(&mut self) {}
}

/// Plain HTTP GET. One client per session.
pub struct HttpTransport {
    client: Option<Client>,
    ready_marker: Option<String>,
}

impl HttpTransport {
    pub fn new(ready_marker: Option<String>) -> Self {
        Self { client: None, ready_marker }
    }
}

impl Transport for HttpTransport {
    fn open(&mut self) -> Result<(), FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        self.client = Some(client);
        Ok(())
    }

    fn fetch_page(&mut self, url: &str, wait: Duration) -> Result<String, FetchError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| FetchError::Transport(s!("session not open")))?;

        let resp = client.get(url).timeout(wait).send().map_err(|e| {
            if e.is_timeout() { FetchError::Timeout(wait) } else { FetchError::Transport(e.to_string()) }
        })?;
        let status = resp.status();
        if !status.is_success() {
            // Error pages are not content; nothing may persist them.
            return Err(FetchError::Transport(format!("HTTP {status}")));
        }
        let body = resp.text().map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!(%url, %status, bytes = body.len(), "fetched");

        match &self.ready_marker {
            // Never saw the ready signal: same as waiting it out.
            Some(marker) if !body.contains(marker.as_str()) => Err(FetchError::Timeout(wait)),
            _ => Ok(body),
        }
    }

    fn close(&mut self) {
        self.client = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Session {
    Idle,
    Open,
}

/// Reuses one transport session across many fetches and releases it once.
pub struct RetrievalGateway {
    transport: Box<dyn Transport>,
    wait: Duration,
    session: Session,
    fetches: usize,
}

impl RetrievalGateway {
    pub fn new(transport: Box<dyn Transport>, wait: Duration) -> Self {
        Self { transport, wait, session: Session::Idle, fetches: 0 }
    }

    /// Page content, or `""` if the page failed or was not ready in time.
    pub fn fetch(&mut self, url: &str) -> String {
        if self.session == Session::Idle {
            if let Err(e) = self.transport.open() {
                warn!(%url, error = %e, "could not open transport session");
                return s!();
            }
            self.session = Session::Open;
        }

        self.fetches += 1;
        match self.transport.fetch_page(url, self.wait) {
            Ok(body) => body,
            Err(FetchError::Timeout(wait)) => {
                warn!(%url, ?wait, "page not ready; treating as empty");
                s!()
            }
            Err(e) => {
                warn!(%url, error = %e, "fetch failed; treating as empty");
                s!()
            }
        }
    }

    /// Number of transport fetches issued so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Close the session if one is open. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.session == Session::Open {
            self.transport.close();
            self.session = Session::Idle;
            debug!(fetches = self.fetches, "transport session released");
        }
    }
}

impl Drop for RetrievalGateway {
    fn drop(&mut self) {
        self.release();
    }
}
