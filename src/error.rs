// src/error.rs
//! Crate-wide error type.
//!
//! Only `UpstreamFormatChanged`, `InvalidIdentity` and `GraphInvariant` are
//! allowed to escape a subtree build (see [`Error::is_fatal`]). Everything else
//! is isolated to the node that produced it.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Key or name absent where the caller asserted presence.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Structural evidence of data was present but extraction yielded nothing.
    #[error("Upstream format changed at {url}: {detail}")]
    UpstreamFormatChanged { url: String, detail: String },

    /// Malformed time period or identity key component.
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// The built graph violates a structural rule (cardinality, undeclared kind).
    #[error("Graph invariant violated: {0}")]
    GraphInvariant(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    pub fn invalid(what: impl Into<String>) -> Self {
        Error::InvalidIdentity(what.into())
    }

    pub fn format_changed(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::UpstreamFormatChanged { url: url.into(), detail: detail.into() }
    }

    /// Errors no retry or fallback can resolve; these abort the enclosing build.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UpstreamFormatChanged { .. } | Error::InvalidIdentity(_) | Error::GraphInvariant(_)
        )
    }
}

/// Transport-level failure. Never leaves the retrieval gateway.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("page not ready within {0:?}")]
    Timeout(std::time::Duration),

    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_partition() {
        assert!(Error::format_changed("u", "d").is_fatal());
        assert!(Error::invalid("x").is_fatal());
        assert!(Error::GraphInvariant(s!("x")).is_fatal());
        assert!(!Error::not_found("x").is_fatal());
        assert!(!Error::Io(io::Error::other("disk")).is_fatal());
    }
}
