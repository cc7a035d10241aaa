//! Request tokens for in-flight fetches.
//!
//! Every fetch carries a [`RequestToken`]. The tracker remembers the live token
//! per [`RequestKind`]; starting a new request of the same kind supersedes the
//! old one, and responses that arrive with a superseded token are discarded.

use std::collections::HashMap;
use std::fmt;

/// Category of fetch. At most one request per kind is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Organization existence check.
    Exists,
    /// Organization roster (locations).
    Roster,
    /// Search box suggestions.
    Suggestions,
    /// State list for the state filter.
    States,
    /// Practitioner profile.
    Profile,
}

/// Identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req#{}", self.0)
    }
}

/// Tracks the live request per kind.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    next: u64,
    live: HashMap<RequestKind, RequestToken>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token for a new request of `kind`.
    ///
    /// Returns the new token and, if a request of the same kind was still live,
    /// the superseded token so the caller can cancel it.
    pub fn start(&mut self, kind: RequestKind) -> (RequestToken, Option<RequestToken>) {
        self.next += 1;
        let token = RequestToken(self.next);
        let superseded = self.live.insert(kind, token);
        if let Some(old) = superseded {
            tracing::debug!(?kind, %old, new = %token, "request superseded");
        }
        (token, superseded)
    }

    /// Accepts a response: returns `true` and retires the token if it is the
    /// live token for `kind`, `false` for stale responses.
    pub fn complete(&mut self, kind: RequestKind, token: RequestToken) -> bool {
        if self.live.get(&kind) == Some(&token) {
            self.live.remove(&kind);
            true
        } else {
            tracing::debug!(?kind, %token, "discarding stale response");
            false
        }
    }

    /// Retires the live request of `kind`, returning its token for cancellation.
    pub fn cancel(&mut self, kind: RequestKind) -> Option<RequestToken> {
        self.live.remove(&kind)
    }

    #[must_use]
    pub fn is_live(&self, kind: RequestKind) -> bool {
        self.live.contains_key(&kind)
    }
}
