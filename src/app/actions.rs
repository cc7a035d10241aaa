//! Actions representing side effects to be executed by the host.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing user input, timer expirations or fetch
//! results. Actions are the boundary between pure state transitions and
//! effectful work: HTTP requests, timers, scrolling and map animation.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several side effects can be queued atomically. The host executes them in
//! order.
//!
//! # Example
//!
//! ```rust
//! use provider_directory::app::{Action, ApiRequest};
//! use provider_directory::app::requests::RequestToken;
//!
//! let actions = vec![Action::Fetch(ApiRequest::States {
//!     token: RequestToken::new(1),
//! })];
//! assert_eq!(actions[0].request_token(), Some(RequestToken::new(1)));
//! ```

use super::debounce::TimerToken;
use super::requests::{RequestKind, RequestToken};
use crate::domain::RecordId;
use crate::map::MapCommand;
use crate::table::ScrollAlign;
use std::time::Duration;

/// A request the host should run against the Nova API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// `GET api/organizations/{id}/exists`.
    OrganizationExists {
        token: RequestToken,
        organization_id: RecordId,
    },

    /// `GET api/organizations/{id}/locations`.
    Roster {
        token: RequestToken,
        organization_id: RecordId,
    },

    /// Search and organization suggestions for `query`.
    Suggestions { token: RequestToken, query: String },

    /// `GET api/states`.
    States { token: RequestToken },

    /// `GET api/practitioners/{id}`.
    Profile {
        token: RequestToken,
        practitioner_id: RecordId,
    },
}

impl ApiRequest {
    #[must_use]
    pub const fn token(&self) -> RequestToken {
        match self {
            Self::OrganizationExists { token, .. }
            | Self::Roster { token, .. }
            | Self::Suggestions { token, .. }
            | Self::States { token }
            | Self::Profile { token, .. } => *token,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::OrganizationExists { .. } => RequestKind::Exists,
            Self::Roster { .. } => RequestKind::Roster,
            Self::Suggestions { .. } => RequestKind::Suggestions,
            Self::States { .. } => RequestKind::States,
            Self::Profile { .. } => RequestKind::Profile,
        }
    }
}

/// Commands representing side effects to be executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Runs an API request; its outcome comes back as an event carrying the
    /// same token.
    Fetch(ApiRequest),

    /// Aborts an in-flight request. Its response, if it still arrives, is
    /// discarded by the handler either way.
    CancelRequest(RequestToken),

    /// Reports [`Event::TimerElapsed`](super::Event::TimerElapsed) with `token`
    /// after `delay`.
    ScheduleTimer { token: TimerToken, delay: Duration },

    /// Scrolls the card list so the record at `index` is visible.
    ScrollIntoView { index: usize, align: ScrollAlign },

    /// Applies a command to the map surface.
    Map(MapCommand),

    /// Exits the host.
    Quit,
}

impl Action {
    /// Token of the request this action starts, if it is a fetch.
    #[must_use]
    pub const fn request_token(&self) -> Option<RequestToken> {
        match self {
            Self::Fetch(request) => Some(request.token()),
            _ => None,
        }
    }
}
