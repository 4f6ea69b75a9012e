//! Error kinds surfaced by the client.
//!
//! Every failure is one of a few distinguishable kinds, so callers can tell
//! "bad credentials, ask again" apart from "the remote call failed".

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller input was missing or invalid. Raised before any network call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The login handshake did not hand out the expected redirect, cookies or credentials.
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthFailure),

    /// An authenticated call was attempted before a session id exists.
    #[error("no session id, log in first")]
    NoSession,

    /// The request went through but the body signals failure or is not valid JSON.
    #[error("{0}")]
    Api(String),

    /// Transport level failure from reqwest.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Which artifact of the login handshake was missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// Not a 302, or no `Set-Cookie` header.
    #[error("ClassCharts didn't return authentication cookies (status {status})")]
    MissingCookies { status: StatusCode },

    /// The credentials cookie was absent or empty.
    #[error("failed to extract session credentials from cookie `{cookie}`")]
    MissingCredentials { cookie: &'static str },

    /// The credentials cookie was not a JSON object holding `session_id`.
    #[error("failed to parse session credentials in cookie `{cookie}`: {reason}")]
    MalformedCredentials { cookie: &'static str, reason: String },
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
