//! Error taxonomy for the request pipeline.
//!
//! Every failure resolves to a well-defined state: the session ends up
//! `Anonymous` or a collection is left unchanged. Nothing here is fatal to
//! the process.

use thiserror::Error;

/// Errors produced by the request dispatcher.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401/403 from a call that carried a bearer token. The dispatcher has
    /// already torn the session down; callers must not retry.
    #[error("session expired, please sign in again")]
    AuthorizationExpired,

    /// Any other 4xx. Carries the server's `message` field when present.
    #[error("{}", message.as_deref().unwrap_or("request rejected"))]
    Validation {
        status: u16,
        message: Option<String>,
    },

    /// 5xx from the backend.
    #[error("server error {status}")]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// Transport-level failure; the request may never have reached the
    /// backend.
    #[error("network unavailable: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body did not decode.
    #[error("malformed response: {0}")]
    Parse(String),

    /// The request URL could not be built from the configured base.
    #[error("invalid request path: {0}")]
    InvalidPath(String),
}

impl ApiError {
    /// The message to show a user: the server-provided one when there is
    /// one, otherwise the supplied per-operation fallback.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation {
                message: Some(message),
                ..
            }
            | Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::AuthorizationExpired => self.to_string(),
            _ => fallback.to_owned(),
        }
    }

    /// Whether this error means the session was torn down.
    #[must_use]
    pub const fn is_authorization_expired(&self) -> bool {
        matches!(self, Self::AuthorizationExpired)
    }
}

/// A failure already shaped for display.
///
/// Session and sync operations wrap the dispatcher error together with the
/// user-facing message resolved against their per-operation fallback.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OperationError {
    message: String,
    #[source]
    source: ApiError,
}

impl OperationError {
    pub(crate) fn new(source: ApiError, fallback: &str) -> Self {
        Self {
            message: source.user_message(fallback),
            source,
        }
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying dispatcher error.
    #[must_use]
    pub const fn api_error(&self) -> &ApiError {
        &self.source
    }

    /// Whether the session was torn down while this operation ran.
    #[must_use]
    pub const fn is_authorization_expired(&self) -> bool {
        self.source.is_authorization_expired()
    }
}
