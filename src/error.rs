//! Standard errors used by all functions in the crate.

use crate::{
    common::{EXPIRED_ACCESS_TOKEN_CODE, NOT_FOUND_CODE},
    hal::Links,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Error collecting all possible failures of the Dwolla client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reqwest error: DNS, connection, TLS and timeout failures all end up here.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// Error reported by a Dwolla API endpoint.
    #[error("{0}")]
    HalError(#[from] HalError),
    /// One or more fields of a submitted payload failed server-side validation.
    #[error("{0}")]
    ValidationError(#[from] ValidationError),
    /// The server accepted the request but the operation is not finalized yet
    /// (e.g. micro-deposits still settling). The caller may poll again later.
    #[error("Operation not complete yet: {0}")]
    TryAgainLater(HalError),
    /// The token endpoint rejected the configured credentials.
    #[error("Authentication failed: [{code}] {description}")]
    Authentication { code: String, description: String },
    /// The resource does not carry the relation needed for this operation.
    ///
    /// This is a purely local failure: no request has been sent.
    #[error("No {relation} resource link")]
    MissingLink { relation: String },
    /// The resource was not produced by a [`DwollaClient`](crate::DwollaClient),
    /// so there is no client to follow its links with.
    #[error("Resource is not attached to a Dwolla client")]
    Detached,
    /// A response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl Error {
    /// Returns `true` if the server rejected the access token as expired.
    pub fn is_expired_token(&self) -> bool {
        matches!(self, Error::HalError(e) if e.code == EXPIRED_ACCESS_TOKEN_CODE)
    }

    /// Returns `true` if the server answered with a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::HalError(e) if e.status == Some(404) || e.code == NOT_FOUND_CODE)
    }

    /// Returns `true` for the soft-pending signal.
    pub fn is_try_again_later(&self) -> bool {
        matches!(self, Error::TryAgainLater(_))
    }

    /// Returns `true` if this error was raised locally because of a missing relation.
    pub fn is_missing_link(&self) -> bool {
        matches!(self, Error::MissingLink { .. })
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Error body returned by the Dwolla APIs.
#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HalError {
    /// HTTP status returned by the server.
    ///
    /// `None` for errors embedded inside another error.
    #[serde(skip)]
    pub status: Option<u16>,
    /// Machine readable error code, e.g. `NotFound` or `ExpiredAccessToken`.
    pub code: String,
    /// Human readable description of the error.
    #[serde(default)]
    pub message: String,
    /// JSON pointer to the offending input, if any (e.g. `/email`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Links related to the error.
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    /// Nested errors.
    #[serde(rename = "_embedded", default, skip_serializing_if = "HashMap::is_empty")]
    pub embedded: HashMap<String, Vec<HalError>>,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;

        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }

        if let Some(ref path) = self.path {
            write!(f, "\nPath: {}", path)?;
        }

        Ok(())
    }
}

/// Validation failure returned when a submitted payload is rejected.
///
/// Every field that failed validation is reported as a separate [`HalError`]
/// inside the embedded `errors` list, with `path` pointing at the field.
#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// HTTP status returned by the server.
    #[serde(skip)]
    pub status: Option<u16>,
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(rename = "_embedded", default)]
    pub embedded: HashMap<String, Vec<HalError>>,
}

impl ValidationError {
    /// Per-field validation failures, in the order returned by the server.
    pub fn errors(&self) -> &[HalError] {
        self.embedded
            .get("errors")
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;

        let errors = self.errors();
        if !errors.is_empty() {
            write!(f, "\nAll errors:")?;
            for e in errors {
                write!(
                    f,
                    "\n- {}: [{}] {}",
                    e.path.as_deref().unwrap_or("-"),
                    e.code,
                    e.message
                )?;
            }
        }

        Ok(())
    }
}
