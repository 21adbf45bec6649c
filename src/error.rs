// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Homebridge bridge.
//!
//! Every failure the bridge can report falls into one of a small number of
//! categories: caller input rejected before any network call, token
//! acquisition failure, transport failure, an unexpected controller status,
//! a missing accessory, an operation that makes no sense for the accessory,
//! or a malformed response body.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input was rejected before any network call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A session token could not be obtained from the controller.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Description of the login failure.
        message: String,
    },

    /// The controller could not be reached or did not answer in time.
    #[error("communication error: {message}")]
    Communication {
        /// Description of the transport failure.
        message: String,
        /// Whether the failure was a timeout.
        timeout: bool,
    },

    /// The controller answered with an unexpected non-2xx status.
    #[error("controller returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// No accessory exists with the given identifier.
    #[error("accessory not found: {0}")]
    NotFound(String),

    /// The operation is not meaningful for this accessory.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// The controller response could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns the corrective action a caller can take, where one is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use homebridge_lib::Error;
    ///
    /// let err = Error::NotFound("abc".to_string());
    /// assert!(err.hint().unwrap().contains("list_accessories"));
    /// ```
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Validation(ValidationError::UnsupportedAction(_)) => {
                Some("use one of: power, on, off, brightness, hue, saturation")
            }
            Self::Validation(ValidationError::MissingIdentifier) => {
                Some("pass the accessory uniqueId from list_accessories")
            }
            Self::Validation(ValidationError::Rejected(_)) | Self::Api { status: 400, .. } => {
                Some("check that the accessory supports the characteristic and that it is writable")
            }
            Self::Validation(_) => None,
            Self::Authentication { .. } => {
                Some("check that Homebridge runs with auth disabled and HOMEBRIDGE_HOST is correct")
            }
            Self::Communication { .. } => Some("check that the Homebridge host is reachable"),
            Self::Api { status: 401 | 403, .. } => Some("the session token was rejected, retry the call"),
            Self::Api { .. } | Self::Parse(_) => None,
            Self::NotFound(_) => Some("re-run discovery with list_accessories"),
            Self::Unsupported(_) => Some("inspect the accessory with get_accessory_details"),
        }
    }

    /// Describes a failed operation for a human reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use homebridge_lib::Error;
    ///
    /// let err = Error::NotFound("abc".to_string());
    /// assert_eq!(
    ///     err.report("toggle abc"),
    ///     "Failed to toggle abc: accessory not found: abc. Try: re-run discovery with list_accessories"
    /// );
    /// ```
    #[must_use]
    pub fn report(&self, attempted: &str) -> String {
        match self.hint() {
            Some(hint) => format!("Failed to {attempted}: {self}. Try: {hint}"),
            None => format!("Failed to {attempted}: {self}"),
        }
    }

    /// Creates a communication error from a transport failure.
    pub(crate) fn communication(err: &reqwest::Error) -> Self {
        Self::Communication {
            message: err.to_string(),
            timeout: err.is_timeout(),
        }
    }
}

/// Errors raised while validating caller input.
///
/// These are always reported locally; no network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The accessory identifier was empty.
    #[error("missing identifier")]
    MissingIdentifier,

    /// The bulk control pattern was empty.
    #[error("missing pattern")]
    MissingPattern,

    /// The action keyword is not one of the recognized actions.
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),

    /// The value could not be interpreted for the requested action.
    #[error("invalid value for {action}: {value:?}")]
    InvalidValue {
        /// The action the value was meant for.
        action: &'static str,
        /// The raw value supplied by the caller.
        value: String,
    },

    /// The controller rejected the request as invalid.
    #[error("rejected by controller: {0}")]
    Rejected(String),
}

/// Errors related to parsing controller responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
