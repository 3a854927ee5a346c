//! Error types for the heidelpay client
//!
//! Every fallible operation in this crate returns [`Result`], whose error type is
//! [`HeidelpayError`]. Errors are never retried or swallowed: a failed call surfaces
//! the first error it encountered, including the failure of a payment-type or
//! customer creation performed on the caller's behalf inside `authorize`/`charge`.
//!
//! # Error Categories
//!
//! - **Configuration** ([`HeidelpayError::Config`]): missing private key or an
//!   unusable endpoint, reported at construction time
//! - **Gateway** ([`HeidelpayError::Gateway`]): the API answered with a non-success
//!   status; carries the status and the remote message
//! - **Transport** ([`HeidelpayError::Http`]): the request never completed
//! - **Lookup** ([`HeidelpayError::ResourceNotFound`]): a nested transaction is not
//!   part of the fetched payment

use serde::Deserialize;
use thiserror::Error;

/// Message used when the façade is constructed without a private key
pub const ERROR_MISSING_PRIVATE_KEY: &str = "Private key is missing";

/// Result type alias for heidelpay operations
pub type Result<T> = std::result::Result<T, HeidelpayError>;

/// Errors that can occur while talking to the heidelpay API
#[derive(Debug, Error)]
pub enum HeidelpayError {
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The API rejected the request
    #[error("Gateway error (status {status}): {message}")]
    Gateway {
        /// HTTP status returned by the API
        status: u16,
        /// Remote error code, e.g. `API.320.200.138`
        code: Option<String>,
        /// Merchant-facing message reported by the API
        message: String,
    },

    /// Transport level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Endpoint or resource URL could not be parsed
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A fetched payment type id does not belong to any known variant
    #[error("Unknown payment type: {id}")]
    UnknownPaymentType { id: String },

    /// A created resource came back without a server-assigned id
    #[error("Created {resource} has no id")]
    MissingId { resource: &'static str },

    /// A nested transaction is missing from the fetched payment
    #[error("{resource} not found: {id}")]
    ResourceNotFound { resource: &'static str, id: String },
}

impl HeidelpayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create the missing private key error
    pub fn missing_private_key() -> Self {
        Self::config(ERROR_MISSING_PRIVATE_KEY)
    }

    /// Create a gateway error from a status and message
    pub fn gateway(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::Gateway {
            status,
            code,
            message: message.into(),
        }
    }

    /// Build a gateway error from a non-success response body.
    ///
    /// The API reports failures as `{"errors": [{"code", "merchantMessage", ...}]}`;
    /// anything else is passed through as the raw body.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => match parsed.errors.into_iter().next() {
                Some(first) => {
                    let message = first
                        .merchant_message
                        .or(first.customer_message)
                        .unwrap_or_else(|| body.to_string());
                    Self::gateway(status, first.code, message)
                }
                None => Self::gateway(status, None, body),
            },
            Err(_) => Self::gateway(status, None, body),
        }
    }

    /// Create a not-found error for a nested resource
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            resource,
            id: id.into(),
        }
    }

    /// HTTP status of a gateway error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEntry {
    code: Option<String>,
    merchant_message: Option<String>,
    customer_message: Option<String>,
}
