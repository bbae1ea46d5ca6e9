//! The uniform `{success, data | error}` envelope returned by every operation.

use crate::errors::{Error, Result};
use serde::Serialize;
use tracing::warn;

/// Result of one storefront operation, ready to be serialized for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of rows in `data`, for listings that report it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Response<T> {
    /// Successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            error: None,
        }
    }

    /// Failed response carrying the error's message.
    #[must_use]
    pub fn failure(error: &Error) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            error: Some(error.to_string()),
        }
    }
}

impl<T> Response<Vec<T>> {
    /// Adds the number of returned rows to a successful listing.
    #[must_use]
    pub fn counted(mut self) -> Self {
        self.count = self.data.as_ref().map(Vec::len);
        self
    }
}

impl<T> From<Result<T>> for Response<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                warn!("Operation failed: {}", e);
                Self::failure(&e)
            }
        }
    }
}
