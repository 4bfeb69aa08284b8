//! Error body shared between the HTTP server and client.

use serde::{Deserialize, Serialize};

/// JSON error body returned by the server on any non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub error: String,
}

impl ErrorBody {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
