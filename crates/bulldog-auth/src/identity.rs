//! The verified identity bound to a token.

use serde::{Deserialize, Serialize};

/// Who a request or token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric account identifier.
    pub account_id: i64,
    /// Login identifier (email).
    pub identifier: String,
}

impl Identity {
    /// Creates an identity.
    pub fn new(account_id: i64, identifier: impl Into<String>) -> Self {
        Self {
            account_id,
            identifier: identifier.into(),
        }
    }
}
