//! Account address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque account identity — a participant, the administrator, or the
/// ledger's custodian account on the external token service.
///
/// The ledger imposes no format beyond non-emptiness; the token service
/// that custody flows through is the authority on what an account is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Create a new account address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(!s.is_empty(), "account address must be non-empty");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
