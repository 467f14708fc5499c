//! Bearer credential seam
//!
//! The credential store is owned by the embedding application (keychain,
//! session manager, environment). The client only asks for the current
//! token immediately before each request and never caches it, so a
//! token refresh elsewhere is picked up on the very next poll.

use std::fmt;

/// Source of the bearer token attached to every request.
///
/// `None` means there is no valid session; the client reports this as
/// a session-expired error without issuing the request.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, handed over once at construction.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never render the token value itself.
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.token.clone())
    }
}

/// Reads the token from an environment variable on every call.
///
/// An unset or empty variable means no session.
#[derive(Clone)]
pub struct EnvToken {
    variable: String,
}

impl EnvToken {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl TokenProvider for EnvToken {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.variable)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for EnvToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never render the token value itself.
        f.debug_struct("EnvToken")
            .field("variable", &self.variable)
            .finish()
    }
}
