//! Configuration module
//!
//! Handles CLI configuration including the book service URL and session
//! credential.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the book service
    pub api_url: String,
    /// Bearer token, if provided up front. When absent the client reads
    /// STORYMILL_TOKEN from the environment at request time.
    pub token: Option<String>,
}
