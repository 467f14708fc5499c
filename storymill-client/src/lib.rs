//! Storymill HTTP Client
//!
//! A type-safe HTTP client for the Storymill book service, plus the
//! status watcher that tracks a book through its generation lifecycle.
//!
//! The book service does all of the heavy lifting (story generation,
//! illustration, PDF assembly) server-side; this crate only reads
//! status snapshots, asks for regeneration of failed books, and keeps
//! a caller informed while a book is being produced.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storymill_client::{ApiClient, BookWatcher, StaticToken, WatchEvent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(ApiClient::new(
//!         "http://localhost:8080",
//!         Arc::new(StaticToken::new("session-token")),
//!     ));
//!
//!     let watcher = BookWatcher::new(client);
//!     let mut handle = watcher.start(42)?;
//!
//!     while let Some(event) = handle.recv().await {
//!         if let WatchEvent::Status(status) = event {
//!             println!("{}: {}%", status.phase.label(), status.display_percent());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
mod books;
pub mod error;
pub mod events;
pub mod watch;

// Re-export commonly used types
pub use auth::{EnvToken, StaticToken, TokenProvider};
pub use error::{ClientError, Result};
pub use events::EventHandlers;
pub use watch::{BookWatcher, StatusSource, WatchError, WatchEvent, WatchHandle};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Timeout applied to every request by the default HTTP client.
///
/// A hung status poll must not be able to delay the next scheduled
/// tick indefinitely; a bounded request either settles or fails as a
/// transient error.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Storymill book service API
///
/// Covers the book endpoints the client apps need:
/// - Status snapshots (the read side of the generation pipeline)
/// - Regeneration of failed books
/// - The caller's book library
///
/// Every request carries a bearer token read from the injected
/// [`TokenProvider`] at send time.
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL of the book service (e.g., "https://api.storymill.app")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer credential source, consulted per request
    token: Arc<dyn TokenProvider>,
    /// Optional connection lifecycle hooks
    events: EventHandlers,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client with the default HTTP configuration
    /// (10 second request timeout).
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the book service
    /// * `token` - Bearer credential source, read before each request
    pub fn new(base_url: impl Into<String>, token: Arc<dyn TokenProvider>) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");
        Self::with_client(base_url, token, client)
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use reqwest::Client;
    /// use storymill_client::{ApiClient, StaticToken};
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ApiClient::with_client(
    ///     "http://localhost:8080",
    ///     Arc::new(StaticToken::new("session-token")),
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        token: Arc<dyn TokenProvider>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token,
            events: EventHandlers::default(),
        }
    }

    /// Attach connection lifecycle handlers (server unreachable,
    /// forced upgrade). Replaces any previously attached handlers.
    pub fn with_event_handlers(mut self, events: EventHandlers) -> Self {
        self.events = events;
        self
    }

    /// Get the base URL of the book service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Plumbing
    // =============================================================================

    /// Attach the current bearer token to a request.
    ///
    /// The token is read from the provider now, not at client
    /// construction; a missing token fails fast without a round trip.
    fn authorize(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let token = self
            .token
            .bearer_token()
            .ok_or(ClientError::SessionExpired)?;
        Ok(request.bearer_auth(token))
    }

    /// Send a request, reporting transport-level failures to the
    /// unreachable hook before surfacing them.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        match request.send().await {
            Ok(response) => Ok(response),
            Err(error) => {
                self.events.emit_unreachable(&error.to_string());
                Err(ClientError::Transport(error))
            }
        }
    }

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(self.status_error(status, error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., the retry
    /// acknowledgement).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(self.status_error(status, error_text));
        }

        Ok(())
    }

    /// Map an error status code onto the client error taxonomy.
    fn status_error(&self, status: StatusCode, message: String) -> ClientError {
        match status.as_u16() {
            401 | 403 => ClientError::SessionExpired,
            404 => ClientError::NotFound(message),
            426 => {
                self.events.emit_update_required();
                ClientError::UpdateRequired
            }
            code => ClientError::api_error(code, message),
        }
    }
}
