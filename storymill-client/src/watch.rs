//! Book status watcher
//!
//! Tracks a single book through its generation lifecycle by polling the
//! status endpoint on a fixed interval. The server owns every state
//! transition; the watcher never predicts the next phase, it re-fetches
//! and adopts whatever snapshot comes back.
//!
//! Polling is strictly sequential: the next tick is armed only after
//! the previous fetch settles, so at most one request is in flight per
//! watch and snapshots are applied in issuance order. Stopping a watch
//! aborts the polling task, which also discards any response still in
//! flight.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use storymill_core::domain::book::BookStatus;

use crate::ApiClient;
use crate::error::{ClientError, Result};

/// Default delay between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Capacity of the event channel handed to the consumer. A full buffer
/// pauses polling instead of piling up snapshots behind a slow reader.
const EVENT_BUFFER: usize = 16;

/// The slice of the book service a watch needs.
///
/// [`ApiClient`] is the production implementation; tests script one in
/// memory to drive the polling protocol without a network.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the current status snapshot for a book.
    async fn fetch_status(&self, book_id: i64) -> Result<BookStatus>;

    /// Ask the server to regenerate a failed book.
    async fn request_retry(&self, book_id: i64) -> Result<()>;
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch_status(&self, book_id: i64) -> Result<BookStatus> {
        self.get_book_status(book_id).await
    }

    async fn request_retry(&self, book_id: i64) -> Result<()> {
        self.retry_book(book_id).await
    }
}

/// Failures that end a watch; polling again cannot fix them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchError {
    /// Credential missing or rejected; the user must re-authenticate.
    #[error("session expired: re-authentication required")]
    SessionExpired,
    /// The book does not exist or was deleted.
    #[error("book not found")]
    NotFound,
    /// The server refuses this client version.
    #[error("client update required")]
    UpdateRequired,
}

/// Events delivered to the consumer of a watch.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A fresh snapshot was applied. A terminal snapshot is always the
    /// last event of a successful watch.
    Status(BookStatus),
    /// A single poll failed; the watch keeps running and the next tick
    /// still fires on schedule.
    Transient { message: String },
    /// The watch stopped on an unrecoverable failure.
    Fatal(WatchError),
}

/// Map an unrecoverable client error onto a watch-ending event.
/// Returns `None` for errors worth another poll.
fn fatal_kind(error: &ClientError) -> Option<WatchError> {
    match error {
        ClientError::SessionExpired => Some(WatchError::SessionExpired),
        ClientError::NotFound(_) => Some(WatchError::NotFound),
        ClientError::UpdateRequired => Some(WatchError::UpdateRequired),
        _ => None,
    }
}

/// Watches books through their generation lifecycle.
///
/// One watcher can start any number of watches; each watch polls a
/// single book in its own task and reports through a [`WatchHandle`].
pub struct BookWatcher {
    source: Arc<dyn StatusSource>,
    interval: Duration,
}

impl BookWatcher {
    /// Creates a watcher polling at the default interval (3 seconds).
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self::with_interval(source, DEFAULT_POLL_INTERVAL)
    }

    /// Creates a watcher with a custom poll interval.
    pub fn with_interval(source: Arc<dyn StatusSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Begin tracking a book: one immediate fetch, then one per
    /// interval while the book stays non-terminal.
    ///
    /// # Arguments
    /// * `book_id` - Positive identifier of a book owned by the caller
    pub fn start(&self, book_id: i64) -> Result<WatchHandle> {
        if book_id < 1 {
            return Err(ClientError::InvalidRequest(format!(
                "book id must be a positive integer, got {}",
                book_id
            )));
        }

        let (events, receiver) = mpsc::channel(EVENT_BUFFER);
        let source = Arc::clone(&self.source);
        let interval = self.interval;

        let task = tokio::spawn(async move {
            poll_loop(source, book_id, interval, events).await;
        });

        Ok(WatchHandle {
            book_id,
            events: receiver,
            task,
        })
    }

    /// Ask the server to regenerate a failed book, then resume polling
    /// as if the watch had just been started.
    ///
    /// A rejected retry is returned once and polling does not resume;
    /// the caller must invoke `retry` again explicitly.
    pub async fn retry(&self, book_id: i64) -> Result<WatchHandle> {
        if book_id < 1 {
            return Err(ClientError::InvalidRequest(format!(
                "book id must be a positive integer, got {}",
                book_id
            )));
        }

        self.source.request_retry(book_id).await?;
        self.start(book_id)
    }
}

/// Live watch over one book.
///
/// Dropping the handle stops the watch; [`WatchHandle::stop`] does the
/// same explicitly and is idempotent.
#[derive(Debug)]
pub struct WatchHandle {
    book_id: i64,
    events: mpsc::Receiver<WatchEvent>,
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// The book this watch is tracking.
    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    /// Next event, or `None` once the watch has ended (terminal
    /// snapshot delivered, fatal error, or stopped).
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        self.events.recv().await
    }

    /// Cancel polling. A response already in flight is discarded and
    /// can no longer produce an event. Safe to call more than once.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop(
    source: Arc<dyn StatusSource>,
    book_id: i64,
    interval: Duration,
    events: mpsc::Sender<WatchEvent>,
) {
    loop {
        match source.fetch_status(book_id).await {
            Ok(status) => {
                let terminal = status.is_terminal();
                debug!(book_id, phase = %status.phase, "applied status snapshot");

                if events.send(WatchEvent::Status(status)).await.is_err() {
                    // Consumer dropped the handle; nobody is watching.
                    return;
                }
                if terminal {
                    return;
                }
            }
            Err(error) => match fatal_kind(&error) {
                Some(fatal) => {
                    warn!(book_id, %error, "status poll failed; stopping watch");
                    let _ = events.send(WatchEvent::Fatal(fatal)).await;
                    return;
                }
                None => {
                    warn!(book_id, %error, "status poll failed; will try again");
                    let message = error.to_string();
                    if events.send(WatchEvent::Transient { message }).await.is_err() {
                        return;
                    }
                }
            },
        }

        tokio::time::sleep(interval).await;
    }
}
