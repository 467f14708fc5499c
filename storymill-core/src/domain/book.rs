//! Book domain types
//!
//! A book is a server-side unit of long-running asynchronous work
//! (story text plus illustrations) identified by an integer id. The
//! client never computes lifecycle transitions itself: it adopts
//! whatever snapshot the server reports on each poll.

use std::fmt;

/// Lifecycle phase of a book as reported by the server.
///
/// The server owns the closed set of phase strings. Values the client
/// does not recognize are preserved verbatim in [`BookPhase::Other`]
/// and treated as non-terminal, so a newer backend can introduce
/// intermediate phases without breaking older clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookPhase {
    Creating,
    GeneratingStory,
    GeneratingImages,
    Composing,
    Completed,
    Failed,
    /// Unrecognized phase string, kept as received.
    Other(String),
}

impl BookPhase {
    /// Parse a wire-format phase string. Never fails: unknown values
    /// become [`BookPhase::Other`].
    pub fn parse(value: &str) -> Self {
        match value {
            "creating" => BookPhase::Creating,
            "generating_story" => BookPhase::GeneratingStory,
            "generating_images" => BookPhase::GeneratingImages,
            "composing" => BookPhase::Composing,
            "completed" => BookPhase::Completed,
            "failed" => BookPhase::Failed,
            other => BookPhase::Other(other.to_string()),
        }
    }

    /// The wire-format string for this phase.
    pub fn as_str(&self) -> &str {
        match self {
            BookPhase::Creating => "creating",
            BookPhase::GeneratingStory => "generating_story",
            BookPhase::GeneratingImages => "generating_images",
            BookPhase::Composing => "composing",
            BookPhase::Completed => "completed",
            BookPhase::Failed => "failed",
            BookPhase::Other(value) => value,
        }
    }

    /// Whether no further automatic transition is expected.
    ///
    /// Only `completed` and `failed` are terminal; everything else,
    /// including unrecognized phases, keeps the poller running.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookPhase::Completed | BookPhase::Failed)
    }

    /// User-facing label for this phase.
    pub fn label(&self) -> &'static str {
        match self {
            BookPhase::Creating => "Setting up your book",
            BookPhase::GeneratingStory => "Writing the story",
            BookPhase::GeneratingImages => "Illustrating the pages",
            BookPhase::Composing => "Assembling the book",
            BookPhase::Completed => "Ready",
            BookPhase::Failed => "Something went wrong",
            BookPhase::Other(_) => "Processing",
        }
    }
}

impl fmt::Display for BookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time snapshot of a book's generation state.
///
/// One snapshot is produced per poll response and fully replaces the
/// previous one. `progress` carries the raw server value unmodified;
/// rounding and clamping happen only at display time via
/// [`BookStatus::display_percent`]. Progress is not assumed to be
/// monotonic; the client renders whatever arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct BookStatus {
    pub id: i64,
    pub phase: BookPhase,
    pub progress: Option<f64>,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl BookStatus {
    /// Whether this snapshot is in a terminal phase.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Progress rounded to the nearest integer and clamped to 0..=100.
    ///
    /// A missing or non-finite value displays as 0 rather than being
    /// treated as an error.
    pub fn display_percent(&self) -> u8 {
        display_percent(self.progress)
    }
}

/// Clamp a raw progress value for display.
pub fn display_percent(progress: Option<f64>) -> u8 {
    let value = match progress {
        Some(value) if value.is_finite() => value,
        _ => return 0,
    };

    if value <= 0.0 {
        0
    } else if value >= 100.0 {
        100
    } else {
        value.round() as u8
    }
}
