//! Book DTOs for the book service API

use serde::{Deserialize, Serialize};

use crate::domain::book::{BookPhase, BookStatus};

/// Status payload returned by `GET /api/books/{id}/status`.
///
/// `status` stays a plain string here; it is parsed into a
/// [`BookPhase`] during conversion so unknown values survive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStatusResponse {
    pub id: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<BookStatusResponse> for BookStatus {
    fn from(response: BookStatusResponse) -> Self {
        BookStatus {
            id: response.id,
            phase: BookPhase::parse(&response.status),
            progress: response.progress_percentage,
            error_message: response.error_message,
            created_at: response.created_at,
            completed_at: response.completed_at,
        }
    }
}

/// Library listing entry returned by `GET /api/books`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl BookSummary {
    pub fn phase(&self) -> BookPhase {
        BookPhase::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_full_body() {
        let json = r#"{
            "id": 42,
            "status": "generating_images",
            "progress_percentage": 61.5,
            "error_message": null,
            "created_at": "2026-07-01T10:00:00Z",
            "completed_at": null
        }"#;

        let response: BookStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, 42);
        assert_eq!(response.status, "generating_images");
        assert_eq!(response.progress_percentage, Some(61.5));

        let status: BookStatus = response.into();
        assert_eq!(status.phase, BookPhase::GeneratingImages);
        assert_eq!(status.progress, Some(61.5));
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_status_response_omitted_optionals() {
        // The backend may omit progress entirely early in the lifecycle.
        let json = r#"{
            "id": 7,
            "status": "creating",
            "created_at": "2026-07-01T10:00:00Z"
        }"#;

        let response: BookStatusResponse = serde_json::from_str(json).unwrap();
        let status: BookStatus = response.into();

        assert_eq!(status.phase, BookPhase::Creating);
        assert_eq!(status.progress, None);
        assert_eq!(status.display_percent(), 0);
        assert_eq!(status.error_message, None);
        assert_eq!(status.completed_at, None);
    }

    #[test]
    fn test_status_response_unknown_phase_deserializes() {
        let json = r#"{
            "id": 7,
            "status": "unknown_future_state",
            "progress_percentage": 42,
            "created_at": "2026-07-01T10:00:00Z"
        }"#;

        let response: BookStatusResponse = serde_json::from_str(json).unwrap();
        let status: BookStatus = response.into();

        assert_eq!(
            status.phase,
            BookPhase::Other("unknown_future_state".to_string())
        );
        assert!(!status.is_terminal());
        assert_eq!(status.display_percent(), 42);
    }

    #[test]
    fn test_failed_status_carries_error_message() {
        let json = r#"{
            "id": 9,
            "status": "failed",
            "error_message": "illustration model unavailable",
            "created_at": "2026-07-01T10:00:00Z"
        }"#;

        let status: BookStatus = serde_json::from_str::<BookStatusResponse>(json)
            .unwrap()
            .into();

        assert_eq!(status.phase, BookPhase::Failed);
        assert!(status.is_terminal());
        assert_eq!(
            status.error_message.as_deref(),
            Some("illustration model unavailable")
        );
    }

    #[test]
    fn test_book_summary_phase() {
        let json = r#"{
            "id": 3,
            "title": "Mia and the Moon Dragon",
            "status": "completed",
            "created_at": "2026-06-12T08:30:00Z"
        }"#;

        let summary: BookSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.phase(), BookPhase::Completed);
    }
}
