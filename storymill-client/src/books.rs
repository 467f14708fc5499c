//! Book-related API endpoints

use storymill_core::domain::book::BookStatus;
use storymill_core::dto::book::{BookStatusResponse, BookSummary};

use crate::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Fetch the current status snapshot for a book
    ///
    /// # Arguments
    /// * `book_id` - The book identifier
    ///
    /// # Returns
    /// The latest lifecycle snapshot as reported by the server
    ///
    /// # Example
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use storymill_client::{ApiClient, StaticToken};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ApiClient::new(
    ///     "http://localhost:8080",
    ///     Arc::new(StaticToken::new("session-token")),
    /// );
    /// let status = client.get_book_status(42).await?;
    /// println!("{} at {}%", status.phase, status.display_percent());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_book_status(&self, book_id: i64) -> Result<BookStatus> {
        let url = format!("{}/api/books/{}/status", self.base_url, book_id);
        let request = self.authorize(self.client.get(&url))?;
        let response = self.execute(request).await?;

        let body: BookStatusResponse = self.handle_response(response).await?;
        Ok(body.into())
    }

    /// Ask the server to regenerate a failed book from the beginning
    ///
    /// The server resets the book to its initial lifecycle phase; the
    /// caller should resume polling and adopt whatever it reports next.
    ///
    /// # Arguments
    /// * `book_id` - The book identifier
    pub async fn retry_book(&self, book_id: i64) -> Result<()> {
        let url = format!("{}/api/books/{}/retry", self.base_url, book_id);
        let request = self.authorize(self.client.post(&url))?;
        let response = self.execute(request).await?;

        self.handle_empty_response(response).await
    }

    /// List the caller's books
    ///
    /// # Returns
    /// Library entries for every book owned by the authenticated caller
    pub async fn list_books(&self) -> Result<Vec<BookSummary>> {
        let url = format!("{}/api/books", self.base_url);
        let request = self.authorize(self.client.get(&url))?;
        let response = self.execute(request).await?;

        self.handle_response(response).await
    }
}
