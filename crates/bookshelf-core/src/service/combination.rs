//! Joins books to their authors
//!
//! # Responsibility
//! - Pair every book with the author its `author_id` points at.
//! - Fetch both collections concurrently before joining.
//!
//! # Invariants
//! - Books whose author cannot be resolved are dropped, not reported.
//! - The join is a synchronous pass over already-fetched snapshots; nothing
//!   is awaited while joining.
//! - A failed fetch fails the whole operation; no partial join is returned.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::errors::{BookshelfError, Result};
use crate::model::{Author, AuthorId, Book, CombinedResponse};
use crate::repo::{AuthorRepository, BookRepository};
use crate::{log_op_end, log_op_error, log_op_start};

/// How books are matched against authors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStrategy {
    /// For every book scan every author: O(books × authors)
    #[default]
    NestedScan,
    /// Index authors by id first: O(books + authors)
    Indexed,
}

impl JoinStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinStrategy::NestedScan => "nested_scan",
            JoinStrategy::Indexed => "indexed",
        }
    }

    /// Run the join over two materialized collections
    ///
    /// Output follows the order of `books`.
    pub fn join(&self, books: &[Book], authors: &[Author]) -> Vec<CombinedResponse> {
        match self {
            JoinStrategy::NestedScan => nested_scan(books, authors),
            JoinStrategy::Indexed => indexed(books, authors),
        }
    }
}

// Author ids are unique per store, so at most one author matches. Nothing
// enforces that here; a repeated id yields one row per match.
fn nested_scan(books: &[Book], authors: &[Author]) -> Vec<CombinedResponse> {
    let mut combined = Vec::new();
    for book in books {
        for author in authors {
            if book.author_id == Some(author.id) {
                combined.push(CombinedResponse::new(book.clone(), author.clone()));
            }
        }
    }
    combined
}

fn indexed(books: &[Book], authors: &[Author]) -> Vec<CombinedResponse> {
    let by_id: HashMap<AuthorId, &Author> = authors.iter().map(|a| (a.id, a)).collect();

    books
        .iter()
        .filter_map(|book| {
            let author = book.author_id.and_then(|id| by_id.get(&id))?;
            Some(CombinedResponse::new(book.clone(), (*author).clone()))
        })
        .collect()
}

/// Produces the combined book/author view
#[async_trait]
pub trait CombinationService: Send + Sync {
    /// Join books to authors; books without a matching author are omitted
    fn generate_response(&self, books: &[Book], authors: &[Author]) -> Vec<CombinedResponse>;

    /// Fetch both repositories concurrently, then join
    ///
    /// # Errors
    ///
    /// Returns `FetchFailure` if either repository read fails or the
    /// configured fetch timeout elapses.
    async fn fetch_and_combine(
        &self,
        books: &BookRepository,
        authors: &AuthorRepository,
    ) -> Result<Vec<CombinedResponse>>;

    /// Fetch books, then authors, one after the other, then join
    ///
    /// # Errors
    ///
    /// Propagates the first repository failure.
    async fn fetch_sequential_and_combine(
        &self,
        books: &BookRepository,
        authors: &AuthorRepository,
    ) -> Result<Vec<CombinedResponse>> {
        let all_books = books.get_all().await?;
        let all_authors = authors.get_all().await?;
        Ok(self.generate_response(&all_books, &all_authors))
    }
}

/// Default combination service
#[derive(Debug, Clone, Default)]
pub struct CombinationServiceImpl {
    strategy: JoinStrategy,
    fetch_timeout: Option<Duration>,
}

impl CombinationServiceImpl {
    pub fn new(strategy: JoinStrategy) -> Self {
        Self {
            strategy,
            fetch_timeout: None,
        }
    }

    /// Bound the concurrent fetch; expiry is reported as `FetchFailure`
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn strategy(&self) -> JoinStrategy {
        self.strategy
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }

    async fn fetch_concurrently(
        &self,
        books: &BookRepository,
        authors: &AuthorRepository,
    ) -> Result<(Vec<Book>, Vec<Author>)> {
        let fetch = async { tokio::try_join!(books.get_all(), authors.get_all()) };

        match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch).await.map_err(|_| {
                BookshelfError::FetchFailure {
                    reason: format!(
                        "repositories did not respond within {}ms",
                        limit.as_millis()
                    ),
                }
            })?,
            None => fetch.await,
        }
    }
}

#[async_trait]
impl CombinationService for CombinationServiceImpl {
    fn generate_response(&self, books: &[Book], authors: &[Author]) -> Vec<CombinedResponse> {
        self.strategy.join(books, authors)
    }

    async fn fetch_and_combine(
        &self,
        books: &BookRepository,
        authors: &AuthorRepository,
    ) -> Result<Vec<CombinedResponse>> {
        let start = Instant::now();
        log_op_start!(
            "service.fetch_and_combine",
            strategy = self.strategy.as_str()
        );

        match self.fetch_concurrently(books, authors).await {
            Ok((all_books, all_authors)) => {
                let combined = self.generate_response(&all_books, &all_authors);
                log_op_end!(
                    "service.fetch_and_combine",
                    duration_ms = start.elapsed().as_millis() as u64,
                    book_count = all_books.len(),
                    author_count = all_authors.len(),
                    combined_count = combined.len()
                );
                Ok(combined)
            }
            Err(err) => {
                log_op_error!(
                    "service.fetch_and_combine",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }
}

/// Construct the default (nested-scan, no timeout) service
pub fn new_combination_service() -> Arc<dyn CombinationService> {
    Arc::new(CombinationServiceImpl::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;

    fn fixture_books() -> Vec<Book> {
        vec![
            Book::new("Book 1", 1).with_id(1),
            Book::new("Book 2", 1).with_id(2),
            Book::new("Book 3", 2).with_id(3),
        ]
    }

    fn fixture_authors() -> Vec<Author> {
        vec![
            Author::new("Author 1").with_id(1),
            Author::new("Author 2").with_id(2),
        ]
    }

    #[test]
    fn test_generate_response_basic() {
        let service = new_combination_service();

        let response = service.generate_response(&fixture_books(), &fixture_authors());

        assert_eq!(response.len(), 3);
        for entry in &response {
            assert_eq!(
                entry.book.author_id, None,
                "author id should be cleared so it is omitted from the response"
            );
        }
        assert_eq!(response[2].author.name, "Author 2");
    }

    #[test]
    fn test_dangling_author_reference_is_dropped() {
        let mut books = fixture_books();
        books.push(Book::new("Orphan", 99).with_id(4));
        books.push(Book::without_author("Anonymous").with_id(5));

        let response = CombinationServiceImpl::new(JoinStrategy::NestedScan)
            .generate_response(&books, &fixture_authors());

        assert_eq!(response.len(), 3);
        assert!(response.iter().all(|c| c.book.name != "Orphan"));
        assert!(response.iter().all(|c| c.book.name != "Anonymous"));
    }

    #[test]
    fn test_empty_inputs_yield_empty_output() {
        let service = CombinationServiceImpl::default();

        assert!(service.generate_response(&[], &fixture_authors()).is_empty());
        assert!(service.generate_response(&fixture_books(), &[]).is_empty());
    }

    #[test]
    fn test_strategies_agree_on_fixture() {
        let nested = JoinStrategy::NestedScan.join(&fixture_books(), &fixture_authors());
        let indexed = JoinStrategy::Indexed.join(&fixture_books(), &fixture_authors());

        assert_eq!(nested, indexed);
    }

    #[test]
    fn test_nested_scan_emits_row_per_matching_author() {
        let authors = vec![
            Author::new("Twin A").with_id(1),
            Author::new("Twin B").with_id(1),
        ];
        let books = vec![Book::new("Shared", 1).with_id(1)];

        let response = JoinStrategy::NestedScan.join(&books, &authors);

        assert_eq!(response.len(), 2);
    }

    #[test]
    fn test_timeout_builder() {
        let service = CombinationServiceImpl::new(JoinStrategy::Indexed)
            .with_fetch_timeout(Duration::from_millis(250));

        assert_eq!(service.strategy(), JoinStrategy::Indexed);
        assert_eq!(service.fetch_timeout(), Some(Duration::from_millis(250)));
    }
}
