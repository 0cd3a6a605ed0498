//! Request handling independent of the HTTP framework
//!
//! Each method performs exactly one repository or service call. The axum
//! glue in `routes` only extracts inputs and wraps outputs.

use std::sync::Arc;

use bookshelf_core::{
    Author, AuthorRepository, Book, BookRepository, CombinationService, CombinedResponse, Entity,
    Result,
};
use serde::de::DeserializeOwned;

pub struct Handler {
    book_repository: Arc<BookRepository>,
    author_repository: Arc<AuthorRepository>,
    combination_service: Arc<dyn CombinationService>,
}

impl Handler {
    pub fn new(
        book_repository: Arc<BookRepository>,
        author_repository: Arc<AuthorRepository>,
        combination_service: Arc<dyn CombinationService>,
    ) -> Self {
        Self {
            book_repository,
            author_repository,
            combination_service,
        }
    }

    /// Decode, validate and store a book
    ///
    /// # Errors
    ///
    /// `MalformedInput`, `ValidationError` or `DuplicateKey`.
    pub async fn save_book(&self, body: &[u8]) -> Result<Book> {
        let book: Book = parse_body(body)?;
        self.book_repository.create(book).await
    }

    pub async fn get_all_books(&self) -> Result<Vec<Book>> {
        self.book_repository.get_all().await
    }

    /// Decode, validate and store an author
    ///
    /// # Errors
    ///
    /// `MalformedInput`, `ValidationError` or `DuplicateKey`.
    pub async fn save_author(&self, body: &[u8]) -> Result<Author> {
        let author: Author = parse_body(body)?;
        self.author_repository.create(author).await
    }

    pub async fn get_all_authors(&self) -> Result<Vec<Author>> {
        self.author_repository.get_all().await
    }

    /// Every book with a resolvable author, author embedded
    pub async fn get_books_authors(&self) -> Result<Vec<CombinedResponse>> {
        self.combination_service
            .fetch_and_combine(
                self.book_repository.as_ref(),
                self.author_repository.as_ref(),
            )
            .await
    }
}

fn parse_body<E: Entity + DeserializeOwned>(body: &[u8]) -> Result<E> {
    let entity: E = serde_json::from_slice(body)?;
    entity.validate()?;
    Ok(entity)
}
