use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bookshelf_core::{
    new_memory_author_repository, new_memory_book_repository, Author, AuthorRepository, Book,
    BookRepository, BookshelfError, Entity, Repository, Result,
};

/// Books from the reference fixture: two by author 1, one by author 2
#[allow(dead_code)]
pub fn fixture_books() -> Vec<Book> {
    vec![
        Book::new("Book 1", 1),
        Book::new("Book 2", 1),
        Book::new("Book 3", 2),
    ]
}

#[allow(dead_code)]
pub fn fixture_authors() -> Vec<Author> {
    vec![Author::new("Author 1"), Author::new("Author 2")]
}

/// Create both fixture stores through the public `create` path
///
/// Authors are inserted in order, so "Author 1" gets id 1 and "Author 2"
/// gets id 2, matching the books' references.
#[allow(dead_code)]
pub async fn seeded_repositories() -> (Arc<BookRepository>, Arc<AuthorRepository>) {
    let books = new_memory_book_repository();
    let authors = new_memory_author_repository();

    for author in fixture_authors() {
        authors.create(author).await.unwrap();
    }
    for book in fixture_books() {
        books.create(book).await.unwrap();
    }

    (books, authors)
}

/// Repository whose reads always fail
#[allow(dead_code)]
pub struct FailingRepository;

#[async_trait]
impl<E: Entity> Repository<E> for FailingRepository {
    async fn get_all(&self) -> Result<Vec<E>> {
        Err(BookshelfError::FetchFailure {
            reason: "backing store offline".to_string(),
        })
    }

    async fn create(&self, _entity: E) -> Result<E> {
        Err(BookshelfError::Internal {
            message: "backing store offline".to_string(),
        })
    }
}

/// Repository that answers reads after a fixed delay
#[allow(dead_code)]
pub struct SlowRepository<E> {
    pub delay: Duration,
    pub items: Vec<E>,
}

#[async_trait]
impl<E: Entity> Repository<E> for SlowRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>> {
        tokio::time::sleep(self.delay).await;
        Ok(self.items.clone())
    }

    async fn create(&self, entity: E) -> Result<E> {
        Ok(entity)
    }
}

/// Sort key so order-independent comparisons can use `assert_eq!`
#[allow(dead_code)]
pub fn sorted_by_id<T: Entity>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| item.id());
    items
}
