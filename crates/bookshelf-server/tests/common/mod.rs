use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bookshelf_core::{
    new_combination_service, new_memory_author_repository, new_memory_book_repository,
    BookshelfError, Entity, Repository, Result,
};
use bookshelf_server::{build_router, Handler};
use tower::ServiceExt;

/// Router over fresh, empty in-memory stores
#[allow(dead_code)]
pub fn test_router() -> Router {
    build_router(Arc::new(Handler::new(
        new_memory_book_repository(),
        new_memory_author_repository(),
        new_combination_service(),
    )))
}

/// Router whose book store cannot be read
#[allow(dead_code)]
pub fn failing_router() -> Router {
    build_router(Arc::new(Handler::new(
        Arc::new(FailingRepository),
        new_memory_author_repository(),
        new_combination_service(),
    )))
}

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

#[allow(dead_code)]
pub async fn send(router: &Router, method: &str, uri: &str, body: &str) -> (u16, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    read_response(response).await
}

/// Send a prepared request and return the raw response
#[allow(dead_code)]
pub async fn dispatch(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn get(router: &Router, uri: &str) -> (u16, String) {
    send(router, "GET", uri, "").await
}

#[allow(dead_code)]
pub async fn post(router: &Router, uri: &str, body: &str) -> (u16, String) {
    send(router, "POST", uri, body).await
}

#[allow(dead_code)]
pub async fn read_response(response: Response<Body>) -> (u16, String) {
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
