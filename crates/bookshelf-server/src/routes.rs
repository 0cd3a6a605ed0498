//! HTTP routes
//!
//! | Path             | GET                | POST          |
//! |------------------|--------------------|---------------|
//! | `/books`         | all books          | create a book |
//! | `/authors`       | all authors        | create author |
//! | `/books-authors` | books with authors | -             |
//!
//! Any other method on a known path answers 400 `Invalid request method.`

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Extension, Json, Router,
};
use bookshelf_core::{Author, Book, BookshelfError, CombinedResponse};
use bookshelf_core_types::{RequestContext, RequestId, TraceId};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::error::ApiError;
use crate::handler::Handler;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const INVALID_METHOD_MESSAGE: &str = "Invalid request method.";

type AppState = Arc<Handler>;

pub fn build_router(handler: Arc<Handler>) -> Router {
    Router::new()
        .route(
            "/books",
            get(get_all_books)
                .post(save_book)
                .head(invalid_method)
                .fallback(invalid_method),
        )
        .route(
            "/authors",
            get(get_all_authors)
                .post(save_author)
                .head(invalid_method)
                .fallback(invalid_method),
        )
        .route(
            "/books-authors",
            get(get_books_authors)
                .head(invalid_method)
                .fallback(invalid_method),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(middleware::from_fn(assign_request_context))
        .with_state(handler)
}

/// Correlation ids from incoming headers, generated when absent
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    let request_id = header_value(headers, REQUEST_ID_HEADER)
        .map(RequestId::from_string)
        .unwrap_or_default();

    let ctx = RequestContext::with_request_id(request_id);
    match header_value(headers, TRACE_ID_HEADER) {
        Some(trace_id) => ctx.with_trace_id(TraceId::from_string(trace_id)),
        None => ctx,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)?
        .to_str()
        .ok()
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

// Outermost layer: resolves the request's correlation ids once, shares them
// with the trace span and handlers, and echoes the request id back.
async fn assign_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = request_context(request.headers());
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(ctx.request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn make_request_span(request: &Request<Body>) -> Span {
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| request_context(request.headers()));

    let span = tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %ctx.request_id,
        trace_id = tracing::field::Empty,
    );
    if let Some(trace_id) = &ctx.trace_id {
        span.record("trace_id", tracing::field::display(trace_id));
    }
    span
}

fn api_error(op: &'static str, ctx: RequestContext) -> impl FnOnce(BookshelfError) -> ApiError {
    move |err| ApiError::new(err).with_op(op).with_context(ctx)
}

async fn get_all_books(
    State(handler): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Vec<Book>>, ApiError> {
    handler
        .get_all_books()
        .await
        .map(Json)
        .map_err(api_error("http.get_all_books", ctx))
}

async fn save_book(
    State(handler): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    handler
        .save_book(&body)
        .await
        .map(Json)
        .map_err(api_error("http.save_book", ctx))
}

async fn get_all_authors(
    State(handler): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Vec<Author>>, ApiError> {
    handler
        .get_all_authors()
        .await
        .map(Json)
        .map_err(api_error("http.get_all_authors", ctx))
}

async fn save_author(
    State(handler): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    body: Bytes,
) -> Result<Json<Author>, ApiError> {
    handler
        .save_author(&body)
        .await
        .map(Json)
        .map_err(api_error("http.save_author", ctx))
}

async fn get_books_authors(
    State(handler): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Vec<CombinedResponse>>, ApiError> {
    handler
        .get_books_authors()
        .await
        .map(Json)
        .map_err(api_error("http.get_books_authors", ctx))
}

async fn invalid_method() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, INVALID_METHOD_MESSAGE)
}
