mod common;

use axum::body::Body;
use axum::http::Request;
use bookshelf_core::logging_facility::init_test_capture;
use bookshelf_core_types::schema::{FIELD_ERR_CODE, FIELD_REQUEST_ID, FIELD_TRACE_ID};
use common::{dispatch, failing_router, get, post, read_response, send, test_router};
use serde_json::{json, Value};

#[tokio::test]
async fn test_post_book_returns_stored_book() {
    let router = test_router();

    let (status, body) = post(&router, "/books", r#"{"name":"Dune","authorId":1}"#).await;

    assert_eq!(status, 200);
    let book: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(book, json!({"id": 1, "name": "Dune", "authorId": 1}));
}

#[tokio::test]
async fn test_post_ignores_client_supplied_id() {
    let router = test_router();

    let (status, body) = post(&router, "/authors", r#"{"id":99,"name":"Herbert"}"#).await;

    assert_eq!(status, 200);
    let author: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(author["id"], 1);

    let (status, body) = post(&router, "/authors", r#"{"id":-1,"name":"Le Guin"}"#).await;

    assert_eq!(status, 200);
    let author: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(author["id"], 2);
}

#[tokio::test]
async fn test_get_lists_everything_posted() {
    let router = test_router();
    post(&router, "/authors", r#"{"name":"Herbert"}"#).await;
    post(&router, "/authors", r#"{"name":"Le Guin"}"#).await;

    let (status, body) = get(&router, "/authors").await;

    assert_eq!(status, 200);
    let authors: Vec<Value> = serde_json::from_str(&body).unwrap();
    let mut names: Vec<&str> = authors.iter().map(|a| a["name"].as_str().unwrap()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Herbert", "Le Guin"]);
}

#[tokio::test]
async fn test_get_on_empty_store_returns_empty_array() {
    let router = test_router();

    let (status, body) = get(&router, "/books").await;

    assert_eq!(status, 200);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_duplicate_name_is_bad_request() {
    let router = test_router();
    post(&router, "/books", r#"{"name":"Dune","authorId":1}"#).await;

    let (status, body) = post(&router, "/books", r#"{"name":"Dune","authorId":2}"#).await;

    assert_eq!(status, 400);
    assert_eq!(body, "Duplicate Book found: Dune");
}

#[tokio::test]
async fn test_empty_name_is_bad_request() {
    let router = test_router();

    let (status, body) = post(&router, "/books", r#"{"name":"","authorId":1}"#).await;

    assert_eq!(status, 400);
    assert_eq!(body, "Book name cannot be empty");

    let (_, listed) = get(&router, "/books").await;
    assert_eq!(listed, "[]");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let router = test_router();

    let (status, body) = post(&router, "/authors", "{not json").await;

    assert_eq!(status, 400);
    assert_eq!(body, "Unable to parse request body");
}

#[tokio::test]
async fn test_unsupported_methods_are_bad_request() {
    let router = test_router();

    for (method, uri) in [
        ("PUT", "/books"),
        ("DELETE", "/authors"),
        ("POST", "/books-authors"),
        ("PATCH", "/books-authors"),
    ] {
        let (status, body) = send(&router, method, uri, "").await;
        assert_eq!(status, 400, "{method} {uri}");
        assert_eq!(body, "Invalid request method.");
    }
}

#[tokio::test]
async fn test_head_is_rejected_like_other_methods() {
    let router = test_router();

    for uri in ["/books", "/authors", "/books-authors"] {
        let (status, _) = send(&router, "HEAD", uri, "").await;
        assert_eq!(status, 400, "HEAD {uri}");
    }
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let router = test_router();
    let request = Request::builder()
        .method("GET")
        .uri("/books")
        .header("x-request-id", "req-echo-1")
        .body(Body::empty())
        .unwrap();

    let response = dispatch(&router, request).await;

    assert_eq!(
        response.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "req-echo-1"
    );
}

#[tokio::test]
async fn test_request_id_is_generated_when_absent() {
    let router = test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .body(Body::from("{"))
        .unwrap();

    let response = dispatch(&router, request).await;

    assert_eq!(response.status().as_u16(), 400);
    let request_id = response.headers().get("x-request-id").unwrap();
    assert!(!request_id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_server_error_is_logged_with_request_context() {
    let capture = init_test_capture();
    let router = failing_router();
    let request = Request::builder()
        .method("GET")
        .uri("/books-authors")
        .header("x-request-id", "req-failing-fetch-unique")
        .header("x-trace-id", "trace-failing-fetch-unique")
        .body(Body::empty())
        .unwrap();

    let (status, _) = read_response(dispatch(&router, request).await).await;

    assert_eq!(status, 500);
    let logged: Vec<_> = capture
        .events_for_op("http.get_books_authors")
        .into_iter()
        .filter(|e| e.field(FIELD_REQUEST_ID) == Some("req-failing-fetch-unique"))
        .collect();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].field(FIELD_TRACE_ID), Some("trace-failing-fetch-unique"));
    assert_eq!(logged[0].field(FIELD_ERR_CODE), Some("ERR_FETCH_FAILURE"));
}

#[tokio::test]
async fn test_books_authors_embeds_author_and_drops_reference() {
    let router = test_router();
    post(&router, "/authors", r#"{"name":"Author 1"}"#).await;
    post(&router, "/authors", r#"{"name":"Author 2"}"#).await;
    post(&router, "/books", r#"{"name":"Book 1","authorId":1}"#).await;
    post(&router, "/books", r#"{"name":"Book 2","authorId":1}"#).await;
    post(&router, "/books", r#"{"name":"Book 3","authorId":2}"#).await;
    post(&router, "/books", r#"{"name":"Orphan","authorId":7}"#).await;

    let (status, body) = get(&router, "/books-authors").await;

    assert_eq!(status, 200);
    let mut rows: Vec<Value> = serde_json::from_str(&body).unwrap();
    rows.sort_by_key(|row| row["id"].as_u64());
    assert_eq!(
        rows,
        vec![
            json!({"id": 1, "name": "Book 1", "author": {"id": 1, "name": "Author 1"}}),
            json!({"id": 2, "name": "Book 2", "author": {"id": 1, "name": "Author 1"}}),
            json!({"id": 3, "name": "Book 3", "author": {"id": 2, "name": "Author 2"}}),
        ]
    );
}

#[tokio::test]
async fn test_fetch_failure_is_internal_server_error() {
    let router = failing_router();

    let (status, body) = get(&router, "/books-authors").await;

    assert_eq!(status, 500);
    assert!(body.contains("backing store offline"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let router = test_router();

    let (status, _) = get(&router, "/publishers").await;

    assert_eq!(status, 404);
}
