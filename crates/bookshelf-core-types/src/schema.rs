//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the logging macros,
//! the HTTP trace spans and the tests that assert on captured events.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity fields
pub const FIELD_ENTITY_KIND: &str = "entity_kind";
pub const FIELD_ENTITY_NAME: &str = "entity_name";
pub const FIELD_ENTITY_ID: &str = "entity_id";

// Collection sizes
pub const FIELD_BOOK_COUNT: &str = "book_count";
pub const FIELD_AUTHOR_COUNT: &str = "author_count";
pub const FIELD_COMBINED_COUNT: &str = "combined_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
