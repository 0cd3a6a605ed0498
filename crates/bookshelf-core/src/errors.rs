use bookshelf_core_types::RequestId;
use thiserror::Error;

use crate::model::EntityKind;

/// Result type alias using BookshelfError
pub type Result<T> = std::result::Result<T, BookshelfError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and the HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Client errors
    InvalidInput,
    AlreadyExists,
    MalformedInput,

    // Read path
    FetchFailure,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::MalformedInput => "ERR_MALFORMED_INPUT",
            ExErrorKind::FetchFailure => "ERR_FETCH_FAILURE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure is attributable to the caller
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput | ExErrorKind::AlreadyExists | ExErrorKind::MalformedInput
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, entity kind
/// and name, request id) to make a log line self-describing.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_kind: Option<EntityKind>,
    entity_name: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_kind: None,
            entity_name: None,
            request_id: None,
            message: String::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_entity_kind(mut self, kind: EntityKind) -> Self {
        self.entity_kind = Some(kind);
        self
    }

    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.entity_kind
    }

    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind) = self.entity_kind {
            write!(f, " (entity_kind: {})", kind.as_str())?;
        }
        if let Some(name) = &self.entity_name {
            write!(f, " (entity_name: {})", name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for repository and service operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookshelfError {
    /// A required field is empty
    #[error("{kind} {field} cannot be empty")]
    ValidationError {
        kind: EntityKind,
        field: &'static str,
    },

    /// An entity with the same name is already stored
    #[error("Duplicate {kind} found: {name}")]
    DuplicateKey { kind: EntityKind, name: String },

    /// Request body could not be decoded into the expected shape
    #[error("Unable to parse request body")]
    MalformedInput { reason: String },

    /// A repository read failed or did not finish in time
    #[error("Failed to fetch records: {reason}")]
    FetchFailure { reason: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<&BookshelfError> for ExError {
    fn from(err: &BookshelfError) -> Self {
        match err {
            BookshelfError::ValidationError { kind, field } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_kind(*kind)
                    .with_message(format!("{} is required", field))
            }

            BookshelfError::DuplicateKey { kind, name } => ExError::new(ExErrorKind::AlreadyExists)
                .with_entity_kind(*kind)
                .with_entity_name(name.clone())
                .with_message("Name is already taken"),

            BookshelfError::MalformedInput { reason } => {
                ExError::new(ExErrorKind::MalformedInput).with_message(reason.clone())
            }

            BookshelfError::FetchFailure { reason } => {
                ExError::new(ExErrorKind::FetchFailure).with_message(reason.clone())
            }

            BookshelfError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message.clone())
            }
        }
    }
}

impl From<BookshelfError> for ExError {
    fn from(err: BookshelfError) -> Self {
        ExError::from(&err)
    }
}

/// Conversion from serde_json::Error to BookshelfError
impl From<serde_json::Error> for BookshelfError {
    fn from(err: serde_json::Error) -> Self {
        BookshelfError::MalformedInput {
            reason: err.to_string(),
        }
    }
}
