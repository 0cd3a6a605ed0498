use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookshelf_core::{BookshelfError, ExError, ExErrorKind};
use bookshelf_core_types::RequestContext;

/// Boundary wrapper turning core errors into plain-text responses
///
/// Carries the route's operation name and the request's correlation ids so
/// the failure log line can be tied back to the request.
#[derive(Debug)]
pub struct ApiError {
    error: BookshelfError,
    op: Option<&'static str>,
    context: Option<RequestContext>,
}

impl ApiError {
    pub fn new(error: BookshelfError) -> Self {
        Self {
            error,
            op: None,
            context: None,
        }
    }

    pub fn with_op(mut self, op: &'static str) -> Self {
        self.op = Some(op);
        self
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Structured view of the failure, enriched with op and request id
    pub fn to_ex_error(&self) -> ExError {
        let mut ex_err = ExError::from(&self.error);
        if let Some(op) = self.op {
            ex_err = ex_err.with_op(op);
        }
        if let Some(context) = &self.context {
            ex_err = ex_err.with_request_id(context.request_id.clone());
        }
        ex_err
    }

    pub fn status(&self) -> StatusCode {
        status_for(ExError::from(&self.error).kind())
    }
}

impl From<BookshelfError> for ApiError {
    fn from(err: BookshelfError) -> Self {
        Self::new(err)
    }
}

/// Client mistakes are 400; everything else is a server fault
pub fn status_for(kind: ExErrorKind) -> StatusCode {
    if kind.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let ex_err = self.to_ex_error();
        let op = ex_err.op().unwrap_or_default();
        let request_id = ex_err.request_id().map(|id| id.as_str()).unwrap_or_default();
        let trace_id = self
            .context
            .as_ref()
            .and_then(|ctx| ctx.trace_id.as_ref())
            .map(|id| id.as_str())
            .unwrap_or_default();

        if status.is_server_error() {
            tracing::error!(
                op = op,
                request_id = request_id,
                trace_id = trace_id,
                err.kind = ?ex_err.kind(),
                err.code = ex_err.code(),
                err.message = ex_err.message(),
                "request failed"
            );
        } else {
            tracing::debug!(
                op = op,
                request_id = request_id,
                err.code = ex_err.code(),
                "request rejected"
            );
        }

        (status, self.error.to_string()).into_response()
    }
}
