use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::{DomainError, ErrorKind};

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.filmorate.local/{}", code))
        .with_code(code)
        .with_instance(instance);

    // Add trace id from current tracing span if available
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e.kind() {
        ErrorKind::NotFound => from_parts(
            StatusCode::NOT_FOUND,
            "FILMORATE_NOT_FOUND",
            "Not found",
            e.to_string(),
            instance,
        ),
        ErrorKind::Validation => from_parts(
            StatusCode::BAD_REQUEST,
            "FILMORATE_VALIDATION",
            "Validation error",
            e.to_string(),
            instance,
        ),
        ErrorKind::Unexpected => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Unexpected error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "FILMORATE_INTERNAL",
                "Internal error",
                "An unexpected error occurred",
                instance,
            )
        }
    }
}
