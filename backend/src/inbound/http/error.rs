//! Rendering of domain [`Error`]s as HTTP responses.
//!
//! Internal failures are logged with their full text, then replaced by a
//! generic body. Every error response repeats the trace id in the
//! `trace-id` header.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(trace_id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id.to_string()));
        }
        if self.code() == ErrorCode::InternalError {
            error!(trace_id = ?self.trace_id(), details = ?self.details(), "{}", self.message());
            return response.json(self.redacted());
        }
        response.json(self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        if status.is_client_error() {
            Error::invalid_request(err.to_string())
        } else {
            Error::internal(err.to_string())
        }
    }
}

/// JSON extractor settings that answer malformed bodies with an
/// `invalid_request` error instead of actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_payload_error)
}

fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let details = match &err {
        JsonPayloadError::Deserialize(inner) => json!({ "line": inner.line(), "column": inner.column() }),
        JsonPayloadError::ContentType => json!({ "expected": "application/json" }),
        _ => json!({}),
    };
    Error::invalid_request(err.to_string())
        .with_details(details)
        .into()
}
