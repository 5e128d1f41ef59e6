use std::borrow::Cow;
use std::fmt;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// A generic HTTP error response.
///
/// Serializes as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ErrorResponse {
	status: StatusCode,
	message: Cow<'static, str>,
}

#[derive(serde::Serialize)]
struct Envelope<'a> {
	error: &'a str,
}

impl ErrorResponse {
	/// Creates a new [`ErrorResponse`].
	pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
		Self { status, message: message.into() }
	}

	/// Creates a `500 Internal Server Error` response.
	pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
	}
}

impl fmt::Display for ErrorResponse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.status, self.message)
	}
}

impl std::error::Error for ErrorResponse {}

impl IntoResponse for ErrorResponse {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			error!(status = %self.status, message = %self.message, "responding with server error");
		} else {
			debug!(status = %self.status, message = %self.message, "responding with error");
		}

		(self.status, Json(Envelope { error: &self.message })).into_response()
	}
}
