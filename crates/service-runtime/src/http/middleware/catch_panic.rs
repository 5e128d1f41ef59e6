//! A middleware to catch panics and turn them into responses.
//!
//! See [`tower_http::catch_panic`] for more details.

use std::any::Any;

use axum::response::IntoResponse;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::http::ErrorResponse;

/// Creates a [`tower::Layer`], which produces a middleware that will catch panics in its inner
/// service and turn them into HTTP responses.
pub fn layer() -> CatchPanicLayer<PanicResponse> {
	CatchPanicLayer::custom(PanicResponse)
}

/// Responds to a caught panic with a `500` JSON error.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponse;

impl ResponseForPanic for PanicResponse {
	type ResponseBody = axum::body::Body;

	fn response_for_panic(
		&mut self,
		err: Box<dyn Any + Send + 'static>,
	) -> http::Response<Self::ResponseBody> {
		let panic_message = err
			.downcast_ref::<String>()
			.map(|s| s.as_str())
			.or_else(|| err.downcast_ref::<&str>().copied());

		error!(?panic_message, "http handler panicked");

		ErrorResponse::internal("something unexpected happened; please report this incident")
			.into_response()
	}
}
