use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ConnectInfo;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::request_id::RequestId;
use tower_http::trace::{
	DefaultOnBodyChunk,
	DefaultOnEos,
	MakeSpan,
	OnFailure,
	OnRequest,
	OnResponse,
	TraceLayer,
};
use tracing::{Span, field};

/// The concrete [`TraceLayer`] returned by [`layer()`].
pub type HttpTraceLayer = TraceLayer<
	SharedClassifier<ServerErrorsAsFailures>,
	MakeRequestSpan,
	RecordRequest,
	RecordResponse,
	DefaultOnBodyChunk,
	DefaultOnEos,
	LogFailure,
>;

/// Creates a [`tower::Layer`], which produces a middleware that will emit tracing spans & events
/// for every HTTP request.
///
/// The `include_headers` parameter can be used to control whether request/response headers should
/// be included in the traces.
pub fn layer(include_headers: bool) -> HttpTraceLayer {
	TraceLayer::new_for_http()
		.make_span_with(MakeRequestSpan)
		.on_request(RecordRequest { include_headers })
		.on_response(RecordResponse { include_headers })
		.on_failure(LogFailure)
}

/// Creates each request span.
///
/// The request ID is injected by the request-id middleware and the client address by
/// `into_make_service_with_connect_info`. Either may be missing when the router is driven
/// directly, e.g. in tests, in which case the field stays empty.
#[derive(Debug, Clone, Copy)]
pub struct MakeRequestSpan;

impl<B> MakeSpan<B> for MakeRequestSpan {
	fn make_span(&mut self, request: &http::Request<B>) -> Span {
		let span = info_span! {
			"request",
			request.id = field::Empty,
			request.client_addr = field::Empty,
			request.method = field::Empty,
			request.uri = field::Empty,
			request.headers = field::Empty,
			response.status = field::Empty,
			response.headers = field::Empty,
			latency = field::Empty,
		};

		if let Some(request_id) = request
			.extensions()
			.get::<RequestId>()
			.and_then(|id| id.header_value().to_str().ok())
		{
			span.record("request.id", request_id);
		}

		if let Some(&ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
			span.record("request.client_addr", field::display(addr));
		}

		span
	}
}

/// Records metadata about the request.
#[derive(Debug, Clone, Copy)]
pub struct RecordRequest {
	include_headers: bool,
}

impl<B> OnRequest<B> for RecordRequest {
	fn on_request(&mut self, request: &http::Request<B>, span: &Span) {
		span.record("request.method", field::display(request.method()));
		span.record("request.uri", field::display(request.uri()));

		if self.include_headers {
			span.record("request.headers", field::debug(request.headers()));
		}
	}
}

/// Records metadata about the response.
#[derive(Debug, Clone, Copy)]
pub struct RecordResponse {
	include_headers: bool,
}

impl<B> OnResponse<B> for RecordResponse {
	fn on_response(self, response: &http::Response<B>, latency: Duration, span: &Span) {
		span.record("response.status", field::display(response.status()));

		if self.include_headers {
			span.record("response.headers", field::debug(response.headers()));
		}

		span.record("latency", field::debug(latency));
	}
}

/// Called whenever a request "failed".
///
/// What qualifies as a "failure" is determined by `ServerErrorsFailureClass`, but generally it is
/// a `5xx` status code.
#[derive(Debug, Clone, Copy)]
pub struct LogFailure;

impl OnFailure<ServerErrorsFailureClass> for LogFailure {
	fn on_failure(&mut self, failure_class: ServerErrorsFailureClass, latency: Duration, span: &Span) {
		span.in_scope(|| match failure_class {
			ServerErrorsFailureClass::StatusCode(status) => {
				error!(%status, ?latency, "http handler failed");
			}
			ServerErrorsFailureClass::Error(error) => {
				error!(%error, ?latency, "http handler failed");
			}
		})
	}
}
