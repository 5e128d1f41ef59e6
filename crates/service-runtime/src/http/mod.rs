//! HTTP server plumbing.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use tokio::net::TcpListener;

use crate::logging::TracingConfig;

mod error;
pub use error::ErrorResponse;

pub mod middleware;

/// Errors that can occur while serving HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
	#[error("failed to bind tcp listener on port {port}: {source}")]
	BindTcpListener { port: u16, source: io::Error },

	#[error("failed to get tcp local addr: {0}")]
	GetLocalAddr(#[source] io::Error),

	#[error("failed to run http server: {0}")]
	Serve(#[source] io::Error),
}

/// Wraps `router` in the middleware stack every service uses.
///
/// Layers run outside-in: request ids are assigned first so the trace span
/// can pick them up, and panics are caught innermost so they still get
/// traced as a `500`.
pub fn with_middleware(router: Router, tracing_config: &TracingConfig) -> Router {
	router
		.layer(middleware::catch_panic::layer())
		.layer(middleware::trace::layer(tracing_config.include_http_headers))
		.layer(middleware::request_id::propagate_layer())
		.layer(middleware::request_id::set_layer())
}

/// Binds a TCP listener on all interfaces.
pub async fn bind(port: u16) -> Result<TcpListener, ServeError> {
	TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
		.await
		.map_err(|source| ServeError::BindTcpListener { port, source })
}

/// Serves `router` until a shutdown signal is received.
pub async fn serve(tcp_listener: TcpListener, router: Router) -> Result<(), ServeError> {
	let addr = tcp_listener.local_addr().map_err(ServeError::GetLocalAddr)?;

	info!(%addr, "listening for http requests");

	axum::serve(tcp_listener, router.into_make_service_with_connect_info::<SocketAddr>())
		.with_graceful_shutdown(crate::signals::shutdown())
		.await
		.map_err(ServeError::Serve)?;

	warn!("http server shut down");

	Ok(())
}

#[cfg(test)]
mod tests {
	use axum::body::Body;
	use axum::routing;
	use http::{Request, StatusCode};
	use http_body_util::BodyExt;
	use tower::ServiceExt;

	use super::*;
	use crate::logging::LogFormat;

	fn tracing_config() -> TracingConfig {
		TracingConfig {
			format: LogFormat::Pretty,
			default_directives: "info",
			include_http_headers: true,
		}
	}

	#[tokio::test]
	async fn responses_carry_a_request_id() -> anyhow::Result<()> {
		let router = Router::new().route("/", routing::get(|| async { "hi" }));
		let response = with_middleware(router, &tracing_config())
			.oneshot(Request::get("/").body(Body::empty())?)
			.await?;

		assert_eq!(response.status(), StatusCode::OK);
		assert!(response.headers().contains_key("x-request-id"));

		Ok(())
	}

	#[tokio::test]
	async fn existing_request_ids_are_kept() -> anyhow::Result<()> {
		let router = Router::new().route("/", routing::get(|| async { "hi" }));
		let response = with_middleware(router, &tracing_config())
			.oneshot(
				Request::get("/")
					.header("x-request-id", "from-upstream")
					.body(Body::empty())?,
			)
			.await?;

		assert_eq!(response.headers()["x-request-id"], "from-upstream");

		Ok(())
	}

	#[tokio::test]
	async fn panics_become_json_errors() -> anyhow::Result<()> {
		async fn explode() -> &'static str {
			panic!("boom")
		}

		let router = Router::new().route("/", routing::get(explode));
		let response = with_middleware(router, &tracing_config())
			.oneshot(Request::get("/").body(Body::empty())?)
			.await?;

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let body = response.into_body().collect().await?.to_bytes();
		let body = serde_json::from_slice::<serde_json::Value>(&body)?;

		assert!(body["error"].is_string());

		Ok(())
	}
}
