//! HTTP handlers for the greeter.

use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router, routing};
use serde::Serialize;

use crate::Config;

/// Returns the greeter's router.
pub fn router(config: &Config) -> Router {
	let greeting = Arc::<str>::from(format!("Hello from version {}", config.version));

	Router::new()
		.route("/", routing::get(welcome))
		.route("/greeter", routing::get(greet))
		.with_state(greeting)
}

#[derive(Debug, Serialize)]
struct Welcome {
	message: &'static str,
}

async fn welcome() -> Json<Welcome> {
	Json(Welcome { message: "Welcome to the Greeter Service!" })
}

/// The body of `GET /greeter`.
#[derive(Debug, Serialize)]
struct Greeting {
	greetings: Arc<str>,
}

#[instrument(level = "debug", skip_all)]
async fn greet(State(greeting): State<Arc<str>>) -> Json<Greeting> {
	Json(Greeting { greetings: greeting })
}

#[cfg(test)]
mod tests {
	use axum::body::Body;
	use http::{Request, StatusCode};
	use http_body_util::BodyExt;
	use serde_json::{Value, json};
	use tower::ServiceExt;

	use super::*;

	fn config() -> Config {
		Config { port: 0, version: Box::from("v2") }
	}

	async fn get(path: &str) -> anyhow::Result<(StatusCode, Value)> {
		let response = router(&config())
			.oneshot(Request::get(path).body(Body::empty())?)
			.await?;

		let status = response.status();
		let body = response.into_body().collect().await?.to_bytes();

		Ok((status, serde_json::from_slice(&body)?))
	}

	#[tokio::test]
	async fn greets_with_version() -> anyhow::Result<()> {
		let (status, body) = get("/greeter").await?;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "greetings": "Hello from version v2" }));

		Ok(())
	}

	#[tokio::test]
	async fn welcomes() -> anyhow::Result<()> {
		let (status, body) = get("/").await?;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["message"], "Welcome to the Greeter Service!");

		Ok(())
	}
}
