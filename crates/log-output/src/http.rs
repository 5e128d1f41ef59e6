//! HTTP handlers for log-output.

use axum::extract::State;
use axum::{Json, Router, routing};
use serde::Serialize;
use serde_json::{Map, Value};
use service_runtime::http::ErrorResponse;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::AppState;

/// Returns log-output's router.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", routing::get(welcome))
		.route("/log", routing::get(log))
		.with_state(state)
}

#[derive(Debug, Serialize)]
struct Welcome {
	message: &'static str,
	status_code: u16,
}

async fn welcome() -> Json<Welcome> {
	Json(Welcome {
		message: "Welcome to the Log Output Service!",
		status_code: 200,
	})
}

/// `GET /log`
///
/// The response is an object with five keys: `file content`, `env variable`,
/// `Ping / Pongs`, `Greetings`, and the current UTC time (RFC 3339) mapped to
/// this process' token.
#[instrument(level = "debug", skip_all, err(level = "debug"))]
async fn log(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, ErrorResponse> {
	let ping_count = state
		.upstream
		.ping_count()
		.await
		.map_err(|error| ErrorResponse::internal(error.to_string()))?;

	let greeting = state
		.upstream
		.greeting()
		.await
		.map_err(|error| ErrorResponse::internal(error.to_string()))?;

	info!("{greeting}");

	let timestamp = OffsetDateTime::now_utc()
		.format(&Rfc3339)
		.map_err(|error| ErrorResponse::internal(error.to_string()))?;

	let mut body = Map::new();
	body.insert(String::from("file content"), Value::from(&*state.file_content));
	body.insert(String::from("env variable"), Value::from(format!("MESSAGE={}", state.message)));
	body.insert(timestamp, Value::from(state.token.to_string()));
	body.insert(String::from("Ping / Pongs"), Value::from(ping_count));
	body.insert(String::from("Greetings"), Value::from(greeting));

	Ok(Json(body))
}
