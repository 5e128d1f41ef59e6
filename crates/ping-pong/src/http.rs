//! HTTP facade over the [`CounterStore`].
//!
//! Every store error is logged and answered with a `500`; nothing is retried
//! at this layer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing};
use serde::Serialize;
use service_runtime::http::ErrorResponse;

use crate::counter::CounterStore;

/// Returns the ping-pong router.
pub fn router<S>(store: S) -> Router
where
	S: CounterStore,
{
	Router::new()
		.route("/", routing::get(welcome))
		.route("/ping", routing::get(ping::<S>))
		.route("/pings", routing::get(pings::<S>))
		.route("/db-health", routing::get(db_health::<S>))
		.with_state(store)
}

#[derive(Debug, Serialize)]
struct Welcome {
	message: &'static str,
	status_code: u16,
}

async fn welcome() -> Json<Welcome> {
	Json(Welcome {
		message: "Welcome to the Ping Pong Service!",
		status_code: StatusCode::OK.as_u16(),
	})
}

#[derive(Debug, Serialize)]
struct Pong {
	pong: i64,
}

/// Increments the counter and responds with the new value.
async fn ping<S: CounterStore>(State(store): State<S>) -> Result<Json<Pong>, ErrorResponse> {
	let count = store.increment().await.map_err(|error| {
		error!(%error, "failed to increment counter");
		ErrorResponse::internal("Failed to increment count")
	})?;

	Ok(Json(Pong { pong: count }))
}

#[derive(Debug, Serialize)]
struct Pongs {
	pongs: i64,
}

/// Responds with the current count.
async fn pings<S: CounterStore>(State(store): State<S>) -> Result<Json<Pongs>, ErrorResponse> {
	let count = store.read().await.map_err(|error| {
		error!(%error, "failed to read counter");
		ErrorResponse::internal("Failed to get count")
	})?;

	Ok(Json(Pongs { pongs: count }))
}

#[derive(Debug, Serialize)]
struct Health {
	message: &'static str,
}

async fn db_health<S: CounterStore>(State(store): State<S>) -> Result<Json<Health>, ErrorResponse> {
	store.ping().await.map_err(|error| {
		warn!(%error, "database health check failed");
		ErrorResponse::internal("Database is not reachable")
	})?;

	Ok(Json(Health { message: "Database is reachable" }))
}

#[cfg(test)]
mod tests {
	use axum::body::Body;
	use http::Request;
	use http_body_util::BodyExt;
	use serde_json::{Value, json};
	use tokio::task::JoinSet;
	use tower::ServiceExt;

	use super::*;
	use crate::testing::MemoryCounterStore;

	async fn get(router: &Router, path: &str) -> anyhow::Result<(StatusCode, Value)> {
		let response = router
			.clone()
			.oneshot(Request::get(path).body(Body::empty())?)
			.await?;

		let status = response.status();
		let body = response.into_body().collect().await?.to_bytes();

		Ok((status, serde_json::from_slice(&body)?))
	}

	#[tokio::test]
	async fn welcomes() -> anyhow::Result<()> {
		let router = router(MemoryCounterStore::new(0));
		let (status, body) = get(&router, "/").await?;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "message": "Welcome to the Ping Pong Service!", "status_code": 200 }));

		Ok(())
	}

	#[tokio::test]
	async fn ping_increments_and_returns_new_count() -> anyhow::Result<()> {
		let router = router(MemoryCounterStore::new(7));

		for expected in 8..=12 {
			let (status, body) = get(&router, "/ping").await?;

			assert_eq!(status, StatusCode::OK);
			assert_eq!(body, json!({ "pong": expected }));
		}

		let (_, body) = get(&router, "/pings").await?;

		assert_eq!(body, json!({ "pongs": 12 }));

		Ok(())
	}

	#[tokio::test]
	async fn pings_does_not_mutate() -> anyhow::Result<()> {
		let router = router(MemoryCounterStore::new(3));

		for _ in 0..3 {
			let (status, body) = get(&router, "/pings").await?;

			assert_eq!(status, StatusCode::OK);
			assert_eq!(body, json!({ "pongs": 3 }));
		}

		Ok(())
	}

	#[tokio::test]
	async fn concurrent_pings_each_count_once() -> anyhow::Result<()> {
		const CALLERS: i64 = 64;

		let router = router(MemoryCounterStore::new(0));
		let mut tasks = JoinSet::new();

		for _ in 0..CALLERS {
			let router = router.clone();
			tasks.spawn(async move { get(&router, "/ping").await });
		}

		let mut pongs = Vec::new();

		while let Some(result) = tasks.join_next().await {
			let (status, body) = result??;

			assert_eq!(status, StatusCode::OK);
			pongs.push(body["pong"].as_i64().unwrap_or_default());
		}

		pongs.sort_unstable();

		assert_eq!(pongs, (1..=CALLERS).collect::<Vec<_>>());
		assert_eq!(get(&router, "/pings").await?.1, json!({ "pongs": CALLERS }));

		Ok(())
	}

	#[tokio::test]
	async fn health_reflects_reachability() -> anyhow::Result<()> {
		let store = MemoryCounterStore::new(0);
		let router = router(store.clone());

		let (status, body) = get(&router, "/db-health").await?;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "message": "Database is reachable" }));

		store.disconnect();

		let (status, body) = get(&router, "/db-health").await?;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({ "error": "Database is not reachable" }));

		Ok(())
	}

	#[tokio::test]
	async fn store_errors_become_500s() -> anyhow::Result<()> {
		let store = MemoryCounterStore::new(0);
		let router = router(store.clone());

		store.disconnect();

		let (status, body) = get(&router, "/ping").await?;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({ "error": "Failed to increment count" }));

		let (status, body) = get(&router, "/pings").await?;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({ "error": "Failed to get count" }));

		Ok(())
	}

	#[tokio::test]
	async fn missing_row_is_a_server_error() -> anyhow::Result<()> {
		let router = router(MemoryCounterStore::without_row());
		let (status, _) = get(&router, "/ping").await?;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

		Ok(())
	}
}
