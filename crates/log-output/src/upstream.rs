//! Clients for the services log-output depends on.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Errors that can occur when talking to an upstream service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
	#[error("failed to send request to {url}: {source}")]
	Request { url: Url, source: reqwest::Error },

	#[error("unexpected status code: {0}")]
	UnexpectedStatus(u16),

	#[error("failed to decode response from {url}: {source}")]
	Decode { url: Url, source: reqwest::Error },
}

/// HTTP client for ping-pong and greeter.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
	http_client: reqwest::Client,
	ping_pong_url: Url,
	greeter_url: Url,
}

#[derive(Debug, Deserialize)]
struct PingCount {
	pongs: i64,
}

#[derive(Debug, Deserialize)]
struct Greeting {
	greetings: String,
}

impl UpstreamClient {
	/// Creates a new [`UpstreamClient`].
	///
	/// Only the scheme, host and port of the given URLs are used.
	pub fn new(http_client: reqwest::Client, ping_pong_url: Url, greeter_url: Url) -> Self {
		Self { http_client, ping_pong_url, greeter_url }
	}

	/// Fetches the current ping count from `GET /pings`.
	#[instrument(level = "debug", skip(self), ret(level = "debug"), err(level = "debug"))]
	pub async fn ping_count(&self) -> Result<i64, UpstreamError> {
		let PingCount { pongs } = self.get_json(&self.ping_pong_url, "/pings").await?;

		Ok(pongs)
	}

	/// Fetches a greeting from `GET /greeter`.
	#[instrument(level = "debug", skip(self), ret(level = "debug"), err(level = "debug"))]
	pub async fn greeting(&self) -> Result<String, UpstreamError> {
		let Greeting { greetings } = self.get_json(&self.greeter_url, "/greeter").await?;

		Ok(greetings)
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		base_url: &Url,
		path: &str,
	) -> Result<T, UpstreamError> {
		let mut url = base_url.clone();
		url.set_path(path);
		url.set_query(None);

		let response = match self.http_client.get(url.clone()).send().await {
			Ok(response) => response,
			Err(source) => return Err(UpstreamError::Request { url, source }),
		};

		if response.status() != reqwest::StatusCode::OK {
			return Err(UpstreamError::UnexpectedStatus(response.status().as_u16()));
		}

		response
			.json::<T>()
			.await
			.map_err(|source| UpstreamError::Decode { url, source })
	}
}
