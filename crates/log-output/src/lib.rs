//! The log-output service.
//!
//! Asks ping-pong for the current ping count and greeter for a greeting, and
//! merges both with some local data into a single JSON object.

/*
 * ping-pong chain
 *
 * Copyright (C) 2026  ping-pong chain contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

#[macro_use]
extern crate tracing;

use service_runtime::http::ServeError;
use service_runtime::logging::TracingConfig;

pub mod config;
pub use config::Config;

pub mod http;

mod state;
pub use state::{AppState, read_information_file};

pub mod upstream;
pub use upstream::{UpstreamClient, UpstreamError};

/// Default tracing filter directives if `RUST_LOG` is not set.
pub const DEFAULT_LOG_DIRECTIVES: &str = "log_output=info,service_runtime=info,warn";

/// Errors returned by [`run()`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
	#[error("failed to build http client: {0}")]
	HttpClient(#[source] reqwest::Error),

	#[error(transparent)]
	Serve(#[from] ServeError),
}

/// Runs the HTTP server until a shutdown signal is received.
pub async fn run(config: &Config, tracing_config: &TracingConfig) -> Result<(), RunError> {
	let information = read_information_file(&config.information_file).await;
	let http_client = reqwest::Client::builder()
		.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
		.build()
		.map_err(RunError::HttpClient)?;

	let upstream = UpstreamClient::new(
		http_client,
		config.ping_pong_url.clone(),
		config.greeter_url.clone(),
	);

	let state = AppState::new(information, &*config.message, upstream);
	let tcp_listener = service_runtime::http::bind(config.port).await?;
	let router = service_runtime::http::with_middleware(http::router(state), tracing_config);

	service_runtime::http::serve(tcp_listener, router).await?;

	Ok(())
}
