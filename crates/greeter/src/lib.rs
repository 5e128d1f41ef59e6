//! The greeter service.
//!
//! Responds with a static greeting that names the version it was deployed as.

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

/// Default tracing filter directives if `RUST_LOG` is not set.
pub const DEFAULT_LOG_DIRECTIVES: &str = "greeter=info,service_runtime=info,warn";

/// Errors returned by [`run()`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
	#[error(transparent)]
	Serve(#[from] ServeError),
}

/// Runs the HTTP server until a shutdown signal is received.
pub async fn run(config: &Config, tracing_config: &TracingConfig) -> Result<(), RunError> {
	let tcp_listener = service_runtime::http::bind(config.port).await?;
	let router = service_runtime::http::with_middleware(http::router(config), tracing_config);

	info!(version = %config.version, "serving greetings");

	service_runtime::http::serve(tcp_listener, router).await?;

	Ok(())
}
