//! The ping-pong service.
//!
//! Counts pings in a single-row PostgreSQL table and exposes the count over HTTP.

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

#[cfg(test)]
mod testing;

pub mod config;
pub use config::{Config, DatabaseConfig};

pub mod counter;
pub use counter::{CounterError, CounterStore, PgCounterStore};

pub mod database;
pub use database::{BootstrapError, RetryPolicy};

pub mod http;

/// Default tracing filter directives if `RUST_LOG` is not set.
pub const DEFAULT_LOG_DIRECTIVES: &str = "ping_pong=info,service_runtime=info,sqlx=warn,warn";

/// Errors returned by [`run()`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
	#[error(transparent)]
	Bootstrap(#[from] BootstrapError),

	#[error(transparent)]
	Serve(#[from] ServeError),
}

/// Connects to the database, makes sure the counter exists, and serves HTTP
/// until a shutdown signal is received.
pub async fn run(config: &Config, tracing_config: &TracingConfig) -> Result<(), RunError> {
	let pool = database::connect(&config.database, RetryPolicy::default()).await?;
	database::ensure_schema(&pool).await?;

	let tcp_listener = service_runtime::http::bind(config.port).await?;
	let store = PgCounterStore::new(pool.clone());
	let router = service_runtime::http::with_middleware(http::router(store), tracing_config);
	let served = service_runtime::http::serve(tcp_listener, router).await;

	warn!("closing database connections");
	pool.close().await;

	served.map_err(RunError::from)
}
