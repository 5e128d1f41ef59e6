//! Database bootstrapping.
//!
//! Before serving any traffic, the service needs a live connection pool and a
//! counter table containing its single row. [`connect()`] keeps trying for a
//! bounded amount of time and [`ensure_schema()`] is safe to run on every
//! startup.

use std::num::NonZero;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};

use crate::config::DatabaseConfig;
use crate::counter::COUNTER_ID;

mod retry;
pub use retry::{RetryPolicy, retry};

/// How long a request waits for a pooled connection before giving up.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

const CREATE_TABLE: &str = "
	CREATE TABLE IF NOT EXISTS ping_counter (
		id    SMALLINT PRIMARY KEY DEFAULT 1 CHECK (id = 1),
		count BIGINT   NOT NULL DEFAULT 0
	)
";

const INSERT_COUNTER: &str = "
	INSERT INTO ping_counter (id, count)
	VALUES ($1, 0)
	ON CONFLICT (id) DO NOTHING
";

/// Errors that can occur while preparing the database.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
	#[error("failed to connect to database after {attempts} attempts: {source}")]
	Connect {
		attempts: NonZero<u32>,
		source: sqlx::Error,
	},

	#[error("failed to create counter table: {0}")]
	CreateTable(#[source] sqlx::Error),

	#[error("failed to initialize counter: {0}")]
	InitializeCounter(#[source] sqlx::Error),
}

/// Verifies that the database answers and opens a connection pool.
///
/// Every attempt is a single connection that is pinged and closed again.
/// Failed attempts are retried according to `policy`.
#[instrument(skip_all, fields(host = %config.host, database = %config.name), err)]
pub async fn connect(config: &DatabaseConfig, policy: RetryPolicy) -> Result<PgPool, BootstrapError> {
	let options = config.connect_options();

	retry(policy, |attempt| {
		let options = &options;

		async move {
			debug!(attempt, "connecting to database");

			let mut conn = PgConnection::connect_with(options).await?;
			conn.ping().await?;
			conn.close().await?;

			Ok::<_, sqlx::Error>(())
		}
	})
	.await
	.map_err(|source| BootstrapError::Connect { attempts: policy.attempts, source })?;

	info!("connected to database");

	Ok(open_pool(config))
}

/// Creates a connection pool without connecting.
///
/// Acquiring a connection fails after [`ACQUIRE_TIMEOUT`].
pub fn open_pool(config: &DatabaseConfig) -> PgPool {
	PgPoolOptions::new()
		.acquire_timeout(ACQUIRE_TIMEOUT)
		.connect_lazy_with(config.connect_options())
}

/// Creates the counter table and its row if they do not exist yet.
#[instrument(skip_all, err)]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), BootstrapError> {
	sqlx::query(CREATE_TABLE)
		.execute(pool)
		.await
		.map_err(BootstrapError::CreateTable)?;

	let inserted = sqlx::query(INSERT_COUNTER)
		.bind(COUNTER_ID)
		.execute(pool)
		.await
		.map_err(BootstrapError::InitializeCounter)?
		.rows_affected();

	if inserted > 0 {
		info!("initialized counter at 0");
	}

	Ok(())
}
