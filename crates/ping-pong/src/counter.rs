//! The ping counter.
//!
//! The count lives in the only row of the `ping_counter` table. That row is
//! addressed by a fixed key, and a `CHECK` constraint on the table prevents a
//! second one from ever existing. Increments are a single
//! `UPDATE ... RETURNING` statement, so concurrent callers are serialized by
//! the database and never lose an update.

use sqlx::{Connection, PgPool};

/// Primary key of the counter row.
pub(crate) const COUNTER_ID: i16 = 1;

/// Errors returned by a [`CounterStore`].
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
	/// The counter row does not exist, i.e. the schema was never initialized.
	#[error("counter row does not exist")]
	MissingRow,

	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// Storage for the ping counter.
pub trait CounterStore: Clone + Send + Sync + 'static {
	/// Atomically increments the counter and returns the new value.
	fn increment(&self) -> impl Future<Output = Result<i64, CounterError>> + Send;

	/// Returns the current value without modifying it.
	fn read(&self) -> impl Future<Output = Result<i64, CounterError>> + Send;

	/// Checks whether the store is reachable.
	fn ping(&self) -> impl Future<Output = Result<(), CounterError>> + Send;
}

/// A [`CounterStore`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgCounterStore {
	pool: PgPool,
}

impl PgCounterStore {
	/// Creates a new [`PgCounterStore`].
	///
	/// The schema is expected to exist already; see
	/// [`ensure_schema()`](crate::database::ensure_schema).
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

impl CounterStore for PgCounterStore {
	#[instrument(level = "debug", skip(self), ret, err)]
	async fn increment(&self) -> Result<i64, CounterError> {
		sqlx::query_scalar::<_, i64>(
			"UPDATE ping_counter
			 SET count = count + 1
			 WHERE id = $1
			 RETURNING count",
		)
		.bind(COUNTER_ID)
		.fetch_optional(&self.pool)
		.await?
		.ok_or(CounterError::MissingRow)
	}

	#[instrument(level = "debug", skip(self), ret, err)]
	async fn read(&self) -> Result<i64, CounterError> {
		sqlx::query_scalar::<_, i64>("SELECT count FROM ping_counter WHERE id = $1")
			.bind(COUNTER_ID)
			.fetch_optional(&self.pool)
			.await?
			.ok_or(CounterError::MissingRow)
	}

	#[instrument(level = "debug", skip(self), err)]
	async fn ping(&self) -> Result<(), CounterError> {
		let mut conn = self.pool.acquire().await?;
		conn.ping().await?;

		Ok(())
	}
}
