//! Utilities for unit tests.

use std::net::{Ipv4Addr, TcpListener};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::config::DatabaseConfig;
use crate::counter::{CounterError, CounterStore};

/// Database settings pointing at a local port nothing listens on.
pub(crate) fn unreachable_database() -> anyhow::Result<DatabaseConfig> {
	let port = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?.local_addr()?.port();

	Ok(DatabaseConfig {
		host: Ipv4Addr::LOCALHOST.to_string(),
		port,
		user: String::from("pingpong"),
		password: None,
		name: String::from("pings"),
	})
}

/// An in-memory [`CounterStore`].
///
/// `None` models a missing counter row. The store can be made "unreachable"
/// to simulate a dropped database connection.
#[derive(Debug, Clone)]
pub(crate) struct MemoryCounterStore {
	count: Arc<Mutex<Option<i64>>>,
	reachable: Arc<AtomicBool>,
}

impl MemoryCounterStore {
	pub(crate) fn new(initial: i64) -> Self {
		Self {
			count: Arc::new(Mutex::new(Some(initial))),
			reachable: Arc::new(AtomicBool::new(true)),
		}
	}

	pub(crate) fn without_row() -> Self {
		Self {
			count: Arc::new(Mutex::new(None)),
			reachable: Arc::new(AtomicBool::new(true)),
		}
	}

	pub(crate) fn disconnect(&self) {
		self.reachable.store(false, Ordering::SeqCst);
	}

	fn check_reachable(&self) -> Result<(), CounterError> {
		if self.reachable.load(Ordering::SeqCst) {
			Ok(())
		} else {
			Err(CounterError::Database(sqlx::Error::PoolClosed))
		}
	}
}

impl CounterStore for MemoryCounterStore {
	async fn increment(&self) -> Result<i64, CounterError> {
		self.check_reachable()?;

		let mut count = self.count.lock().await;
		let count = count.as_mut().ok_or(CounterError::MissingRow)?;
		*count += 1;

		Ok(*count)
	}

	async fn read(&self) -> Result<i64, CounterError> {
		self.check_reachable()?;
		self.count.lock().await.ok_or(CounterError::MissingRow)
	}

	async fn ping(&self) -> Result<(), CounterError> {
		self.check_reachable()
	}
}
