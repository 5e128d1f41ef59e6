use std::fmt;
use std::num::NonZero;
use std::time::Duration;

/// How often, and how patiently, to retry a fallible startup step.
///
/// The delay is fixed; there is no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total number of attempts, including the first one.
	pub attempts: NonZero<u32>,

	/// How long to sleep between two attempts.
	pub delay: Duration,
}

impl RetryPolicy {
	/// The number of attempts made by [`RetryPolicy::default()`].
	pub const DEFAULT_ATTEMPTS: NonZero<u32> = match NonZero::new(10) {
		Some(attempts) => attempts,
		None => unreachable!(),
	};

	/// The delay used by [`RetryPolicy::default()`].
	pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self { attempts: Self::DEFAULT_ATTEMPTS, delay: Self::DEFAULT_DELAY }
	}
}

/// Runs `op` until it succeeds or `policy.attempts` attempts have been made.
///
/// `op` receives the 1-based attempt number. The error of the last attempt is
/// returned. There is no sleep after the last attempt.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
	F: FnMut(u32) -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: fmt::Display,
{
	let attempts = policy.attempts.get();
	let mut attempt = 1;

	loop {
		match op(attempt).await {
			Ok(value) => return Ok(value),
			Err(error) if attempt < attempts => {
				warn!(
					%error,
					delay = ?policy.delay,
					"attempt {attempt}/{attempts} failed; retrying",
				);

				tokio::time::sleep(policy.delay).await;
				attempt += 1;
			}
			Err(error) => {
				error!(%error, "attempt {attempt}/{attempts} failed; giving up");
				return Err(error);
			}
		}
	}
}
