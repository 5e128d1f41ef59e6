//! Reading configuration values from the environment.
//!
//! Services build their configuration structs exactly once on startup. The
//! values are looked up through an [`EnvSource`], which is the process
//! environment in production and a plain map in tests.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Something we can look up configuration variables in.
pub trait EnvSource {
	/// Returns the value of `var`, if it is set.
	fn var(&self, var: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
	fn var(&self, var: &str) -> Option<String> {
		env::var(var).ok()
	}
}

impl<K, V, S> EnvSource for HashMap<K, V, S>
where
	K: std::borrow::Borrow<str> + std::hash::Hash + Eq,
	V: AsRef<str>,
	S: std::hash::BuildHasher,
{
	fn var(&self, var: &str) -> Option<String> {
		self.get(var).map(|value| String::from(value.as_ref()))
	}
}

impl<const N: usize> EnvSource for [(&str, &str); N] {
	fn var(&self, var: &str) -> Option<String> {
		self.iter()
			.find(|&&(name, _)| name == var)
			.map(|&(_, value)| String::from(value))
	}
}

/// Errors that can occur while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A required variable was not set.
	#[error("${0} must be set")]
	Missing(&'static str),

	/// A required variable was set to an empty string.
	#[error("${0} cannot be empty")]
	Empty(&'static str),

	/// A variable could not be parsed into the required type.
	#[error("failed to parse ${var}: {source}")]
	Parse {
		var: &'static str,
		source: Box<dyn std::error::Error + Send + Sync + 'static>,
	},
}

/// Reads and parses a required variable.
pub fn required<T>(env: &impl EnvSource, var: &'static str) -> Result<T, ConfigError>
where
	T: FromStr<Err: std::error::Error + Send + Sync + 'static>,
{
	optional(env, var)?.ok_or_else(|| match env.var(var) {
		Some(_) => ConfigError::Empty(var),
		None => ConfigError::Missing(var),
	})
}

/// Reads and parses an optional variable.
///
/// Returns [`None`] if the variable does not exist or is empty.
pub fn optional<T>(env: &impl EnvSource, var: &'static str) -> Result<Option<T>, ConfigError>
where
	T: FromStr<Err: std::error::Error + Send + Sync + 'static>,
{
	let Some(value) = env.var(var) else {
		return Ok(None);
	};

	if value.is_empty() {
		return Ok(None);
	}

	value
		.parse::<T>()
		.map(Some)
		.map_err(|error| ConfigError::Parse { var, source: Box::new(error) })
}

#[cfg(test)]
mod tests {
	use std::net::IpAddr;

	use super::*;

	#[test]
	fn missing_variable_is_reported_by_name() {
		let env = [("PORT", "8080")];
		let error = required::<String>(&env, "VERSION").unwrap_err();

		assert!(matches!(error, ConfigError::Missing("VERSION")));
		assert_eq!(error.to_string(), "$VERSION must be set");
	}

	#[test]
	fn empty_required_variable_is_rejected() {
		let env = [("VERSION", "")];
		let error = required::<String>(&env, "VERSION").unwrap_err();

		assert!(matches!(error, ConfigError::Empty("VERSION")));
	}

	#[test]
	fn unparsable_variable_is_rejected() {
		let env = [("PORT", "eighty")];
		let error = required::<u16>(&env, "PORT").unwrap_err();

		assert!(matches!(error, ConfigError::Parse { var: "PORT", .. }));
	}

	#[test]
	fn optional_treats_empty_as_unset() {
		let env = [("POSTGRES_PORT", "")];

		assert_eq!(optional::<u16>(&env, "POSTGRES_PORT").unwrap(), None);
		assert_eq!(optional::<u16>(&env, "NOT_THERE").unwrap(), None);
	}

	#[test]
	fn hash_maps_work_as_sources() {
		let env = HashMap::from([("HOST", "127.0.0.1")]);
		let host = required::<IpAddr>(&env, "HOST").unwrap();

		assert!(host.is_loopback());
	}
}
