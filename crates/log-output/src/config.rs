//! Log-output configuration.

use std::path::PathBuf;

use service_runtime::env::{self, ConfigError, EnvSource};
use url::Url;

/// Where the information file is read from if `$INFORMATION_FILE` is not set.
pub const DEFAULT_INFORMATION_FILE: &str = "/usr/src/app/files/information.txt";

/// The log-output service's configuration.
///
/// This is read from the environment once on startup.
#[derive(Debug, Clone)]
pub struct Config {
	/// `$PORT`: the port to listen on.
	pub port: u16,

	/// `$PING_PONG_URL`: base URL of the ping-pong service.
	///
	/// Only scheme, host and port are used; the path is replaced.
	pub ping_pong_url: Url,

	/// `$GREETER_URL`: base URL of the greeter service.
	///
	/// Only scheme, host and port are used; the path is replaced.
	pub greeter_url: Url,

	/// `$MESSAGE`: echoed back in every response.
	pub message: Box<str>,

	/// `$INFORMATION_FILE`: a file whose content is included in every response.
	pub information_file: PathBuf,
}

impl Config {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_source(&service_runtime::ProcessEnv)
	}

	/// Reads the configuration from the given source.
	pub fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
		Ok(Self {
			port: env::required(env, "PORT")?,
			ping_pong_url: env::required(env, "PING_PONG_URL")?,
			message: env::required::<String>(env, "MESSAGE")?.into_boxed_str(),
			greeter_url: env::required(env, "GREETER_URL")?,
			information_file: env::optional(env, "INFORMATION_FILE")?
				.unwrap_or_else(|| PathBuf::from(DEFAULT_INFORMATION_FILE)),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ENV: [(&str, &str); 4] = [
		("PORT", "3000"),
		("PING_PONG_URL", "http://ping-pong-svc:2345"),
		("GREETER_URL", "http://greeter-svc:2346"),
		("MESSAGE", "hello world"),
	];

	#[test]
	fn reads_everything() {
		let config = Config::from_source(&ENV).unwrap();

		assert_eq!(config.port, 3000);
		assert_eq!(config.ping_pong_url.host_str(), Some("ping-pong-svc"));
		assert_eq!(config.greeter_url.port(), Some(2346));
		assert_eq!(&*config.message, "hello world");
		assert_eq!(config.information_file, PathBuf::from(DEFAULT_INFORMATION_FILE));
	}

	#[test]
	fn every_upstream_is_required() {
		for missing in ["PORT", "PING_PONG_URL", "GREETER_URL", "MESSAGE"] {
			let env = ENV
				.iter()
				.filter(|&&(name, _)| name != missing)
				.copied()
				.collect::<std::collections::HashMap<_, _>>();

			let error = Config::from_source(&env).unwrap_err();

			assert!(
				matches!(error, ConfigError::Missing(var) if var == missing),
				"expected {missing} to be reported, got {error}",
			);
		}
	}

	#[test]
	fn rejects_invalid_urls() {
		let mut env = ENV;
		env[1] = ("PING_PONG_URL", "not a url");

		let error = Config::from_source(&env).unwrap_err();

		assert!(matches!(error, ConfigError::Parse { var: "PING_PONG_URL", .. }));
	}
}
