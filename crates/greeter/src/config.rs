//! Greeter configuration.

use service_runtime::env::{self, ConfigError, EnvSource};

/// The greeter's configuration.
///
/// This is read from the environment once on startup.
#[derive(Debug, Clone)]
pub struct Config {
	/// `$PORT`: the port to listen on.
	pub port: u16,

	/// `$VERSION`: the version to greet with.
	pub version: Box<str>,
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
			version: env::required::<String>(env, "VERSION")?.into_boxed_str(),
		})
	}
}
