//! Ping-pong configuration.

use std::fmt;

use service_runtime::env::{self, ConfigError, EnvSource};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Port used if `$PORT` is not set.
pub const DEFAULT_PORT: u16 = 3001;

/// Port used if `$POSTGRES_PORT` is not set.
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// The ping-pong service's configuration.
///
/// This is read from the environment once on startup.
#[derive(Debug, Clone)]
pub struct Config {
	/// `$PORT`: the port to listen on.
	pub port: u16,

	/// Where the counter lives.
	pub database: DatabaseConfig,
}

/// Connection parameters for PostgreSQL.
#[derive(Clone)]
pub struct DatabaseConfig {
	/// `$POSTGRES_HOST`
	pub host: String,

	/// `$POSTGRES_PORT`
	pub port: u16,

	/// `$POSTGRES_USER`
	pub user: String,

	/// `$POSTGRES_PASSWORD`
	pub password: Option<String>,

	/// `$POSTGRES_DB`
	pub name: String,
}

impl Config {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_source(&service_runtime::ProcessEnv)
	}

	/// Reads the configuration from the given source.
	pub fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
		Ok(Self {
			port: env::optional(env, "PORT")?.unwrap_or(DEFAULT_PORT),
			database: DatabaseConfig::from_source(env)?,
		})
	}
}

impl DatabaseConfig {
	/// Reads the `POSTGRES_*` variables from the given source.
	pub fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
		Ok(Self {
			host: env::required(env, "POSTGRES_HOST")?,
			port: env::optional(env, "POSTGRES_PORT")?.unwrap_or(DEFAULT_POSTGRES_PORT),
			user: env::required(env, "POSTGRES_USER")?,
			password: env::optional(env, "POSTGRES_PASSWORD")?,
			name: env::required(env, "POSTGRES_DB")?,
		})
	}

	/// Builds the driver's connect options. TLS is disabled.
	pub fn connect_options(&self) -> PgConnectOptions {
		let options = PgConnectOptions::new()
			.host(&self.host)
			.port(self.port)
			.username(&self.user)
			.database(&self.name)
			.ssl_mode(PgSslMode::Disable);

		match self.password.as_deref() {
			Some(password) => options.password(password),
			None => options,
		}
	}
}

impl fmt::Debug for DatabaseConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DatabaseConfig")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("user", &self.user)
			.field("password", &self.password.as_ref().map(|_| "*****"))
			.field("name", &self.name)
			.finish()
	}
}
