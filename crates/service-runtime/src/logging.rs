//! Tracing initialization.

use std::io;
use std::str::FromStr;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer};

use crate::env::{self, ConfigError, EnvSource};

/// How log lines are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
	/// Human readable, multi-line output.
	#[default]
	Pretty,

	/// One JSON object per line.
	Json,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown log format `{0}`; expected `pretty` or `json`")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
	type Err = UnknownLogFormat;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"pretty" => Ok(Self::Pretty),
			"json" => Ok(Self::Json),
			_ => Err(UnknownLogFormat(String::from(value))),
		}
	}
}

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
	/// Output format of the stderr layer.
	pub format: LogFormat,

	/// Filter directives used if `RUST_LOG` is not set.
	pub default_directives: &'static str,

	/// Whether to include HTTP headers in request spans.
	pub include_http_headers: bool,
}

impl TracingConfig {
	/// Reads `LOG_FORMAT` and `LOG_HTTP_HEADERS`.
	pub fn from_env(
		env: &impl EnvSource,
		default_directives: &'static str,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			format: env::optional(env, "LOG_FORMAT")?.unwrap_or_default(),
			default_directives,
			include_http_headers: env::optional(env, "LOG_HTTP_HEADERS")?.unwrap_or(false),
		})
	}

	fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives))
	}
}

/// Installs the global tracing subscriber.
pub fn init(config: &TracingConfig) -> Result<(), TryInitError> {
	use tracing_subscriber::layer::SubscriberExt;
	use tracing_subscriber::util::SubscriberInitExt;

	let stderr = match config.format {
		LogFormat::Pretty => tracing_subscriber::fmt::layer()
			.pretty()
			.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
			.with_writer(io::stderr)
			.boxed(),
		LogFormat::Json => tracing_subscriber::fmt::layer()
			.json()
			.with_current_span(true)
			.with_span_list(false)
			.with_writer(io::stderr)
			.boxed(),
	};

	tracing_subscriber::registry()
		.with(stderr.with_filter(config.env_filter()))
		.try_init()?;

	info!(format = ?config.format, "initialized tracing");

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_log_formats() {
		assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
		assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
		assert!("xml".parse::<LogFormat>().is_err());
	}

	#[test]
	fn defaults_when_unset() {
		let config = TracingConfig::from_env(&[("PORT", "1")], "info").unwrap();

		assert_eq!(config.format, LogFormat::Pretty);
		assert!(!config.include_http_headers);
	}

	#[test]
	fn reads_overrides() {
		let env = [("LOG_FORMAT", "json"), ("LOG_HTTP_HEADERS", "true")];
		let config = TracingConfig::from_env(&env, "info").unwrap();

		assert_eq!(config.format, LogFormat::Json);
		assert!(config.include_http_headers);
	}
}
