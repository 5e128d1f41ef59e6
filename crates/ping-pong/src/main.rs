//! The ping-pong service binary.

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

use clap::Parser;
use color_eyre::eyre::WrapErr;
use service_runtime::ProcessEnv;
use service_runtime::cli::RuntimeArgs;
use service_runtime::logging::{self, TracingConfig};

/// Ping-pong service
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
	#[command(flatten)]
	runtime: RuntimeArgs,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let cli = Cli::parse();
	cli.runtime.load_env_file().wrap_err("load `.env` file")?;

	let tracing_config = TracingConfig::from_env(&ProcessEnv, ping_pong::DEFAULT_LOG_DIRECTIVES)
		.wrap_err("load tracing config")?;

	logging::init(&tracing_config).wrap_err("initialize tracing")?;
	service_runtime::panic_hook::install();

	let config = ping_pong::Config::from_env().wrap_err("load config")?;

	ping_pong::run(&config, &tracing_config)
		.await
		.wrap_err("run ping-pong")?;

	Ok(())
}
