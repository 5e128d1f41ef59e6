//! Plumbing shared by every service in the ping-pong chain.
//!
//! Each binary reads its configuration from the environment, initializes
//! tracing, installs a panic hook, and serves an [`axum::Router`] wrapped in
//! the same middleware stack. None of that differs between services, so it
//! lives here.

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

#[macro_use]
extern crate tracing;

pub mod cli;
pub mod env;
pub mod http;
pub mod logging;
pub mod panic_hook;
pub mod signals;

pub use env::{ConfigError, EnvSource, ProcessEnv};
