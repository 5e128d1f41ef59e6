//! Middlewares wrapped around every service's router.

pub mod catch_panic;
pub mod request_id;
pub mod trace;
