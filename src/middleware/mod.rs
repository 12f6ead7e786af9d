//! Built-in middleware.
//!
//! Middleware is a bundle of lifecycle hooks (see [`Middleware`](crate::Middleware))
//! attached to a [`Router`](crate::Router) with [`Router::with`](crate::Router::with).
//!
//! - [`logger`]: one colorized line per request with method, path, status
//!   and latency

pub mod logger;
