//! # hooklog
//!
//! Colorized per-request latency logging for a minimal HTTP framework.
//!
//! Every request walks three lifecycle points: *before handle*, *after
//! handle* and *on error*. The [`Logger`] middleware hooks into all three: it
//! stamps the start time on entry and, on whichever exit fires, prints one
//! line with the method, path, status and elapsed time:
//!
//! ```text
//! ✔ GET /health 200 ❘ 512.3µs
//! [10.0.0.5] ✗ POST /users Error 400 validation failed ❘ 2.1ms
//! ```
//!
//! The logger only observes. Errors reach the client exactly as the handler
//! raised them.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hooklog::{HttpError, Logger, Method, Request, Response, Router, Server, StatusCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hooklog::Error> {
//!     let app = Router::new()
//!         .with(Logger::new())
//!         .on(Method::GET,  "/users/{id}", get_user)
//!         .on(Method::POST, "/users",      create_user);
//!
//!     Server::bind("0.0.0.0:3000")?.serve(app).await
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#))
//! }
//!
//! async fn create_user(req: Request) -> Result<Response, HttpError> {
//!     if req.body().is_empty() {
//!         return Err(HttpError::with_status(StatusCode::BAD_REQUEST, "validation failed"));
//!     }
//!     Ok(Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/users/99")
//!         .json(r#"{"id":"99"}"#))
//! }
//! ```

mod context;
mod error;
mod handler;
mod hooks;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;

pub use context::{Context, Store};
pub use error::{Error, HttpError};
pub use handler::{Handler, HandlerOutput};
pub use hooks::{Hooks, Middleware};
pub use http::{Method, StatusCode};
pub use middleware::logger::Logger;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
