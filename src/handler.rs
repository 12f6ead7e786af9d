//! Handler trait and type erasure.
//!
//! The router stores handlers of different concrete types side by side, so
//! each one is wrapped once at registration and kept as a trait object:
//!
//! ```text
//! async fn hello(req: Request) -> Response { … }   ← user writes this
//!        ↓ router.on(Method::GET, "/", hello)
//! Arc::new(FnHandler(hello))                       ← stored as BoxedHandler
//!        ↓ handler.call(req) per request
//! Box::pin(async { hello(req).await.into_result() })
//! ```
//!
//! Per request that is one `Arc` clone and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::HttpError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

pub(crate) type BoxFuture =
    Pin<Box<dyn Future<Output = Result<Response, HttpError>> + Send + 'static>>;

#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── HandlerOutput ─────────────────────────────────────────────────────────────

/// What a handler may return.
///
/// A plain response value always takes the `after_handle` path. A `Result`
/// takes `on_error` when it is `Err`:
///
/// ```rust
/// use hooklog::{HttpError, Request, Response, StatusCode};
///
/// async fn create_user(req: Request) -> Result<Response, HttpError> {
///     if req.body().is_empty() {
///         return Err(HttpError::with_status(StatusCode::BAD_REQUEST, "empty body"));
///     }
///     Ok(Response::status(StatusCode::CREATED))
/// }
/// ```
pub trait HandlerOutput {
    fn into_result(self) -> Result<Response, HttpError>;
}

macro_rules! infallible_output {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HandlerOutput for $ty {
                fn into_result(self) -> Result<Response, HttpError> {
                    Ok(self.into_response())
                }
            }
        )*
    };
}

infallible_output!(Response, &'static str, String, http::StatusCode);

impl<T, E> HandlerOutput for Result<T, E>
where
    T: IntoResponse,
    E: Into<HttpError>,
{
    fn into_result(self) -> Result<Response, HttpError> {
        self.map(IntoResponse::into_response).map_err(Into::into)
    }
}

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler:
///
/// ```text
/// async fn name(req: Request) -> impl HandlerOutput
/// ```
///
/// Sealed: only the blanket impl below satisfies it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: HandlerOutput + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: HandlerOutput + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: HandlerOutput + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_result() })
    }
}
