//! Radix-tree request router and the per-request dispatch that drives the
//! lifecycle hooks.
//!
//! One tree per HTTP method. O(path-length) lookup.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use matchit::Router as MatchitRouter;

use crate::context::Context;
use crate::error::HttpError;
use crate::handler::{BoxedHandler, Handler};
use crate::hooks::{Hooks, Middleware};
use crate::request::Request;
use crate::response::Response;

/// The application: routes plus the hook chain that wraps every request.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Every registration returns `self` so calls chain:
///
/// ```rust
/// # use hooklog::{Logger, Method, Request, Response, Router};
/// # async fn get_user(_: Request) -> Response { Response::text("") }
/// # async fn create_user(_: Request) -> Response { Response::text("") }
/// let app = Router::new()
///     .with(Logger::new())
///     .on(Method::GET,  "/users/{id}", get_user)
///     .on(Method::POST, "/users",      create_user);
/// ```
#[derive(Default)]
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    hooks: Hooks,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a method + path pair. Path parameters use
    /// `{name}` syntax and are read back with [`Request::param`].
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this surfaces
    /// as soon as the binary runs.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Attaches a [`Middleware`], letting it register its hooks.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        middleware.install(&mut self.hooks);
        self
    }

    pub fn on_before_handle<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.hooks.before_handle(f);
        self
    }

    pub fn on_after_handle<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.hooks.after_handle(f);
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Context, &HttpError) + Send + Sync + 'static,
    {
        self.hooks.on_error(f);
        self
    }

    /// Dispatches one request through the hooks and its handler.
    ///
    /// A route miss is an error exit with `404`; the before hooks never ran
    /// for it.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let mut ctx = Context::new(parts.method.clone(), parts.uri.clone(), parts.headers.clone());

        let Some((handler, params)) = self.lookup(&parts.method, parts.uri.path()) else {
            return self.fail(&mut ctx, HttpError::not_found());
        };

        self.hooks.run_before(&mut ctx);

        match handler.call(Request::new(parts, body, params)).await {
            Ok(response) => {
                ctx.set_status(response.status_code());
                self.hooks.run_after(&mut ctx);
                response
            }
            Err(err) => self.fail(&mut ctx, err),
        }
    }

    /// Error exit for a request that never reached a handler.
    pub(crate) fn reject(&self, parts: http::request::Parts, err: HttpError) -> Response {
        let mut ctx = Context::new(parts.method, parts.uri, parts.headers);
        self.fail(&mut ctx, err)
    }

    fn fail(&self, ctx: &mut Context, err: HttpError) -> Response {
        self.hooks.run_error(ctx, &err);
        err.to_response()
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}
