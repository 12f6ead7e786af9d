//! Lifecycle extension points.
//!
//! Every routed request walks the same three points:
//!
//! ```text
//!   route lookup ──miss──────────────────────────────┐
//!        │hit                                        │
//!   before_handle ─▶ handler ──Ok──▶ after_handle    │
//!                       │                            ▼
//!                       └──Err─────────────────▶ on_error
//! ```
//!
//! Exactly one of `after_handle` / `on_error` runs per request. Callbacks of
//! one point run in registration order.

use std::sync::Arc;

use crate::context::Context;
use crate::error::HttpError;

pub(crate) type BeforeHook = Arc<dyn Fn(&mut Context) + Send + Sync + 'static>;
pub(crate) type AfterHook = Arc<dyn Fn(&mut Context) + Send + Sync + 'static>;
pub(crate) type ErrorHook = Arc<dyn Fn(&mut Context, &HttpError) + Send + Sync + 'static>;

/// The registered callbacks of one application.
#[derive(Clone, Default)]
pub struct Hooks {
    before_handle: Vec<BeforeHook>,
    after_handle: Vec<AfterHook>,
    on_error: Vec<ErrorHook>,
}

impl Hooks {
    /// Runs before the handler, once the route matched.
    pub fn before_handle<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.before_handle.push(Arc::new(f));
        self
    }

    /// Runs after the handler returned a response, whatever its status.
    pub fn after_handle<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.after_handle.push(Arc::new(f));
        self
    }

    /// Runs instead of `after_handle` when the handler or the router failed.
    /// The error is only lent out; the response is built from it afterwards.
    pub fn on_error<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Context, &HttpError) + Send + Sync + 'static,
    {
        self.on_error.push(Arc::new(f));
        self
    }

    pub(crate) fn run_before(&self, ctx: &mut Context) {
        for hook in &self.before_handle {
            hook(ctx);
        }
    }

    pub(crate) fn run_after(&self, ctx: &mut Context) {
        for hook in &self.after_handle {
            hook(ctx);
        }
    }

    pub(crate) fn run_error(&self, ctx: &mut Context, err: &HttpError) {
        for hook in &self.on_error {
            hook(ctx, err);
        }
    }
}

/// A reusable bundle of hooks, attached with [`Router::with`](crate::Router::with).
///
/// ```rust
/// use hooklog::{Hooks, Middleware};
///
/// struct Audit;
///
/// impl Middleware for Audit {
///     fn install(self, hooks: &mut Hooks) {
///         hooks.on_error(|ctx, err| eprintln!("{} failed: {err}", ctx.path()));
///     }
/// }
/// ```
pub trait Middleware {
    fn install(self, hooks: &mut Hooks);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::{HeaderMap, Method, Uri};

    use super::*;

    fn context() -> Context {
        Context::new(Method::GET, Uri::from_static("/"), HeaderMap::new())
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = Hooks::default();
        for n in 0..3 {
            let seen = Arc::clone(&seen);
            hooks.before_handle(move |_| seen.lock().unwrap().push(n));
        }

        hooks.run_before(&mut context());
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn error_hooks_see_the_error_unchanged() {
        let seen = Arc::new(Mutex::new(None));
        let mut hooks = Hooks::default();
        let slot = Arc::clone(&seen);
        hooks.on_error(move |_, err| *slot.lock().unwrap() = Some(err.message().to_owned()));

        let err = HttpError::new("disk full");
        hooks.run_error(&mut context(), &err);

        assert_eq!(seen.lock().unwrap().as_deref(), Some("disk full"));
        assert_eq!(err.message(), "disk full");
    }
}
