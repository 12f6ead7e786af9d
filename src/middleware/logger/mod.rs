//! Colorized request logging.
//!
//! [`Logger`] times every routed request and prints one line when it ends:
//!
//! ```text
//! ✔ GET /health 200 ❘ 512.3µs
//! [10.0.0.5] ✗ POST /users Error 400 validation failed ❘ 2.1ms
//! ```
//!
//! Lines go to stdout, one write per request, so concurrent requests never
//! tear each other's lines. Colors follow the `colored` crate's rules:
//! `NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE` and terminal detection.
//!
//! A request the router rejects before its handler runs (unknown route, an
//! unreadable body) still gets an error line, just without a duration.

mod duration;
mod line;
mod palette;
mod timer;

use std::io::{self, Write};
use std::sync::Arc;

use tracing::warn;

use crate::context::Context;
use crate::error::HttpError;
use crate::hooks::{Hooks, Middleware};

pub use duration::{humanize, render_duration};
pub use line::{LogEvent, Outcome};
pub use palette::{render_method, render_status};
pub use timer::{Clock, StartedAt, SystemClock};

use timer::RequestTimer;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Where finished lines are written.
pub trait Sink: Send + Sync + 'static {
    /// Writes `line` plus a newline as one unit.
    fn write_line(&self, line: &str);
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line)
    }
}

/// Process stdout, written under its lock in a single call.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stdout;

impl Sink for Stdout {
    fn write_line(&self, line: &str) {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(buf.as_bytes()).and_then(|()| out.flush()) {
            warn!("failed to write request log line: {e}");
        }
    }
}

/// The request-logging middleware. Attach it with [`Router::with`](crate::Router::with).
///
/// ```rust
/// use hooklog::{Logger, Method, Request, Router};
///
/// let app = Router::new()
///     .with(Logger::new())
///     .on(Method::GET, "/health", |_req: Request| async { "ok" });
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

struct Inner {
    timer: RequestTimer,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Wall-clock timing, lines to stdout.
    pub fn new() -> Self {
        Self::custom(SystemClock, Stdout)
    }

    /// Uses `clock` for timestamps and `sink` for output.
    pub fn custom(clock: impl Clock, sink: impl Sink) -> Self {
        let inner = Inner {
            timer: RequestTimer::new(Arc::new(clock)),
            sink: Arc::new(sink),
        };
        Self { inner: Arc::new(inner) }
    }

    fn on_entry(&self, ctx: &mut Context) {
        self.inner.timer.on_entry(ctx);
    }

    fn on_success(&self, ctx: &Context) {
        let forwarded_for = ctx.header_joined(FORWARDED_FOR);
        let event = LogEvent {
            method: ctx.method().as_str(),
            path: ctx.path(),
            forwarded_for: forwarded_for.as_deref(),
            outcome: Outcome::Success { status: ctx.status().map(|s| s.as_u16()) },
            elapsed: self.inner.timer.on_exit(ctx),
        };
        self.inner.sink.write_line(&event.compose());
    }

    fn on_failure(&self, ctx: &Context, err: &HttpError) {
        let forwarded_for = ctx.header_joined(FORWARDED_FOR);
        let event = LogEvent {
            method: ctx.method().as_str(),
            path: ctx.path(),
            forwarded_for: forwarded_for.as_deref(),
            outcome: Outcome::Error {
                message: err.message(),
                status: err.status().map(|s| s.as_u16()),
            },
            elapsed: self.inner.timer.on_exit(ctx),
        };
        self.inner.sink.write_line(&event.compose());
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for Logger {
    fn install(self, hooks: &mut Hooks) {
        let (entry, success, failure) = (self.clone(), self.clone(), self);
        hooks
            .before_handle(move |ctx| entry.on_entry(ctx))
            .after_handle(move |ctx| success.on_success(ctx))
            .on_error(move |ctx, err| failure.on_failure(ctx, err));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use http::{HeaderMap, Method, StatusCode, Uri};

    use super::timer::tests::ManualClock;
    use super::*;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl Sink for Lines {
        fn write_line(&self, line: &str) {
            self.0.lock().unwrap().push(line.to_owned());
        }
    }

    fn context(forwarded_for: &[&'static str]) -> Context {
        let mut headers = HeaderMap::new();
        for ip in forwarded_for {
            headers.append("x-forwarded-for", ip.parse().unwrap());
        }
        Context::new(Method::GET, Uri::from_static("/health"), headers)
    }

    #[test]
    fn one_line_per_success() {
        let clock = ManualClock::new();
        let lines = Arc::new(Lines::default());
        let logger = Logger::custom(clock.clone(), lines.clone());
        let mut ctx = context(&["192.168.1.9"]);

        logger.on_entry(&mut ctx);
        clock.advance(Duration::from_micros(500));
        ctx.set_status(StatusCode::OK);
        logger.on_success(&ctx);

        let lines = lines.0.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("192.168.1.9"));
        assert!(lines[0].contains("/health"));
        assert!(lines[0].ends_with("500.0µs"));
    }

    #[test]
    fn failure_without_entry_has_no_duration() {
        let lines = Arc::new(Lines::default());
        let logger = Logger::custom(ManualClock::new(), lines.clone());
        let ctx = context(&[]);

        logger.on_failure(&ctx, &HttpError::not_found());

        let lines = lines.0.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Not Found"));
        assert!(!lines[0].contains('❘'));
    }

    #[test]
    fn blank_forwarded_for_leaves_no_tag() {
        let lines = Arc::new(Lines::default());
        let logger = Logger::custom(ManualClock::new(), lines.clone());
        let mut ctx = context(&[""]);

        logger.on_entry(&mut ctx);
        ctx.set_status(StatusCode::OK);
        logger.on_success(&ctx);

        let lines = lines.0.lock().unwrap();
        assert!(!lines[0].starts_with('['), "{}", lines[0]);
        assert!(!lines[0].contains("[]"));
        assert!(lines[0].contains("GET"));
    }

    #[test]
    fn proxy_chain_is_logged_in_full() {
        let lines = Arc::new(Lines::default());
        let logger = Logger::custom(ManualClock::new(), lines.clone());
        let ctx = context(&["203.0.113.7", "10.0.0.5"]);

        logger.on_failure(&ctx, &HttpError::not_found());

        let lines = lines.0.lock().unwrap();
        assert!(lines[0].contains("203.0.113.7, 10.0.0.5"), "{}", lines[0]);
    }
}
