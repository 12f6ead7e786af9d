//! Request timing through the per-request store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::context::Context;

/// Source of monotonic timestamps.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Store key holding the moment the request entered its handler chain.
#[derive(Clone, Copy, Debug)]
pub struct StartedAt(pub Instant);

pub(crate) struct RequestTimer {
    clock: Arc<dyn Clock>,
}

impl RequestTimer {
    pub(crate) fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Records the start time. A start time that is already present is kept.
    pub(crate) fn on_entry(&self, ctx: &mut Context) {
        if !ctx.store().contains::<StartedAt>() {
            ctx.store_mut().insert(StartedAt(self.clock.now()));
        }
    }

    /// Time since [`on_entry`](Self::on_entry), or `None` when it never ran
    /// for this request.
    pub(crate) fn on_exit(&self, ctx: &Context) -> Option<Duration> {
        let Some(&StartedAt(start)) = ctx.store().get::<StartedAt>() else {
            debug!(path = ctx.path(), "no start time recorded, skipping duration");
            return None;
        };
        Some(self.clock.now().saturating_duration_since(start))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use http::{HeaderMap, Method, Uri};

    use super::*;

    /// A clock that only moves when told to.
    pub(crate) struct ManualClock {
        base: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self { base: Instant::now(), offset: Mutex::new(Duration::ZERO) })
        }

        pub(crate) fn advance(&self, by: Duration) {
            *self.offset.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + *self.offset.lock().unwrap()
        }
    }

    fn context() -> Context {
        Context::new(Method::GET, Uri::from_static("/health"), HeaderMap::new())
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Session(&'static str);

    #[test]
    fn measures_between_entry_and_exit() {
        let clock = ManualClock::new();
        let timer = RequestTimer::new(clock.clone());
        let mut ctx = context();

        timer.on_entry(&mut ctx);
        clock.advance(Duration::from_micros(500));

        assert_eq!(timer.on_exit(&ctx), Some(Duration::from_micros(500)));
    }

    #[test]
    fn exit_without_entry_is_indeterminate() {
        let timer = RequestTimer::new(ManualClock::new());
        assert_eq!(timer.on_exit(&context()), None);
    }

    #[test]
    fn entry_keeps_other_store_keys() {
        let timer = RequestTimer::new(ManualClock::new());
        let mut ctx = context();
        ctx.store_mut().insert(Session("abc"));

        timer.on_entry(&mut ctx);

        assert_eq!(ctx.store().get::<Session>(), Some(&Session("abc")));
        assert!(ctx.store().contains::<StartedAt>());
    }

    #[test]
    fn second_entry_does_not_reset_the_start() {
        let clock = ManualClock::new();
        let timer = RequestTimer::new(clock.clone());
        let mut ctx = context();

        timer.on_entry(&mut ctx);
        clock.advance(Duration::from_millis(3));
        timer.on_entry(&mut ctx);
        clock.advance(Duration::from_millis(1));

        assert_eq!(timer.on_exit(&ctx), Some(Duration::from_millis(4)));
    }
}
