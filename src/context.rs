//! Per-request state shared by the lifecycle hooks.
//!
//! The router creates one [`Context`] per request, before anything else runs,
//! and drops it once the response is built. Hooks borrow it mutably one at a
//! time; no other request can reach it.

use http::{HeaderMap, Method, StatusCode, Uri};

/// What the hooks of one request see: the request head, the response status
/// once one exists, and a typed scratch [`Store`].
pub struct Context {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    status: Option<StatusCode>,
    store: Store,
}

impl Context {
    pub(crate) fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self { method, uri, headers, status: None, store: Store::default() }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { self.uri.path() }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Every value of a possibly repeated header, joined with `", "` in the
    /// order received. Blank values are skipped; `None` when none are left.
    pub fn header_joined(&self, name: &str) -> Option<String> {
        let joined = self
            .headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        (!joined.is_empty()).then_some(joined)
    }

    /// The status of the response the handler produced. `None` until the
    /// handler has returned, and on the error path.
    pub fn status(&self) -> Option<StatusCode> { self.status }

    pub fn store(&self) -> &Store { &self.store }
    pub fn store_mut(&mut self) -> &mut Store { &mut self.store }

    pub(crate) fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

/// Typed scratch space, one value per type.
///
/// Inserting a value only replaces a previous value of the same type, so
/// independent middleware can keep their own keys side by side.
#[derive(Default)]
pub struct Store(http::Extensions);

impl Store {
    /// Inserts `value`, returning the previous value of the same type.
    pub fn insert<T: Clone + Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.0.insert(value)
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.0.get()
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.0.get::<T>().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct UserId(u64);

    #[derive(Clone, Debug, PartialEq)]
    struct Tenant(&'static str);

    fn context() -> Context {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.5".parse().unwrap());
        Context::new(Method::GET, Uri::from_static("/users/7?full=1"), headers)
    }

    #[test]
    fn header_lookup_ignores_case() {
        let ctx = context();
        assert_eq!(ctx.header("X-Forwarded-For"), Some("10.0.0.5"));
        assert_eq!(ctx.header("x-request-id"), None);
        assert_eq!(ctx.path(), "/users/7");
    }

    #[test]
    fn repeated_header_values_are_joined() {
        let mut ctx = context();
        ctx.headers.append("x-forwarded-for", "172.16.0.1".parse().unwrap());
        assert_eq!(ctx.header_joined("X-Forwarded-For").as_deref(), Some("10.0.0.5, 172.16.0.1"));
    }

    #[test]
    fn blank_header_values_read_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "".parse().unwrap());
        headers.append("x-forwarded-for", "  ".parse().unwrap());
        let ctx = Context::new(Method::GET, Uri::from_static("/"), headers);

        assert_eq!(ctx.header_joined("x-forwarded-for"), None);
        assert_eq!(ctx.header_joined("x-real-ip"), None);
    }

    #[test]
    fn store_keys_are_independent() {
        let mut ctx = context();
        ctx.store_mut().insert(UserId(7));
        ctx.store_mut().insert(Tenant("acme"));

        assert_eq!(ctx.store_mut().insert(UserId(8)), Some(UserId(7)));
        assert_eq!(ctx.store().get::<Tenant>(), Some(&Tenant("acme")));
        assert_eq!(ctx.store().get::<UserId>(), Some(&UserId(8)));
    }

    #[test]
    fn status_is_unset_until_recorded() {
        let mut ctx = context();
        assert_eq!(ctx.status(), None);
        ctx.set_status(StatusCode::ACCEPTED);
        assert_eq!(ctx.status(), Some(StatusCode::ACCEPTED));
    }
}
