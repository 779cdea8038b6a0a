//! `traceparent` extraction from incoming request headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// The caller's trace context, when the headers carry a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so a request without trace headers
        // never joins whatever span happens to be current.
        let context = propagator.extract_with_context(&Context::new(), &Headers(headers));
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

#[derive(Debug)]
struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
