use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use dashmap::DashMap;

use crate::{
    dispatcher::MethodCallHandler,
    message::{Invocation, MethodResponse},
};

/// Wraps a handler and counts how often each method reached it.
///
/// Clones share the counters, so keep one clone and register the other.
pub struct CountingHandler<H> {
    inner: Arc<H>,
    total: Arc<AtomicUsize>,
    per_method: Arc<DashMap<String, usize>>,
}

impl<H> Clone for CountingHandler<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            total: Arc::clone(&self.total),
            per_method: Arc::clone(&self.per_method),
        }
    }
}

impl<H: MethodCallHandler> CountingHandler<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner: Arc::new(inner),
            total: Arc::new(AtomicUsize::new(0)),
            per_method: Arc::new(DashMap::new()),
        }
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn calls(&self, method: &str) -> usize {
        self.per_method.get(method).map(|c| *c).unwrap_or(0)
    }
}

impl<H: MethodCallHandler> MethodCallHandler for CountingHandler<H> {
    fn handle(&self, invocation: &Invocation) -> MethodResponse {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.per_method.entry(invocation.method.clone()).or_insert(0) += 1;
        self.inner.handle(invocation)
    }
}
