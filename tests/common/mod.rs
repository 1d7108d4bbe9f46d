//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use edge_gate::config::{ConfigError, ConfigSource, EdgeConfig, StaticSource};

/// Config source that counts how many times it was asked to load.
pub struct CountingSource {
    inner: StaticSource,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(config: EdgeConfig) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: StaticSource::new(config),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl ConfigSource for CountingSource {
    fn load(&self) -> Result<EdgeConfig, ConfigError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.load()
    }
}

/// Load counter value.
pub fn loads(calls: &AtomicUsize) -> usize {
    calls.load(Ordering::SeqCst)
}
