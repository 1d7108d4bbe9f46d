//! Execution context: build-once configuration cache.
//!
//! # Responsibilities
//! - Load configuration from a `ConfigSource` on first use
//! - Compile handler-specific state (redirect index, credentials) from it
//! - Hand the same immutable snapshot to every later invocation
//!
//! # Design Decisions
//! - Config and compiled state live in one cell: both or neither
//! - `OnceCell::get_or_try_init` serializes concurrent first builds; the
//!   loader runs once per successful build
//! - A failed build leaves the cell empty; the failing invocation gets the
//!   error and the next one retries

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::{ConfigError, ConfigSource, EdgeConfig};
use crate::observability::metrics;

/// State derived once from a validated configuration.
pub trait Compile: Sized + Send + Sync {
    fn compile(config: &EdgeConfig) -> Result<Self, ConfigError>;
}

/// Configuration together with the state compiled from it.
#[derive(Debug)]
pub struct Loaded<T> {
    pub config: EdgeConfig,
    pub compiled: T,
}

/// Long-lived context shared by all invocations of one handler instance.
pub struct ExecutionContext<T> {
    source: Arc<dyn ConfigSource>,
    state: OnceCell<Arc<Loaded<T>>>,
}

impl<T: Compile> ExecutionContext<T> {
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            source,
            state: OnceCell::new(),
        }
    }

    /// The cached snapshot, building it on first call.
    pub fn get(&self) -> Result<Arc<Loaded<T>>, ConfigError> {
        self.state.get_or_try_init(|| self.build()).map(Arc::clone)
    }

    /// Whether a snapshot has been built.
    pub fn is_loaded(&self) -> bool {
        self.state.get().is_some()
    }

    fn build(&self) -> Result<Arc<Loaded<T>>, ConfigError> {
        let result = self
            .source
            .load()
            .and_then(|config| T::compile(&config).map(|compiled| Loaded { config, compiled }));

        match result {
            Ok(loaded) => {
                metrics::record_config_load("ok");
                tracing::debug!(
                    redirects = loaded.config.redirects.len(),
                    allow_omit_html_extension = loaded.config.allow_omit_html_extension,
                    response_headers = loaded.config.response_headers.len(),
                    credentials = loaded.config.basic_auth_username.is_some(),
                    "Configuration loaded"
                );
                Ok(Arc::new(loaded))
            }
            Err(e) => {
                metrics::record_config_load("error");
                tracing::error!(error = %e, "Failed to load configuration");
                Err(e)
            }
        }
    }
}

impl<T> std::fmt::Debug for ExecutionContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("loaded", &self.state.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Counts `load` calls; fails while `fail` is set.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: Mutex<bool>,
    }

    impl ConfigSource for CountingSource {
        fn load(&self) -> Result<EdgeConfig, ConfigError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail.lock().unwrap() {
                return Err(ConfigError::MissingField("redirects"));
            }
            Ok(EdgeConfig::default())
        }
    }

    struct RuleCount(usize);

    impl Compile for RuleCount {
        fn compile(config: &EdgeConfig) -> Result<Self, ConfigError> {
            Ok(RuleCount(config.redirects.len()))
        }
    }

    #[derive(Debug)]
    struct AlwaysFails;

    impl Compile for AlwaysFails {
        fn compile(_config: &EdgeConfig) -> Result<Self, ConfigError> {
            Err(ConfigError::MissingField("basic_auth_username"))
        }
    }

    fn counting(fail: bool) -> (Arc<AtomicUsize>, CountingSource) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: calls.clone(),
            fail: Mutex::new(fail),
        };
        (calls, source)
    }

    #[test]
    fn test_builds_once() {
        let (calls, source) = counting(false);
        let context: ExecutionContext<RuleCount> = ExecutionContext::new(source);
        assert!(!context.is_loaded());

        let first = context.get().unwrap();
        let second = context.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.compiled.0, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(context.is_loaded());
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Arc::new(CountingSource {
            calls: calls.clone(),
            fail: Mutex::new(true),
        });
        let context: ExecutionContext<RuleCount> = ExecutionContext::from_shared(source.clone());

        assert!(context.get().is_err());
        assert!(!context.is_loaded());

        *source.fail.lock().unwrap() = false;
        assert!(context.get().is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_compile_failure_leaves_context_empty() {
        let (_, source) = counting(false);
        let context: ExecutionContext<AlwaysFails> = ExecutionContext::new(source);

        let err = context.get().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("basic_auth_username")));
        assert!(!context.is_loaded());
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let (calls, source) = counting(false);
        let context: Arc<ExecutionContext<RuleCount>> = Arc::new(ExecutionContext::new(source));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let context = context.clone();
                std::thread::spawn(move || context.get().map(|_| ()).is_ok())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
