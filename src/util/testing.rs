// src/util/testing.rs

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{ENV_HTTP_TIMEOUT_MS, ENV_SORT, ENV_SOURCE};

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    pub resources_dir: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            resources_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources"),
        }
    }
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes logging and the test paths exactly once.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        let data = TestEnv::new();
        setup_test_logging();
        info!("Test environment initialized: {:?}", data.resources_dir);
        data
    })
}

/// Absolute path of a file under `tests/resources`.
pub fn fixture_path(name: &str) -> PathBuf {
    init_test_env().resources_dir.join(name)
}

fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["reqwest", "mio", "want", "hyper_util", "rustls", "rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the `BMTREE_*` environment on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: [ENV_SOURCE, ENV_SORT, ENV_HTTP_TIMEOUT_MS]
                .into_iter()
                .map(|key| (key, env::var(key).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn given_test_env_when_fixture_path_then_fixture_exists() {
        assert!(fixture_path("bookmarks.json").exists());
    }

    #[test]
    #[serial]
    fn given_guard_when_dropped_then_env_restored() {
        env::remove_var(ENV_SORT);
        {
            let _guard = EnvGuard::new();
            env::set_var(ENV_SORT, "date");
        }
        assert!(env::var(ENV_SORT).is_err());
    }
}
