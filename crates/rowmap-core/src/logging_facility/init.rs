//! Global subscriber setup for the CLI and tests

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output style of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "rowmap=debug",
            Profile::Production => "rowmap=info",
            Profile::Test => "off",
        }
    }
}

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has an effect. Development and Production write to
/// stderr, filtered by `RUST_LOG` or [`Profile::default_directive`];
/// Production emits one JSON object per event. Test installs a bare
/// registry, see `test_capture::init_test_capture` for assertions.
///
/// ```
/// use rowmap_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let fmt = tracing_subscriber::fmt()
            .with_env_filter(env_filter(profile))
            .with_writer(std::io::stderr);
        match profile {
            Profile::Development => fmt.finish().init(),
            Profile::Production => fmt.json().finish().init(),
            Profile::Test => tracing_subscriber::registry().init(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Test);
    }

    #[test]
    fn test_production_logs_less_than_development() {
        assert_eq!(Profile::Development.default_directive(), "rowmap=debug");
        assert_eq!(Profile::Production.default_directive(), "rowmap=info");
        assert_eq!(Profile::Test.default_directive(), "off");
    }
}
