//! Console logging for the SuiNS tools
//!
//! Installs a `tracing-subscriber` fmt subscriber writing to stderr, so the
//! transactions printed on stdout stay machine readable. `RUST_LOG` takes
//! precedence over the built-in level.

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info";
const DEBUG_DIRECTIVES: &str = "info,suins_tools=debug,suins_core=debug";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}

/// Install the global subscriber. Calling it again is a no-op.
///
/// # Errors
///
/// Returns `LoggingError::Filter` if `RUST_LOG` holds an invalid directive.
pub fn init(debug: bool) -> Result<(), LoggingError> {
    let filter = build_filter(debug, std::env::var("RUST_LOG").ok().as_deref())?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if !installed {
        debug!("tracing subscriber already installed");
    }
    Ok(())
}

fn build_filter(debug: bool, rust_log: Option<&str>) -> Result<EnvFilter, LoggingError> {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => Ok(EnvFilter::try_new(directives)?),
        _ if debug => Ok(EnvFilter::try_new(DEBUG_DIRECTIVES)?),
        _ => Ok(EnvFilter::try_new(DEFAULT_DIRECTIVES)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = build_filter(false, None).unwrap();
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_debug_filter_targets_our_crates() {
        let filter = build_filter(true, None).unwrap().to_string();
        assert!(filter.contains("suins_tools=debug"));
        assert!(filter.contains("suins_core=debug"));
    }

    #[test]
    fn test_rust_log_wins() {
        let filter = build_filter(true, Some("warn")).unwrap();
        assert_eq!(filter.to_string(), "warn");

        let blank = build_filter(false, Some("  ")).unwrap();
        assert_eq!(blank.to_string(), "info");
    }

    #[test]
    fn test_invalid_directive() {
        assert!(build_filter(false, Some("suins_tools=loud")).is_err());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        assert!(init(false).is_ok());
        assert!(init(true).is_ok());
    }
}
