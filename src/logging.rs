//! Logging setup using the `tracing` ecosystem.
//!
//! Log lines go to stderr so they never interleave with rendered output on
//! stdout. `RUST_LOG` overrides the verbosity flags when set.

use tracing_subscriber::EnvFilter;

/// Picks the default filter directive for the given verbosity flags.
///
/// `verbose` wins over `quiet`.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "depviz=debug"
    } else if quiet {
        "depviz=error"
    } else {
        "depviz=info"
    }
}

/// Initialize the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "depviz=info");
        assert_eq!(default_directive(true, false), "depviz=debug");
        assert_eq!(default_directive(false, true), "depviz=error");
        assert_eq!(default_directive(true, true), "depviz=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false, true);
        init(true, false);
    }
}
