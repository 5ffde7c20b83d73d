use itertools::Itertools;
use tracing_subscriber::{EnvFilter, fmt};

/// Library and binary targets that log, at one shared level.
const TARGETS: [&str; 3] = ["discrete_lab", "discrete_cli", "discrete_protocol"];

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .join(",")
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `verbose` when set.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_the_binaries() {
        let verbose = default_directives(true);
        assert!(verbose.contains("discrete_cli=debug"));
        assert!(verbose.contains("discrete_lab=debug"));
        assert!(default_directives(false).contains("discrete_cli=info"));
        assert!(verbose.parse::<EnvFilter>().is_ok());
    }
}
