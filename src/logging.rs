//! Global logger setup for the binary and the test suites.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Render-stack crates that are chatty at info level.
const QUIET_CRATES: [(&str, LevelFilter); 3] = [
    ("wgpu", LevelFilter::Error),
    ("wgpu_hal", LevelFilter::Error),
    ("naga", LevelFilter::Warn),
];

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    QUIET_CRATES
        .iter()
        .fold(level.to_string().to_lowercase(), |filter, (name, quiet)| {
            format!("{filter},{name}={}", quiet.to_string().to_lowercase())
        })
}

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output and
/// the default is info level and above, with the GPU crates held quieter.
/// Bevy's own `LogPlugin` must stay disabled so this is the only global
/// logger.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_the_base_level_only() {
        assert_eq!(
            default_filter(false),
            "info,wgpu=error,wgpu_hal=error,naga=warn"
        );
        assert!(default_filter(true).starts_with("debug,wgpu=error"));
    }

    #[test]
    fn init_is_repeatable() {
        init(false);
        init(true);
    }
}
