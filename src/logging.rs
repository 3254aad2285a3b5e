use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Map `-v`/`-q` counts to a level. Warnings are shown by default.
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> Option<Level> {
    if quiet {
        return None;
    }
    Some(match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    })
}

/// Install a stderr subscriber. `RUST_LOG` overrides the level from flags;
/// stdout is left to program output.
pub fn init(level: Option<Level>) {
    let fallback = match level {
        Some(level) => EnvFilter::new(format!("bftape={level}")),
        None => EnvFilter::new("off"),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or(fallback);

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_from_verbosity(0, false), Some(Level::WARN));
        assert_eq!(level_from_verbosity(1, false), Some(Level::INFO));
        assert_eq!(level_from_verbosity(2, false), Some(Level::DEBUG));
        assert_eq!(level_from_verbosity(9, false), Some(Level::TRACE));
        assert_eq!(level_from_verbosity(3, true), None);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Some(Level::WARN));
        init(None);
    }
}
