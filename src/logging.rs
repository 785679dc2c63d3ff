// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a level.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global stderr subscriber. `RUST_LOG` takes precedence over
/// the verbosity level. Calling this more than once is a no-op.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(level_for_verbosity(verbosity).into())
    });

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
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), LevelFilter::WARN);
        assert_eq!(level_for_verbosity(1), LevelFilter::INFO);
        assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
        assert_eq!(level_for_verbosity(3), LevelFilter::TRACE);
        assert_eq!(level_for_verbosity(200), LevelFilter::TRACE);
    }

    #[test]
    fn test_init_twice() {
        init(1);
        init(2);
    }
}
