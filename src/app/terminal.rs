//! Terminal capabilities, sampled once per run.

use std::io::{self, IsTerminal};

use crate::cli::Args;

/// Raw signals read from the environment and stderr.
#[derive(Debug, Clone, Copy, Default)]
struct Surroundings {
    no_color_env: bool,
    dumb: bool,
    stderr_tty: bool,
}

impl Surroundings {
    fn sample() -> Self {
        Self {
            no_color_env: std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()),
            dumb: std::env::var("TERM").is_ok_and(|value| value.eq_ignore_ascii_case("dumb")),
            stderr_tty: io::stderr().is_terminal(),
        }
    }
}

/// What the binary may draw on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TerminalProfile {
    pub(crate) color: bool,
    pub(crate) progress: bool,
}

impl TerminalProfile {
    pub(crate) fn detect(args: &Args) -> Self {
        Self::decide(args.no_color, args.quiet, Surroundings::sample())
    }

    /// `--no-color`, `NO_COLOR` and `TERM=dumb` each turn color off. The bar
    /// also needs an interactive stderr and no `--quiet`.
    fn decide(no_color_flag: bool, quiet: bool, env: Surroundings) -> Self {
        Self {
            color: !(no_color_flag || env.no_color_env || env.dumb),
            progress: env.stderr_tty && !quiet && !env.dumb,
        }
    }

    /// Installs the stderr subscriber. `RUST_LOG` wins over `default_level`.
    pub(crate) fn init_tracing(self, default_level: &str) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
        let _ = tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_ansi(self.color)
            .with_env_filter(filter)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTY: Surroundings = Surroundings {
        no_color_env: false,
        dumb: false,
        stderr_tty: true,
    };

    #[test]
    fn test_plain_tty_gets_color_and_progress() {
        let profile = TerminalProfile::decide(false, false, TTY);
        assert_eq!(
            profile,
            TerminalProfile {
                color: true,
                progress: true
            }
        );
    }

    #[test]
    fn test_any_color_signal_disables_color() {
        assert!(!TerminalProfile::decide(true, false, TTY).color);
        let env_opt_out = Surroundings { no_color_env: true, ..TTY };
        assert!(!TerminalProfile::decide(false, false, env_opt_out).color);
        // NO_COLOR alone leaves the bar alone
        assert!(TerminalProfile::decide(false, false, env_opt_out).progress);
    }

    #[test]
    fn test_dumb_terminal_loses_color_and_progress() {
        let dumb = Surroundings { dumb: true, ..TTY };
        let profile = TerminalProfile::decide(false, false, dumb);
        assert!(!profile.color);
        assert!(!profile.progress);
    }

    #[test]
    fn test_progress_needs_interactive_non_quiet_stderr() {
        assert!(!TerminalProfile::decide(false, true, TTY).progress);
        assert!(!TerminalProfile::decide(false, false, Surroundings::default()).progress);
    }
}
