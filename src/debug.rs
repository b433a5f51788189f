//! Logging utilities
//!
//! Provides build logging that respects the global `--quiet` and `--debug`
//! flags. Verbosity is set once at startup; before that, `info!` lines are
//! printed and `debug!` lines are not.

use std::sync::OnceLock;

static VERBOSITY: OnceLock<Verbosity> = OnceLock::new();

/// How much the build talks on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Only failures and failure diagnostics
    Quiet,
    /// Progress lines (`info!`)
    #[default]
    Normal,
    /// Progress lines plus command lines and captured tool output (`debug!`)
    Debug,
}

impl Verbosity {
    /// Derive verbosity from the CLI flags. `--debug` wins over `--quiet`.
    #[must_use]
    pub const fn from_flags(quiet: bool, debug: bool) -> Self {
        if debug {
            Self::Debug
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }
}

/// Initialize verbosity from command-line flags
pub fn init_verbosity(verbosity: Verbosity) {
    let _ = VERBOSITY.set(verbosity);
}

/// Current verbosity (defaults to [`Verbosity::Normal`])
pub fn verbosity() -> Verbosity {
    VERBOSITY.get().copied().unwrap_or_default()
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    verbosity() >= Verbosity::Debug
}

/// Check if progress lines should be printed
pub fn is_info_enabled() -> bool {
    verbosity() >= Verbosity::Normal
}

/// Print a debug message if debug mode is enabled
pub fn debug_log(message: &str) {
    if is_debug_enabled() {
        eprintln!("[DEBUG] {message}");
    }
}

/// Macro for progress logging
///
/// Usage: `info!("Removing everything under: {}", path.display())`
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if $crate::debug::is_info_enabled() {
            eprintln!("ryml-build: {}", format_args!($($arg)*));
        }
    };
}

/// Macro for failure diagnostics, printed regardless of verbosity
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!("ryml-build: {}", format_args!($($arg)*))
    };
}

/// Macro for convenient debug logging
///
/// Usage: `debug!("message with {}", variable)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[DEBUG] {}", format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins_over_quiet() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Debug);
    }
}
