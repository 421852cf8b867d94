//! Error types for summary construction and queries.
//!
//! Construction errors are surfaced eagerly: a summary that cannot honor its
//! guarantee is rejected by [`Summary::new`](crate::Summary::new) rather than
//! misbehaving at the first insert. The only runtime error is querying a
//! summary that has seen no data, which is recoverable by the caller.

use std::fmt;

/// A rejected summary configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The compaction size was zero. Compression is triggered on a period of
    /// `compact_size` inserts, so the period must be at least one.
    ZeroCompactSize,
    /// The uniform error bound ε was outside the open interval (0, 1).
    EpsilonOutOfRange(f64),
    /// A targeted policy was constructed with no quantile targets. The
    /// targeted allowable-error function is undefined over an empty target
    /// set; use a uniform ε policy instead.
    EmptyTargets,
    /// A target's quantile was outside the open interval (0, 1).
    QuantileOutOfRange(f64),
    /// A target's error was outside the open interval (0, 1).
    ErrorOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCompactSize => {
                write!(f, "compaction size must be at least 1")
            }
            ConfigError::EpsilonOutOfRange(e) => {
                write!(f, "epsilon {} is outside the open interval (0, 1)", e)
            }
            ConfigError::EmptyTargets => {
                write!(f, "targeted policy requires at least one quantile target")
            }
            ConfigError::QuantileOutOfRange(q) => {
                write!(f, "target quantile {} is outside the open interval (0, 1)", q)
            }
            ConfigError::ErrorOutOfRange(e) => {
                write!(f, "target error {} is outside the open interval (0, 1)", e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A quantile query against a summary that has seen no observations.
///
/// There is no value to report and no sentinel that could be told apart from
/// a real observation. Callers recover by inserting data and querying again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptySummary;

impl fmt::Display for EmptySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "summary holds no samples; insert before querying")
    }
}

impl std::error::Error for EmptySummary {}
