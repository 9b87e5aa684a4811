use std::fmt::{Display, Formatter};

/// Errors from the recovery layer (sketch construction, update, query,
/// merge). See `spec.md` §7 for the driver's treatment of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchError {
    /// Every bucket is the zero pair: the summarized vector is exactly
    /// zero, i.e. there are no outstanding incident edges.
    AllZero,
    /// Buckets are non-zero but none of them passed the recovery
    /// predicate this query. The caller should treat this as "no edge
    /// available from this sketch this round," not as a hard failure.
    NoGoodBucket,
    /// A second `query()` was issued against a sketch that already
    /// answered one. A programmer error: sketches are one-shot by
    /// construction (`spec.md` §4.2).
    RepeatedQuery,
    /// `merge`/`merge_into` was called on sketches whose `(n, seed, f)`
    /// parameters disagree. Also a programmer error.
    ParamMismatch,
}

impl Display for SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SketchError::AllZero => f.write_str("sketch vector is all-zero"),
            SketchError::NoGoodBucket => f.write_str("no bucket passed recovery this query"),
            SketchError::RepeatedQuery => f.write_str("sketch was already queried once"),
            SketchError::ParamMismatch => {
                f.write_str("merge requires identical (n, seed, f) parameters")
            }
        }
    }
}

impl std::error::Error for SketchError {}

/// Errors from loading the ambient system configuration (`spec.md` §6).
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => f.write_fmt(format_args!("io error: {}", err)),
            ConfigError::Parse(err) => f.write_fmt(format_args!("parse error: {}", err)),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parse(value)
    }
}
