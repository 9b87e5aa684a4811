//! `streamcc` summarizes a stream of edge insertions and deletions over a
//! fixed vertex set and answers approximate connected-components queries
//! against it, using an L0 linear sketch per vertex and a Borůvka-style
//! driver that contracts one sampled edge per component per round.

pub mod config;
pub mod connectivity;
pub mod dsu;
pub mod error;
pub mod hash;
pub mod pairing;
pub mod registry;
pub mod sketch;

pub use connectivity::{ConnectedComponents, Graph, SpanningForest};
pub use error::{ConfigError, SketchError};
pub use sketch::Sketch;
