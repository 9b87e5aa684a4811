//! The Borůvka-style connectivity driver: repeatedly asks every current
//! super-node for one incident boundary edge via sketch recovery, unions
//! the endpoints it gets back, and stops when a round makes no progress.

use std::collections::BTreeSet;

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::dsu::UnionFind;
use crate::error::SketchError;
use crate::registry::VertexSketches;
use crate::sketch::Sketch;

/// Owns the per-component sketch cache and the union-find state, and
/// drives the Borůvka rounds described in `spec.md` §4.4.
///
/// `Graph` takes the "cached per-component sketch maintained
/// incrementally across rounds" option `spec.md` §4.4 names as
/// acceptable: `component_sketch[v]` starts as vertex `v`'s own sketch
/// and is merged into the surviving root's slot on every `union`, so a
/// round reads a ready-made sketch per root instead of re-merging every
/// member from scratch. [`crate::registry::VertexSketches::sample`]
/// implements the other acceptable option (materializing the merge fresh
/// each round) and is exercised directly by its own tests.
///
/// Each slot is its own `Mutex`, the same per-vertex granularity
/// `registry::VertexSketches` uses, so `apply` can be called concurrently
/// from multiple ingest threads on disjoint vertex pairs (`spec.md` §5).
///
/// A `Graph` is consumed by exactly one connectivity run: calling `run`
/// more than once, or calling `apply` after a `run`, is a programmer
/// error, mirroring the sketch's own one-shot contract.
pub struct Graph {
    n: usize,
    dsu: UnionFind,
    component_sketch: Vec<Mutex<Sketch>>,
    forest: Vec<(u32, u32)>,
    finalized: bool,
}

impl Graph {
    /// Builds a graph over `n` vertices with no edges yet.
    pub fn new(n: usize, seed: u64, bucket_factor: f64) -> Self {
        let registry = VertexSketches::new(n, seed, bucket_factor);
        let component_sketch = (0..n).map(|_| Mutex::new(registry.new_empty_sketch())).collect();
        Self {
            n,
            dsu: UnionFind::new(n),
            component_sketch,
            forest: Vec::new(),
            finalized: false,
        }
    }

    /// Applies a stream event on edge `{u, v}` (insert or delete — the
    /// two are indistinguishable; see `spec.md` §3). Must be called
    /// before `run`; the ingest tier must be quiesced before querying.
    ///
    /// Locks the two touched slots in ascending vertex-id order, the same
    /// convention `registry::VertexSketches::apply` uses, so concurrent
    /// calls on overlapping vertex pairs never deadlock against each
    /// other.
    pub fn apply(&self, u: u32, v: u32) {
        assert!(!self.finalized, "graph already finalized by a connectivity run");
        let e = crate::pairing::pair_nondirectional(u, v);
        let (lo, hi) = if u < v { (u, v) } else { (v, u) };
        let mut lo_sketch = self.component_sketch[lo as usize].lock();
        let mut hi_sketch = self.component_sketch[hi as usize].lock();
        lo_sketch.update(e);
        hi_sketch.update(e);
    }

    /// Runs Borůvka rounds to completion: in each round every current
    /// root samples its cached component sketch for a boundary edge,
    /// successful samples are unioned, and rounds stop once a pass makes
    /// no unions. Runs in `O(log n)` rounds with high probability.
    pub fn run(&mut self) {
        assert!(!self.finalized, "a graph may only be run once");
        self.finalized = true;

        loop {
            let roots = self.dsu.roots();
            if roots.len() <= 1 {
                break;
            }

            // Sampling is read-only with respect to component_sketch (it
            // clones before querying), so every root's sample can run in
            // parallel; only the dsu union step below needs to be
            // serialized against itself.
            let samples: Vec<(u32, Result<(u32, u32), SketchError>)> = roots
                .par_iter()
                .map(|&r| {
                    let mut probe = self.component_sketch[r as usize].lock().clone();
                    let sample = probe.query().map(crate::pairing::inv_pair_nondirectional);
                    (r, sample)
                })
                .collect();

            let mut progressed = false;
            for (root, sample) in samples {
                match sample {
                    Ok((u, v)) => {
                        trace!(root, u, v, "sampled boundary edge");
                        if self.union_round(u, v) {
                            progressed = true;
                        }
                    }
                    Err(SketchError::AllZero) | Err(SketchError::NoGoodBucket) => {
                        trace!(root, "no edge available from this component this round");
                    }
                    Err(other) => panic!("unexpected sketch error during sampling: {other}"),
                }
            }

            debug!(remaining = self.dsu.roots().len(), "boruvka round complete");
            if !progressed {
                break;
            }
        }
    }

    /// Records `(u, v)` as a spanning-forest edge and unions their
    /// components, merging the loser's cached sketch into the survivor's.
    /// Returns `false` without recording anything if `u` and `v` were
    /// already in the same component (a stale sample from a round where
    /// another edge already joined them).
    fn union_round(&mut self, u: u32, v: u32) -> bool {
        let (ru, rv) = (self.dsu.find(u), self.dsu.find(v));
        if ru == rv {
            return false;
        }
        if !self.dsu.union(u, v) {
            return false;
        }
        self.forest.push((u, v));
        let new_root = self.dsu.find(u);
        let loser = if new_root == ru { rv } else { ru };
        let loser_sketch = self.component_sketch[loser as usize].lock().clone();
        self.component_sketch[new_root as usize]
            .lock()
            .merge(&loser_sketch)
            .expect("all component sketches share (n, seed, f)");
        true
    }

    /// The connected components of the current (finalized) graph.
    pub fn connected_components(&self) -> ConnectedComponents {
        let n = self.n;
        let mut by_root: std::collections::BTreeMap<u32, BTreeSet<u32>> = Default::default();
        for v in 0..n as u32 {
            by_root.entry(self.dsu.find(v)).or_default().insert(v);
        }
        ConnectedComponents {
            sets: by_root.into_values().collect(),
        }
    }

    /// The spanning forest edges accumulated across all rounds.
    pub fn spanning_forest(&self) -> SpanningForest {
        SpanningForest {
            edges: self.forest.clone(),
        }
    }

    /// True iff `a` and `b` are in the same component after a completed
    /// run.
    pub fn is_connected(&self, a: u32, b: u32) -> bool {
        self.dsu.find(a) == self.dsu.find(b)
    }
}

/// The connected components of a graph, as returned by
/// [`Graph::connected_components`].
pub struct ConnectedComponents {
    sets: Vec<BTreeSet<u32>>,
}

impl ConnectedComponents {
    pub fn component_sets(&self) -> &[BTreeSet<u32>] {
        &self.sets
    }

    pub fn size(&self) -> usize {
        self.sets.len()
    }

    pub fn is_connected(&self, a: u32, b: u32) -> bool {
        self.sets.iter().any(|s| s.contains(&a) && s.contains(&b))
    }
}

/// A spanning forest of a graph, as returned by [`Graph::spanning_forest`].
pub struct SpanningForest {
    edges: Vec<(u32, u32)>,
}

impl SpanningForest {
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a random graph from a fixed-seed RNG, runs it through both the
    // sketch-based driver and a brute-force union-find over the same edge
    // list, and checks the two agree on every pair. `edge_pct` is the
    // percent chance any given pair is an edge, 1-40.
    fn check_random_graph_connectivity(seed: u64, n: u8, edge_pct: u8) {
        use rand::prelude::*;

        let n = (n as u32).max(2);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut g = Graph::new(n as usize, seed, 4.0);
        let mut brute = UnionFind::new(n as usize);
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen_range(0..100) < edge_pct {
                    g.apply(i, j);
                    brute.union(i, j);
                }
            }
        }
        g.run();
        let cc = g.connected_components();

        for i in 0..n {
            for j in (i + 1)..n {
                assert_eq!(
                    cc.is_connected(i, j),
                    brute.find(i) == brute.find(j),
                    "seed {} n {} edge_pct {}: mismatch on ({}, {})",
                    seed,
                    n,
                    edge_pct,
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn random_graphs_match_brute_force_union_find() {
        for seed in [1u64, 2, 3, 17, 404] {
            check_random_graph_connectivity(seed, 40, 10);
        }
    }

    fn sizes(cc: &ConnectedComponents) -> Vec<usize> {
        let mut v: Vec<usize> = cc.component_sets().iter().map(|s| s.len()).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn empty_graph_is_all_singletons() {
        let mut g = Graph::new(10, 1, 4.0);
        g.run();
        let cc = g.connected_components();
        assert_eq!(cc.size(), 10);
        assert!(g.spanning_forest().edges().is_empty());
    }

    #[test]
    fn single_edge_joins_two_vertices() {
        let mut g = Graph::new(4, 1, 4.0);
        g.apply(0, 1);
        g.run();
        let cc = g.connected_components();
        assert_eq!(cc.size(), 3);
        assert!(cc.is_connected(0, 1));
        assert_eq!(g.spanning_forest().edges(), &[(0, 1)]);
    }

    #[test]
    fn triangle_collapses_to_one_component() {
        let mut g = Graph::new(3, 1, 4.0);
        g.apply(0, 1);
        g.apply(1, 2);
        g.apply(0, 2);
        g.run();
        let cc = g.connected_components();
        assert_eq!(cc.size(), 1);
        assert_eq!(g.spanning_forest().edges().len(), 2);
    }

    #[test]
    fn insert_delete_cancels_to_singletons() {
        let mut g = Graph::new(3, 1, 4.0);
        g.apply(0, 1);
        g.apply(0, 1);
        g.run();
        assert_eq!(g.connected_components().size(), 3);
    }

    #[test]
    fn divisor_graph_has_three_components() {
        let n: u32 = 1000;
        let mut g = Graph::new(n as usize, 1, 4.0);
        for i in 2..n {
            let mut k = i * 2;
            while k < n {
                g.apply(i, k);
                k += i;
            }
        }
        g.run();
        let cc = g.connected_components();
        assert_eq!(cc.size(), 3);
        assert_eq!(sizes(&cc), vec![1, 1, 998]);
    }

    #[test]
    fn two_disjoint_cliques() {
        let mut g = Graph::new(10, 1, 4.0);
        for i in 0u32..5 {
            for j in (i + 1)..5 {
                g.apply(i, j);
            }
        }
        for i in 5u32..10 {
            for j in (i + 1)..10 {
                g.apply(i, j);
            }
        }
        g.run();
        let cc = g.connected_components();
        assert_eq!(cc.size(), 2);
        assert_eq!(sizes(&cc), vec![5, 5]);
    }
}
