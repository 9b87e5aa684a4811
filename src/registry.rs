//! One sketch per vertex. `apply` routes a stream event to the two
//! sketches it touches; `sample` merges a super-node's member sketches to
//! recover a boundary edge for the connectivity driver.

use parking_lot::Mutex;

use crate::error::SketchError;
use crate::pairing::{inv_pair_nondirectional, pair_nondirectional};
use crate::sketch::Sketch;

/// A sketch per vertex `0..n`, all sharing one `(universe_size, seed, f)`
/// so that merging any subset of them is well-defined (`spec.md` §3's
/// resolved seed note).
pub struct VertexSketches {
    sketches: Vec<Mutex<Sketch>>,
    universe_size: u64,
    seed: u64,
    f: f64,
}

impl VertexSketches {
    /// Allocates `n` sketches over the edge-index universe
    /// `n*(n-1)/2`, all keyed by `seed` with bucket factor `f`.
    pub fn new(n: usize, seed: u64, f: f64) -> Self {
        assert!(n > 0, "graph must have at least one vertex");
        let universe_size = (n as u64) * (n as u64 - 1) / 2;
        let sketches = (0..n)
            .map(|_| Mutex::new(Sketch::new(universe_size.max(1), seed, f)))
            .collect();
        Self {
            sketches,
            universe_size: universe_size.max(1),
            seed,
            f,
        }
    }

    pub fn len(&self) -> usize {
        self.sketches.len()
    }

    /// Applies a stream event on edge `{u, v}` to both endpoints'
    /// sketches. Insertions and deletions are indistinguishable (XOR is
    /// its own inverse), so there is no separate delete path.
    ///
    /// Locks the two touched sketches in ascending vertex-id order, so
    /// concurrent `apply` calls on overlapping vertex pairs never
    /// deadlock against each other.
    pub fn apply(&self, u: u32, v: u32) {
        let e = pair_nondirectional(u, v);
        let (lo, hi) = if u < v { (u, v) } else { (v, u) };
        let mut lo_sketch = self.sketches[lo as usize].lock();
        let mut hi_sketch = self.sketches[hi as usize].lock();
        lo_sketch.update(e);
        hi_sketch.update(e);
    }

    /// XOR-merges the sketches of every vertex in `members` into a fresh
    /// temporary sketch and queries it, decoding the recovered index back
    /// into an edge. Internal edges of `members` cancel; only edges
    /// crossing the boundary of `members` can survive.
    pub fn sample(&self, members: &[u32]) -> Result<(u32, u32), SketchError> {
        let mut acc = Sketch::new(self.universe_size, self.seed, self.f);
        for &v in members {
            let guard = self.sketches[v as usize].lock();
            acc.merge(&guard).expect("sketches share (n, seed, f) by construction");
        }
        let idx = acc.query()?;
        Ok(inv_pair_nondirectional(idx))
    }

    /// Merges the sketch of `v` into `dst`, the destination-buffer shape
    /// used by the driver's incrementally-cached per-component sketches.
    pub fn merge_vertex_into(&self, dst: &mut Sketch, v: u32) {
        let guard = self.sketches[v as usize].lock();
        dst.merge(&guard).expect("sketches share (n, seed, f) by construction");
    }

    pub fn universe_size(&self) -> u64 {
        self.universe_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    /// Allocates a fresh, all-zero sketch with this registry's parameters
    /// — used by the driver to seed a new per-component cache slot.
    pub fn new_empty_sketch(&self) -> Sketch {
        Sketch::new(self.universe_size, self.seed, self.f)
    }
}
