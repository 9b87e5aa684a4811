//! A thread-safe disjoint-set-union over vertex ids.
//!
//! `spec.md` treats the DSU as an external collaborator, consumed only
//! through "`find`, `union`, and enumeration of roots." Since this
//! repository has no surrounding system to import one from, a concrete
//! implementation is provided here, but it is deliberately kept free of
//! any sketch-specific logic so the boundary named in the spec still
//! holds: [`crate::connectivity`] only ever calls `find`/`union`/`roots`.

use parking_lot::Mutex;

struct State {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

/// A union-find over `0..n`, safe to call concurrently from multiple
/// threads. Coarse-grained: `find` and `union` both take a single lock,
/// which is the simpler of the two schemes `spec.md` §5 allows.
pub struct UnionFind {
    state: Mutex<State>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            state: Mutex::new(State {
                parent: (0..n as u32).collect(),
                rank: vec![0; n],
            }),
        }
    }

    /// Returns the canonical root of `v`'s set, compressing the path as
    /// it walks up.
    pub fn find(&self, v: u32) -> u32 {
        let mut state = self.state.lock();
        Self::find_locked(&mut state.parent, v)
    }

    fn find_locked(parent: &mut [u32], v: u32) -> u32 {
        let mut root = v;
        while parent[root as usize] != root {
            root = parent[root as usize];
        }
        // path compression
        let mut cur = v;
        while parent[cur as usize] != root {
            let next = parent[cur as usize];
            parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Unions the sets containing `a` and `b`, by rank. Returns `true` if
    /// this actually merged two previously-distinct sets.
    pub fn union(&self, a: u32, b: u32) -> bool {
        let mut state = self.state.lock();
        let ra = Self::find_locked(&mut state.parent, a);
        let rb = Self::find_locked(&mut state.parent, b);
        if ra == rb {
            return false;
        }
        let (lo, hi) = if state.rank[ra as usize] < state.rank[rb as usize] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        state.parent[lo as usize] = hi;
        if state.rank[lo as usize] == state.rank[hi as usize] {
            state.rank[hi as usize] += 1;
        }
        true
    }

    /// Enumerates the current distinct roots, in ascending order.
    pub fn roots(&self) -> Vec<u32> {
        let mut state = self.state.lock();
        let n = state.parent.len();
        let mut roots: Vec<u32> = (0..n as u32)
            .map(|v| Self::find_locked(&mut state.parent, v))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Number of vertices in the table (not the number of distinct sets).
    pub fn len(&self) -> usize {
        self.state.lock().parent.len()
    }
}
