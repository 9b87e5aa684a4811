//! The L0 linear sketch: a fixed-size `GF(2)`-linear summary of a vector
//! of length `N`, supporting XOR updates, in-place linear combination, a
//! one-shot recovery query, and a bit-exact binary round trip.
//!
//! Only the GF(2) variant is implemented here. An older modular-arithmetic
//! variant exists in the original C++ source this crate is modeled on
//! (`examples/original_source/l0_sampling/sketch.cpp`); per its design
//! notes that variant is superseded and is not reproduced.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use crate::error::SketchError;
use crate::hash::{col_index_hash, contains, index_hash, is_good, row_mask};
use crate::pairing::double_to_ull;

/// Number of geometric levels (rows) for a universe of size `n`:
/// `floor(log2(n)) + 1`.
pub fn guess_gen(n: u64) -> u32 {
    assert!(n > 0, "sketch universe must be non-empty");
    (63 - n.leading_zeros()) + 1
}

/// Number of independent columns for a universe of size `n` and bucket
/// factor `f`: monotone in `log n` because [`guess_gen`] is, scaled by the
/// caller's space/recovery-probability tradeoff knob `f`.
pub fn bucket_gen(n: u64, f: f64) -> u32 {
    let rows = guess_gen(n) as f64;
    (double_to_ull(f * rows, crate::pairing::DEFAULT_EPSILON) as u32).max(1)
}

/// A single `(a, c_hash)` accumulator pair. Plain data; all the logic
/// lives on [`Sketch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Bucket {
    a: u64,
    c_hash: u64,
}

/// A fixed-size linear sketch of a vector `x in GF(2)^n`.
///
/// Cloning a sketch is allowed (it's a plain data structure); the one-shot
/// `already_queried` flag is part of that state, so a clone of an
/// already-queried sketch is itself already queried.
#[derive(Debug, Clone)]
pub struct Sketch {
    n: u64,
    seed: u64,
    f: f64,
    cols: u32,
    rows: u32,
    buckets: Vec<Bucket>,
    already_queried: bool,
}

impl Sketch {
    /// Allocates a new, all-zero sketch over universe size `n`, keyed by
    /// `seed`, with bucket factor `f`.
    pub fn new(n: u64, seed: u64, f: f64) -> Self {
        assert!(f > 0.0, "bucket factor must be positive");
        let rows = guess_gen(n);
        let cols = bucket_gen(n, f);
        Self {
            n,
            seed,
            f,
            cols,
            rows,
            buckets: vec![Bucket::default(); (cols as usize) * (rows as usize)],
            already_queried: false,
        }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    fn idx(&self, col: u32, row: u32) -> usize {
        (col as usize) * (self.rows as usize) + (row as usize)
    }

    fn same_params(&self, other: &Sketch) -> bool {
        self.n == other.n && self.seed == other.seed && self.f == other.f
    }

    /// XORs index `i` (`0 <= i < n`) into every bucket it hashes into.
    /// Column `c`'s rows are walked `r = 0, 1, ...` while the row-`r` mask
    /// accepts; the loop stops at the first rejecting row, relying on the
    /// masks nesting across `r` (see [`crate::hash::row_mask`]).
    pub fn update(&mut self, i: u64) {
        debug_assert!(i < self.n, "update index out of range");
        let u = index_hash(i, self.seed);
        for c in 0..self.cols {
            let h = col_index_hash(c, i, self.seed);
            for r in 0..self.rows {
                if !contains(h, row_mask(r)) {
                    break;
                }
                let idx = self.idx(c, r);
                self.buckets[idx].a ^= i;
                self.buckets[idx].c_hash ^= u;
            }
        }
    }

    /// XORs `other`'s accumulators into `self` in place. Requires
    /// identical `(n, seed, f)`.
    pub fn merge(&mut self, other: &Sketch) -> Result<(), SketchError> {
        if !self.same_params(other) {
            return Err(SketchError::ParamMismatch);
        }
        for (dst, src) in self.buckets.iter_mut().zip(other.buckets.iter()) {
            dst.a ^= src.a;
            dst.c_hash ^= src.c_hash;
        }
        self.already_queried = self.already_queried || other.already_queried;
        Ok(())
    }

    /// Merges `src` into `dst` without allocating a fresh sketch, the
    /// destination-buffer shape the design notes prefer for per-round
    /// component sampling.
    pub fn merge_into(dst: &mut Sketch, src: &Sketch) -> Result<(), SketchError> {
        dst.merge(src)
    }

    /// Recovers a uniformly-random surviving index, or fails. At most one
    /// successful or failed call is permitted per sketch; a second call
    /// always returns [`SketchError::RepeatedQuery`].
    ///
    /// Buckets are scanned in column-major order: for reproducibility
    /// the scan order is fixed, though which order is chosen does not
    /// affect correctness.
    pub fn query(&mut self) -> Result<u64, SketchError> {
        if self.already_queried {
            return Err(SketchError::RepeatedQuery);
        }
        self.already_queried = true;

        let mut all_zero = true;
        for c in 0..self.cols {
            for r in 0..self.rows {
                let b = self.buckets[self.idx(c, r)];
                if b.a != 0 || b.c_hash != 0 {
                    all_zero = false;
                }
                let mask = row_mask(r);
                if is_good(b.a, b.c_hash, self.n, c, mask, self.seed) {
                    return Ok(b.a);
                }
            }
        }

        if all_zero {
            Err(SketchError::AllZero)
        } else {
            Err(SketchError::NoGoodBucket)
        }
    }

    /// True once [`Sketch::query`] has been called, regardless of outcome.
    pub fn already_queried(&self) -> bool {
        self.already_queried
    }

    /// Serializes in the fixed little-endian layout: `f` (float64), then
    /// the one-shot-query flag (u8), then `C*R` values of `a`, then `C*R`
    /// values of `c_hash`. `(n, seed)` are not written; the caller
    /// supplies them out-of-band on read.
    pub fn write_binary<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_f64::<LittleEndian>(self.f)?;
        w.write_u8(self.already_queried as u8)?;
        for b in &self.buckets {
            w.write_u64::<LittleEndian>(b.a)?;
        }
        for b in &self.buckets {
            w.write_u64::<LittleEndian>(b.c_hash)?;
        }
        Ok(())
    }

    /// Reads back a sketch written by [`Sketch::write_binary`]. `n` and
    /// `seed` must be supplied by the caller, matching the value used at
    /// construction time, since they are not part of the wire format.
    /// The recovered sketch's `already_queried` flag matches the
    /// serialized sketch's, so a queried sketch round-trips equal to
    /// itself.
    pub fn read_binary<R: Read>(mut r: R, n: u64, seed: u64) -> io::Result<Self> {
        let f = r.read_f64::<LittleEndian>()?;
        let already_queried = r.read_u8()? != 0;
        let rows = guess_gen(n);
        let cols = bucket_gen(n, f);
        let total = (cols as usize) * (rows as usize);

        let mut a = Vec::with_capacity(total);
        for _ in 0..total {
            a.push(r.read_u64::<LittleEndian>()?);
        }
        let mut c_hash = Vec::with_capacity(total);
        for _ in 0..total {
            c_hash.push(r.read_u64::<LittleEndian>()?);
        }
        let buckets = a
            .into_iter()
            .zip(c_hash)
            .map(|(a, c_hash)| Bucket { a, c_hash })
            .collect();

        Ok(Self {
            n,
            seed,
            f,
            cols,
            rows,
            buckets,
            already_queried,
        })
    }
}

impl PartialEq for Sketch {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
            && self.seed == other.seed
            && self.f == other.f
            && self.buckets == other.buckets
            && self.already_queried == other.already_queried
    }
}
