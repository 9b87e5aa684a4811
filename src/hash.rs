//! Bucket primitives: pure, keyed hash functions and the membership /
//! recovery predicates built from them. Nothing here owns any state —
//! every function takes its seed explicitly, the same shape as the
//! teacher crate's FFI-facing pure functions.

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// 64-bit uniform hash of an edge index, used to populate a bucket's
/// `c_hash` accumulator.
pub fn index_hash(i: u64, seed: u64) -> u64 {
    xxh3_64_with_seed(&i.to_le_bytes(), seed)
}

/// 64-bit hash keyed by column id. Its bits decide which rows of column
/// `col` receive index `i` (see [`contains`]).
pub fn col_index_hash(col: u32, i: u64, seed: u64) -> u64 {
    let mut buf = [0u8; 12];
    buf[0..4].copy_from_slice(&col.to_le_bytes());
    buf[4..12].copy_from_slice(&i.to_le_bytes());
    // mixing the column into the seed (rather than only the hashed bytes)
    // keeps columns independent even for indices that collide across the
    // low bits of `i`.
    xxh3_64_with_seed(&buf, seed ^ (col as u64).wrapping_mul(0x9E3779B97F4A7C15))
}

/// Row mask for row `r`: the low `r` bits of a hash, i.e. `(1 << r) - 1`.
///
/// Using the low-`r`-bits mask (rather than a literal single-bit `1 << r`)
/// is the resolution to the nesting Open Question in the sketch's design
/// notes: acceptance at row `r` implies acceptance at every row `r' < r`,
/// which is exactly the direction [`crate::sketch::Sketch::update`]'s
/// short-circuit depends on, while keeping the per-row acceptance
/// probability at `1 / 2^r`.
pub fn row_mask(r: u32) -> u64 {
    (1u64 << r) - 1
}

/// True iff `(h & mask) == 0`.
pub fn contains(h: u64, mask: u64) -> bool {
    (h & mask) == 0
}

/// Recovery predicate for a single bucket. Returns true iff `a` is, with
/// high probability, the sole index that hashed into this bucket: `a` is
/// in range, `a` actually belongs in this column/row under the same hash
/// used at update time, and the independently-accumulated `c_hash`
/// checksum agrees with hashing `a` directly.
pub fn is_good(a: u64, c_hash: u64, n: u64, col: u32, mask: u64, seed: u64) -> bool {
    a < n && contains(col_index_hash(col, a, seed), mask) && index_hash(a, seed) == c_hash
}
