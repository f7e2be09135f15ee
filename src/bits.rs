//! Bit-twiddling helpers used by the face mask builder and the greedy merger.

/// Count trailing zeros of a nonzero `u64`, used to walk set bits one at a
/// time during the greedy merge scan.
///
/// The original C++ this mesher is descended from special-cased MSVC's
/// `_BitScanForward64` vs GCC/Clang's `__builtin_ctzll`; `u64::trailing_zeros`
/// compiles to the same intrinsic on every target Rust supports, so there's
/// nothing left to wrap beyond giving the operation a name at the call site.
#[inline]
pub const fn ctz(x: u64) -> u32 {
    x.trailing_zeros()
}

/// Clears the lowest set bit of `x`.
#[inline]
pub const fn clear_lowest(x: u64) -> u64 {
    x & (x - 1)
}
