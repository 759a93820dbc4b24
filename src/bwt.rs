//! The Burrows-Wheeler Transform extractor. Given a finalised suffix array and the *original*
//! (pre-rename) input bytes, this produces the BWT sequence that feeds the wavelet tree builder.
//!
//! The BWT lives in the same 256-symbol space as the raw input bytes, with the sentinel
//! represented as the integer `0` — the same value a literal NUL byte would have. This mirrors
//! the source design rather than reserving a 257th symbol for the sentinel: the wavelet tree's
//! root occupancy bitmap has exactly 256 bits, and bit 0 doubles as "sentinel present" / "a literal
//! zero byte appears in the input".

/// Derive the BWT of `text` from its suffix array `sa` (as returned by [crate::sais::build]).
///
/// `sa` has length `text.len() + 1`. `B[i] = T[(SA[i] - 1) mod (n+1)]`, read from `text` directly
/// rather than from the suffix array builder's own (destructively renamed) working copy; when
/// `SA[i] == 0` this lands on the sentinel, emitted here as `0`.
pub fn extract(text: &[u8], sa: &[usize]) -> Vec<usize> {
    let n = text.len();
    debug_assert_eq!(n + 1, sa.len());
    sa.iter()
        .map(|&s| {
            let pos = (s + n) % (n + 1);
            if pos == n {
                0
            } else {
                text[pos] as usize
            }
        })
        .collect()
}
