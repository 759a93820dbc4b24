//! The wavelet tree builder: given a BWT-like sequence over the byte alphabet, recursively splits
//! it by alphabet midpoint, recording at each internal node which elements went left (`0`) and
//! which went right (`1`). Used here purely as a compression front end, never for rank/select.

use crate::bitmap::Bitmap;

/// Number of symbols in the alphabet the wavelet tree partitions (one byte value, including the
/// sentinel's overlapping use of symbol `0`).
const ALPHABET_SIZE: usize = 256;

/// A wavelet tree over a sequence of symbols in `[0, 255]`.
///
/// Nodes are numbered 1-based in level order; node `0` is repurposed to hold the 256-bit
/// alphabet-occupancy bitmap instead of a tree node. The tree is represented sparsely: only nodes
/// that were actually visited have an entry, recorded alongside the highest node index used so
/// downstream consumers know where iteration can stop.
#[derive(Clone, Debug, Default)]
pub struct WaveletTree {
    nodes: Vec<Option<Bitmap>>,
    lastnode: usize,
}

impl WaveletTree {
    /// Build the wavelet tree for `symbols`, each of which must be in `[0, 255]`.
    pub fn build(symbols: &[usize]) -> Self {
        let mut tree = WaveletTree {
            nodes: vec![None],
            lastnode: 0,
        };
        tree.set(0, occupancy_bitmap(symbols));
        tree.recurse(symbols, 1);
        tree
    }

    /// The occupancy bitmap at node 0, or any internal/leaf node bitmap at `1..=lastnode`. Empty
    /// (unset) nodes — leaves, and indices never reached by the recursion — return `None`.
    pub fn node(&self, index: usize) -> Option<&Bitmap> {
        self.nodes.get(index).and_then(|slot| slot.as_ref())
    }

    /// The highest node index the builder wrote to; callers iterate `0..=last_node()`.
    pub fn last_node(&self) -> usize {
        self.lastnode
    }

    fn set(&mut self, index: usize, bitmap: Bitmap) {
        if index >= self.nodes.len() {
            self.nodes.resize(index + 1, None);
        }
        self.nodes[index] = Some(bitmap);
        if index > self.lastnode {
            self.lastnode = index;
        }
    }

    fn recurse(&mut self, symbols: &[usize], index: usize) {
        let mut counts = [0usize; ALPHABET_SIZE];
        for &s in symbols {
            counts[s] += 1;
        }

        let mut lo = None;
        let mut hi = None;
        for (symbol, &count) in counts.iter().enumerate() {
            if count != 0 {
                if lo.is_none() {
                    lo = Some(symbol);
                }
                hi = Some(symbol);
            }
        }
        let (lo, hi) = match (lo, hi) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return, // empty subsequence; nothing to split
        };
        if lo == hi {
            return; // leaf: a single symbol needs no further bitmap
        }

        let mid = (lo + hi) / 2;
        let mut bitmap = Bitmap::with_capacity(symbols.len());
        let mut left = Vec::new();
        let mut right = Vec::new();
        for &s in symbols {
            if s <= mid {
                bitmap.push(false);
                left.push(s);
            } else {
                bitmap.push(true);
                right.push(s);
            }
        }
        self.set(index, bitmap);

        self.recurse(&left, index * 2);
        self.recurse(&right, index * 2 + 1);
    }
}

/// The root occupancy bitmap: 256 bits, bit `c` set iff `c` appears in `symbols`.
fn occupancy_bitmap(symbols: &[usize]) -> Bitmap {
    let mut present = [false; ALPHABET_SIZE];
    for &s in symbols {
        present[s] = true;
    }
    present.into_iter().collect()
}
