//! `tlz` compresses an arbitrary byte-oriented input into a single artifact built from the
//! Burrows-Wheeler Transform, a wavelet tree over the BWT, and gamma run-length coding of each
//! wavelet-tree bitmap. It implements no decompressor: the output is meant as the payload of a
//! downstream FM-index or context-mixing decoder.

use std::fmt;
use std::io::{self, Write};

pub mod bitmap;
pub mod bwt;
pub mod gamma;
pub mod sais;
pub mod wavelet_tree;
pub mod writer;

use crate::wavelet_tree::WaveletTree;

/////////////////////////////////////////////// Error //////////////////////////////////////////////

/// Everything that can go wrong above the suffix-array builder's internal-invariant boundary. The
/// builder's own sentinel values (`EMPTY`/`UNIQUE`/`MULTI`) never escape its module; a violation
/// of its contract is a programming error, not something this enum represents.
#[derive(Debug)]
pub enum Error {
    /// No filename was given on the command line.
    MissingArgument,
    /// The input file could not be opened or read.
    InputUnreadable { path: String, source: io::Error },
    /// The output file could not be opened or written.
    OutputFailed(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingArgument => write!(f, "usage: tlz <input-file>"),
            Error::InputUnreadable { path, source } => {
                write!(f, "could not read '{path}': {source}")
            }
            Error::OutputFailed(source) => write!(f, "could not write output: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingArgument => None,
            Error::InputUnreadable { source, .. } => Some(source),
            Error::OutputFailed(source) => Some(source),
        }
    }
}

///////////////////////////////////////////// pipeline ///////////////////////////////////////////

/// Run the full pipeline — suffix array, BWT, wavelet tree, γ run-length coding — over `input`,
/// appending the compressed artifact to `out`.
///
/// Empty input is the degenerate case `n = 0`: the suffix array is `[0]`, the BWT is the single
/// sentinel byte, and the wavelet tree has only its occupancy bitmap (bit 0 set, since the
/// sentinel is the sole symbol present).
pub fn compress<W: Write>(input: &[u8], out: &mut W) -> Result<(), Error> {
    let sa = sais::build(input);
    let bwt = bwt::extract(input, &sa);
    let tree = WaveletTree::build(&bwt);
    writer::write_wavelet_tree(out, &tree).map_err(Error::OutputFailed)
}
