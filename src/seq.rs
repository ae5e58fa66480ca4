//! Core types for **validated sequences**.
//!
//! A [`Sequence`] can only be obtained through [`crate::classify`] (or one of the
//! transforms in [`crate::transcribe`]), so every value in circulation is
//! uppercase, whitespace-free, non-empty and restricted to the alphabet of its
//! [`SeqKind`]. Callers treat it as an immutable value: loading new input
//! produces a new `Sequence`, nothing ever edits one in place.
use core::fmt;

use serde::Serialize;

/// Nucleic acid family of a sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum SeqKind {
    /// Alphabet `ACGT` (plus `N` when ambiguity codes are allowed).
    #[serde(rename = "DNA")]
    Dna,
    /// Alphabet `ACGU` (plus `N` when ambiguity codes are allowed).
    #[serde(rename = "RNA")]
    Rna,
}

impl SeqKind {
    /// Uppercase symbols of the strict alphabet, in ascending order.
    pub fn alphabet(self) -> &'static [u8] {
        match self {
            SeqKind::Dna => b"ACGT",
            SeqKind::Rna => b"ACGU",
        }
    }
}

impl fmt::Display for SeqKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeqKind::Dna => "DNA",
            SeqKind::Rna => "RNA",
        })
    }
}

/// A validated, canonical nucleotide sequence.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Sequence {
    symbols: String,
    kind: SeqKind,
}

impl Sequence {
    /// Build from symbols that are already canonical for `kind`.
    ///
    /// Only the classifier and the strand transforms call this.
    pub(crate) fn from_validated(symbols: String, kind: SeqKind) -> Self {
        debug_assert!(!symbols.is_empty());
        Self { symbols, kind }
    }

    pub fn kind(&self) -> SeqKind { self.kind }

    /// The symbols as text, ready to print or write to a file.
    pub fn as_str(&self) -> &str { &self.symbols }

    pub fn as_bytes(&self) -> &[u8] { self.symbols.as_bytes() }

    /// Number of symbols; never zero.
    pub fn len(&self) -> usize { self.symbols.len() }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool { self.symbols.is_empty() }

    /// Count occurrences of a single symbol.
    pub fn count(&self, symbol: u8) -> usize {
        self.as_bytes().iter().filter(|&&b| b == symbol).count()
    }

    pub fn into_string(self) -> String { self.symbols }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.symbols) }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str { &self.symbols }
}
