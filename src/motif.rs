//! Motif search over validated sequences (exact and fuzzy).
//!
//! Positions are reported **1-based** so they can be shown to users as-is.
//! Hits may overlap (`AA` occurs at 1, 2 and 3 in `AAAA`).
//!
//! - [`find_motif`] / [`find_motifs`] are exact; several motifs are searched in a
//!   single pass with an Aho–Corasick automaton.
//! - [`find_motif_fuzzy`] allows up to `max_edits` Levenshtein edits using
//!   Myers' bit-parallel algorithm (motifs up to 64 symbols).
//!
//! # Examples
//! ```
//! use seqsum::{classify, motif::find_motif};
//! let s = classify("GATCGATC").unwrap();
//! assert_eq!(find_motif(&s, "atc").unwrap(), vec![2, 6]);
//! ```
use aho_corasick::AhoCorasick;
use bio::pattern_matching::myers::{Myers, MyersBuilder};

use crate::error::{Result, SeqError};
use crate::seq::Sequence;

/// Longest pattern the fuzzy matcher accepts.
pub const MAX_FUZZY_LEN: usize = 64;

/// All 1-based positions of one motif.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MotifHits {
    /// Normalized (uppercase) motif.
    pub motif: String,
    pub positions: Vec<usize>,
}

/// An approximate occurrence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FuzzyHit {
    /// 1-based first symbol of the aligned window.
    pub start: usize,
    /// 1-based last symbol (inclusive).
    pub end: usize,
    /// Edit distance between motif and window.
    pub edits: usize,
}

fn normalize_motif(motif: &str) -> Result<String> {
    let m: String = motif.trim().to_ascii_uppercase();
    if m.is_empty() {
        return Err(SeqError::InvalidMotif("motif is empty".into()));
    }
    if let Some(c) = m.chars().find(|c| !matches!(c, 'A' | 'C' | 'G' | 'T' | 'U' | 'N')) {
        return Err(SeqError::InvalidMotif(format!("'{}' is not a nucleotide symbol", c.escape_default())));
    }
    Ok(m)
}

/// Exact, overlapping occurrences of a single motif.
pub fn find_motif(seq: &Sequence, motif: &str) -> Result<Vec<usize>> {
    let mut hits = find_motifs(seq, &[motif])?;
    Ok(hits.pop().map(|h| h.positions).unwrap_or_default())
}

/// Exact search for several motifs at once; output follows input order.
pub fn find_motifs<S: AsRef<str>>(seq: &Sequence, motifs: &[S]) -> Result<Vec<MotifHits>> {
    let patterns = motifs
        .iter()
        .map(|m| normalize_motif(m.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let mut out: Vec<MotifHits> = patterns
        .iter()
        .map(|p| MotifHits { motif: p.clone(), positions: Vec::new() })
        .collect();
    if patterns.is_empty() {
        return Ok(out);
    }

    let ac = AhoCorasick::new(&patterns)
        .map_err(|e| SeqError::InvalidMotif(e.to_string()))?;
    for m in ac.find_overlapping_iter(seq.as_bytes()) {
        out[m.pattern().as_usize()].positions.push(m.start() + 1);
    }
    // Duplicated motifs only register with the first pattern id.
    for i in 0..out.len() {
        if out[i].positions.is_empty() {
            if let Some(j) = (0..i).find(|&j| out[j].motif == out[i].motif) {
                out[i].positions = out[j].positions.clone();
            }
        }
    }
    for h in &mut out {
        h.positions.sort_unstable();
    }
    tracing::debug!(motifs = out.len(), "motif search finished");
    Ok(out)
}

/// Approximate occurrences with at most `max_edits` edits.
///
/// Every end position with a qualifying alignment is reported once, with its
/// best start.
pub fn find_motif_fuzzy(seq: &Sequence, motif: &str, max_edits: usize) -> Result<Vec<FuzzyHit>> {
    let m = normalize_motif(motif)?;
    if m.len() > MAX_FUZZY_LEN {
        return Err(SeqError::InvalidMotif(format!(
            "fuzzy motifs are limited to {MAX_FUZZY_LEN} symbols, got {}",
            m.len()
        )));
    }
    let k = max_edits.min(m.len()) as u8;
    let mut myers: Myers<u64> = MyersBuilder::new().build_64(m.bytes());
    let hits = myers
        .find_all(seq.as_bytes(), k)
        .map(|(start, end, dist)| FuzzyHit { start: start + 1, end, edits: dist as usize })
        .collect();
    Ok(hits)
}
