//! Symbol composition and GC content of a validated [`Sequence`].
//!
//! Only symbols that actually occur are reported; there are no zero-count
//! entries. Percentages use [`Percentage`] (two decimals, half up).
//!
//! GC content is *computable* for any kind since `G` and `C` exist in both
//! alphabets. Whether it is *displayed* is decided by [`crate::report`],
//! which only shows it for DNA.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::percent::Percentage;
use crate::seq::Sequence;

/// GC content of a sequence.
pub type GcContent = Percentage;

/// Count and share of one symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SymbolCount {
    pub count: usize,
    pub percentage: Percentage,
}

/// Per-symbol counts, ordered by symbol.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompositionReport {
    entries: BTreeMap<char, SymbolCount>,
}

impl CompositionReport {
    pub fn get(&self, symbol: char) -> Option<&SymbolCount> { self.entries.get(&symbol) }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &SymbolCount)> + '_ {
        self.entries.iter().map(|(c, s)| (*c, s))
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Sum of all counts; equals the sequence length.
    pub fn total(&self) -> usize { self.entries.values().map(|s| s.count).sum() }
}

/// Count every symbol of `seq`.
pub fn composition(seq: &Sequence) -> CompositionReport {
    // Sequences are ASCII, a byte table is enough.
    let mut counts = [0usize; 128];
    for &b in seq.as_bytes() {
        counts[usize::from(b & 0x7f)] += 1;
    }
    let len = seq.len();
    let entries = counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(b, &count)| {
            (char::from(b as u8), SymbolCount { count, percentage: Percentage::of(count, len) })
        })
        .collect();
    CompositionReport { entries }
}

/// `100 * (G + C) / len`, rounded like [`composition`]. No kind restriction.
pub fn gc_content(seq: &Sequence) -> GcContent {
    let gc = seq.as_bytes().iter().filter(|&&b| b == b'G' || b == b'C').count();
    Percentage::of(gc, seq.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, classify_with, ClassifyOptions};

    #[test]
    fn counts_only_present_symbols() {
        let c = composition(&classify("AACG").unwrap());
        assert_eq!(c.len(), 3);
        assert!(c.get('T').is_none());
        assert_eq!(c.get('A').unwrap().count, 2);
        assert_eq!(c.get('A').unwrap().percentage.to_string(), "50.00");
        assert_eq!(c.total(), 4);
    }

    #[test]
    fn entries_are_sorted_by_symbol() {
        let c = composition(&classify("UUGCA").unwrap());
        let order: String = c.iter().map(|(s, _)| s).collect();
        assert_eq!(order, "ACGU");
    }

    #[test]
    fn thirds_round_and_sum_close_to_hundred() {
        let c = composition(&classify("ACG").unwrap());
        let sum: u32 = c.iter().map(|(_, s)| s.percentage.hundredths()).sum();
        assert_eq!(sum, 9999);
    }

    #[test]
    fn gc_extremes() {
        assert_eq!(gc_content(&classify("GGCC").unwrap()).as_f64(), 100.0);
        assert_eq!(gc_content(&classify("GGCC").unwrap()).to_string(), "100.00");
        assert_eq!(gc_content(&classify("AATT").unwrap()).as_f64(), 0.0);
        assert_eq!(gc_content(&classify("AATT").unwrap()).to_string(), "0.00");
    }

    #[test]
    fn gc_is_computable_for_rna() {
        assert_eq!(gc_content(&classify("GCAU").unwrap()).to_string(), "50.00");
    }

    #[test]
    fn ambiguity_codes_count_in_the_denominator() {
        let s = classify_with("GCNN", &ClassifyOptions { allow_ambiguous: true }).unwrap();
        assert_eq!(gc_content(&s).to_string(), "50.00");
        assert_eq!(composition(&s).get('N').unwrap().count, 2);
    }

    #[test]
    fn serializes_as_symbol_map() {
        let c = composition(&classify("AT").unwrap());
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["A"]["count"], 1);
        assert_eq!(v["T"]["percentage"], 50.0);
    }
}
