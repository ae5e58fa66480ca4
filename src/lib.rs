#![forbid(unsafe_code)]
//! # seqsum
//!
//! Validate, summarize and transcribe **DNA/RNA** sequences, whether typed by hand,
//! read from a file or fetched from NCBI by **accession id**.
//!
//! ## Highlights
//! - 🧬 **Strict classification**: raw text is normalized (uppercase, whitespace
//!   stripped) and classified as DNA or RNA; anything else is rejected with the
//!   offending characters and their offsets. Nothing is silently dropped.
//! - 📊 **Exact statistics**: composition and GC content are fixed-point
//!   percentages rounded half up, identical on every platform.
//! - 🔁 **Pure engine**: every analysis function takes a value and returns a
//!   value. The "current sequence" is a [`session::Session`] owned by the caller.
//!
//! ## Examples
//! ```rust
//! let seq = seqsum::classify("atgcgatcg\natcgatcgatcg").unwrap();
//! assert_eq!(seq.kind(), seqsum::SeqKind::Dna);
//! let report = seqsum::build_report(&seq);
//! assert_eq!(report.length, 21);
//! assert_eq!(report.composition.total(), 21);
//! let rna = seqsum::transcribe(&seq).unwrap();
//! assert!(!rna.as_str().contains('T'));
//! assert_eq!(seqsum::gc_content(&seq).to_string(), "52.38");
//! ```

pub mod error;
pub mod seq;
pub mod percent;
pub mod classify;
pub mod composition;
pub mod transcribe;
pub mod report;
pub mod motif;
pub mod fetch;
pub mod seqio;
pub mod batch;
pub mod session;
pub mod config;
pub mod menu;
pub mod telemetry;

pub use classify::{classify, classify_with, ClassifyOptions};
pub use composition::{composition, gc_content, CompositionReport, GcContent, SymbolCount};
pub use error::{Invalid, Result, SeqError};
pub use percent::Percentage;
pub use report::{build_report, build_report_with, Preview, Report, ReportOptions};
pub use seq::{SeqKind, Sequence};
pub use transcribe::{reverse_complement, transcribe};

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a [`SeqKind`] into a stable, lowercase &str for tables and file names.
#[doc = "This returns one of: `dna`, `rna`."]
pub fn kind_to_str(k: SeqKind) -> &'static str {
    match k {
        SeqKind::Dna => "dna",
        SeqKind::Rna => "rna",
    }
}

/// Return `(symbol, count, percentage)` rows for a report, in symbol order.
///
/// Convenience for CLI/table output; the percentage is the two-decimal text form.
pub fn composition_rows(report: &Report) -> Vec<(String, usize, String)> {
    report
        .composition
        .iter()
        .map(|(symbol, c)| (symbol.to_string(), c.count, c.percentage.to_string()))
        .collect()
}

#[cfg(test)]
mod cli_support_tests {
    use super::*;

    #[test]
    fn composition_rows_follow_symbol_order() {
        let r = build_report(&classify("TTGA").unwrap());
        let rows = composition_rows(&r);
        assert_eq!(
            rows,
            vec![
                ("A".to_string(), 1, "25.00".to_string()),
                ("G".to_string(), 1, "25.00".to_string()),
                ("T".to_string(), 2, "50.00".to_string()),
            ]
        );
    }

    #[test]
    fn kind_strings_are_stable() {
        assert_eq!(kind_to_str(SeqKind::Dna), "dna");
        assert_eq!(kind_to_str(SeqKind::Rna), "rna");
    }
}
