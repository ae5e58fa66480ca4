//! Assemble the per-sequence summary.
//!
//! A [`Report`] is plain data: it can be rendered as text (`Display`), as
//! JSON (`serde`), or turned into a table by the binary.
use core::fmt;

use serde::Serialize;

use crate::composition::{composition, gc_content, CompositionReport, GcContent};
use crate::seq::{SeqKind, Sequence};

/// Default number of symbols shown at each end of the preview.
pub const DEFAULT_PREVIEW_LEN: usize = 20;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReportOptions {
    /// Symbols in each of the head/tail previews (at least 1).
    pub preview_len: usize,
}

impl Default for ReportOptions {
    fn default() -> Self { Self { preview_len: DEFAULT_PREVIEW_LEN } }
}

/// First and last symbols of a sequence.
///
/// For short sequences both ends cover the whole sequence.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Preview {
    pub head: String,
    pub tail: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Report {
    pub kind: SeqKind,
    pub length: usize,
    pub composition: CompositionReport,
    /// Present for DNA only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gc_content: Option<GcContent>,
    pub preview: Preview,
    #[serde(skip)]
    preview_len: usize,
}

pub fn build_report(seq: &Sequence) -> Report {
    build_report_with(seq, &ReportOptions::default())
}

pub fn build_report_with(seq: &Sequence, opts: &ReportOptions) -> Report {
    let preview_len = opts.preview_len.max(1);
    let s = seq.as_str();
    let n = s.len().min(preview_len);
    // ASCII only, byte slicing is char slicing.
    let preview = Preview { head: s[..n].to_string(), tail: s[s.len() - n..].to_string() };
    Report {
        kind: seq.kind(),
        length: seq.len(),
        composition: composition(seq),
        gc_content: (seq.kind() == SeqKind::Dna).then(|| gc_content(seq)),
        preview,
        preview_len,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "SEQUENCE ANALYSIS REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "kind: {}", self.kind)?;
        writeln!(f, "length: {} bases", self.length)?;
        writeln!(f, "composition:")?;
        for (symbol, c) in self.composition.iter() {
            writeln!(f, "  {}: {} ({}%)", symbol, c.count, c.percentage)?;
        }
        if let Some(gc) = self.gc_content {
            writeln!(f, "gc content: {gc}%")?;
        }
        write!(f, "first {}: {}", self.preview.head.len(), self.preview.head)?;
        if self.length > self.preview_len {
            write!(f, "\nlast {}: {}", self.preview.tail.len(), self.preview.tail)?;
        }
        Ok(())
    }
}
