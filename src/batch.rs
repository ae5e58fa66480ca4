//! Summarize many records at once.
//!
//! Each record goes through the same pure pipeline as a single typed sequence
//! ([`crate::classify_with`] then [`crate::build_report_with`]); records are
//! independent, so they are spread over a local Rayon pool. `threads = None`
//! (or `Some(0)`) uses all logical cores. Output order matches input order.
use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::classify::{classify_with, ClassifyOptions};
use crate::error::SeqError;
use crate::report::{build_report_with, Report, ReportOptions};
use crate::seqio::{self, RawRecord};

/// Outcome for one record.
#[derive(Debug, Clone)]
pub struct RecordSummary {
    /// File the record came from.
    pub source: String,
    pub id: String,
    pub result: std::result::Result<Report, SeqError>,
}

/// Classify and report every record on a pool of `threads` workers.
pub fn analyze_records(
    records: Vec<(String, RawRecord)>,
    classify_opts: &ClassifyOptions,
    report_opts: &ReportOptions,
    threads: Option<usize>,
) -> Result<Vec<RecordSummary>> {
    let n = threads.filter(|&t| t > 0).unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
    tracing::debug!(records = records.len(), threads = n, "batch analysis");

    let out = pool.install(|| {
        records
            .into_par_iter()
            .map(|(source, rec)| {
                let result = classify_with(&rec.raw, classify_opts).map(|s| build_report_with(&s, report_opts));
                if let Err(e) = &result {
                    tracing::debug!(source = %source, id = %rec.id, error = %e, "record rejected");
                }
                RecordSummary { source, id: rec.id, result }
            })
            .collect()
    });
    Ok(out)
}

/// Read every file and analyze all of their records.
pub fn analyze_files<P: AsRef<Path>>(
    files: &[P],
    classify_opts: &ClassifyOptions,
    report_opts: &ReportOptions,
    threads: Option<usize>,
) -> Result<Vec<RecordSummary>> {
    let mut records = Vec::new();
    for f in files {
        let name = f.as_ref().display().to_string();
        for rec in seqio::read_raw(f)? {
            records.push((name.clone(), rec));
        }
    }
    analyze_records(records, classify_opts, report_opts, threads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::SeqKind;

    fn rec(id: &str, raw: &str) -> (String, RawRecord) {
        ("mem".to_string(), RawRecord { id: id.into(), raw: raw.into() })
    }

    #[test]
    fn keeps_input_order_and_reports_failures() {
        let recs = vec![rec("a", "ACGT"), rec("b", "ATGU"), rec("c", "augc"), rec("d", "")];
        let out = analyze_records(recs, &ClassifyOptions::default(), &ReportOptions::default(), Some(2)).unwrap();
        let ids: Vec<_> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(out[0].result.as_ref().unwrap().kind, SeqKind::Dna);
        assert!(out[1].result.is_err());
        assert_eq!(out[2].result.as_ref().unwrap().kind, SeqKind::Rna);
        assert!(out[3].result.is_err());
    }

    #[test]
    fn zero_threads_means_all_cores() {
        let out = analyze_records(vec![rec("x", "GG")], &ClassifyOptions::default(), &ReportOptions::default(), Some(0)).unwrap();
        assert_eq!(out.len(), 1);
    }
}
