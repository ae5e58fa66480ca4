//! Fetch raw sequences by accession id.
//!
//! ### Design
//! - [`SequenceSource`] is the seam between the analysis engine and the
//!   outside world; callers hand its output to [`crate::classify`] like any
//!   other untrusted text.
//! - [`NcbiClient`] talks to NCBI E-utilities `efetch` over blocking HTTP
//!   (`reqwest`), retrying transport failures and 5xx with exponential backoff.
//! - [`ExampleSource`] serves a bundled demo sequence for offline use.
//!
//! ### Example
//! ```no_run
//! use seqsum::fetch::{NcbiClient, SequenceSource};
//! let raw = NcbiClient::default().fetch_sequence("NM_000207.3").unwrap();
//! let seq = seqsum::classify(&raw).unwrap();
//! println!("{}", seqsum::build_report(&seq));
//! ```
use std::time::Duration;

use thiserror::Error;

/// NCBI E-utilities efetch endpoint.
pub const NCBI_EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Demo sequence used when no network is available.
pub const EXAMPLE_SEQUENCE: &str = concat!(
    "ATGCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCG",
    "ATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCG",
    "ATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCG",
);

/// Common accession prefixes, shown as hints by interactive front ends.
pub const ACCESSION_HINTS: &[(&str, &str)] = &[
    ("NM_000207.3", "mRNA, human insulin gene"),
    ("NC_000001.11", "human chromosome 1"),
    ("NC_000913.3", "E. coli complete genome"),
];

/// RefSeq accession prefixes and what they identify.
pub const ACCESSION_PREFIXES: &[(&str, &str)] = &[
    ("NM_", "messenger RNA (mRNA)"),
    ("NC_", "complete chromosome"),
    ("NG_", "gene or genomic region"),
    ("NR_", "non-coding RNA"),
];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("accession id is empty")]
    EmptyAccession,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("record for '{0}' contains no sequence")]
    EmptyRecord(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Anything that can turn an accession id into raw sequence text.
pub trait SequenceSource {
    fn fetch_sequence(&self, accession: &str) -> Result<String, FetchError>;
}

/// Connection settings for [`NcbiClient`].
#[derive(Debug, Clone)]
pub struct NcbiConfig {
    pub base_url: String,
    pub database: String,
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for NcbiConfig {
    fn default() -> Self {
        Self {
            base_url: NCBI_EFETCH_URL.to_string(),
            database: "nucleotide".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NcbiClient {
    config: NcbiConfig,
}

impl NcbiClient {
    pub fn new(config: NcbiConfig) -> Self { Self { config } }

    pub fn config(&self) -> &NcbiConfig { &self.config }

    fn get_fasta(&self, accession: &str) -> Result<String, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let mut backoff = self.config.initial_backoff;
        let mut last_err = FetchError::Network("no attempt made".into());

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::warn!(
                    attempt,
                    max_retries = self.config.max_retries,
                    accession,
                    ?backoff,
                    error = %last_err,
                    "retrying efetch"
                );
                std::thread::sleep(backoff);
                backoff *= 2;
            }

            let req = client.get(&self.config.base_url).query(&[
                ("db", self.config.database.as_str()),
                ("id", accession),
                ("rettype", "fasta"),
                ("retmode", "text"),
            ]);
            match req.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.text().map_err(|e| FetchError::Network(e.to_string()));
                    }
                    let body = resp.text().unwrap_or_default().trim().to_string();
                    let err = FetchError::Status { status: status.as_u16(), body };
                    if status.is_client_error() {
                        return Err(err);
                    }
                    last_err = err;
                }
                Err(e) => last_err = FetchError::Network(e.to_string()),
            }
        }
        Err(last_err)
    }
}

impl SequenceSource for NcbiClient {
    fn fetch_sequence(&self, accession: &str) -> Result<String, FetchError> {
        let accession = accession.trim();
        if accession.is_empty() {
            return Err(FetchError::EmptyAccession);
        }
        tracing::info!(accession, db = %self.config.database, "fetching sequence from NCBI");
        let text = self.get_fasta(accession)?;
        let seq = fasta_body(&text)?;
        if seq.is_empty() {
            return Err(FetchError::EmptyRecord(accession.to_string()));
        }
        tracing::info!(accession, bases = seq.len(), "sequence fetched");
        Ok(seq)
    }
}

/// Offline source that ignores the accession id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleSource;

impl SequenceSource for ExampleSource {
    fn fetch_sequence(&self, _accession: &str) -> Result<String, FetchError> {
        Ok(EXAMPLE_SEQUENCE.to_string())
    }
}

/// Concatenate the sequence lines of a FASTA response, dropping `>` headers.
///
/// Only a single record's worth of text is expected; any further records are
/// joined too, as efetch does for multi-id queries. Text that does not start
/// with a header is reported as malformed (NCBI answers some errors with a
/// plain-text message and status 200).
pub fn fasta_body(text: &str) -> Result<String, FetchError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('>') {
        let first = trimmed.lines().next().unwrap_or_default();
        return Err(FetchError::Malformed(format!("expected FASTA, got: {first}")));
    }
    Ok(trimmed
        .lines()
        .filter(|l| !l.starts_with('>'))
        .flat_map(|l| l.split_whitespace())
        .collect())
}
