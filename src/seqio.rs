//! Reading raw input from files and writing results back out.
//!
//! ### Design
//! - **FASTA/FASTQ** (plain or gzipped) are parsed with `needletail`; every
//!   record becomes one [`RawRecord`].
//! - Anything else is treated as a **plain-text** sequence dump (the whole file
//!   is one record, named after the file stem).
//! - Output is plain text; paths ending in `.gz` are written through `flate2`.
//!
//! Nothing here validates symbols. Records are handed to
//! [`crate::classify`] as untrusted text.
//!
//! ### Errors
//! IO and parse errors bubble up as `anyhow::Result` with the path attached.
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use flate2::read::MultiGzDecoder;
use needletail::parse_fastx_reader;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// An unvalidated record read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub id: String,
    pub raw: String,
}

/// Read every record in `path`.
pub fn read_raw<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let p = path.as_ref();
    let mut bytes = Vec::new();
    File::open(p)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .with_context(|| format!("reading {}", p.display()))?;

    if bytes.starts_with(&GZIP_MAGIC) {
        let mut plain = Vec::new();
        MultiGzDecoder::new(bytes.as_slice())
            .read_to_end(&mut plain)
            .with_context(|| format!("decompressing {}", p.display()))?;
        bytes = plain;
    }

    let first = bytes.iter().copied().find(|b| !b.is_ascii_whitespace());
    let records = match first {
        Some(b'>') | Some(b'@') => read_fastx(bytes).with_context(|| format!("parsing {}", p.display()))?,
        _ => {
            let raw = String::from_utf8(bytes)
                .with_context(|| format!("{} is not valid UTF-8 text", p.display()))?;
            let id = p
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("sequence")
                .trim_end_matches(".txt")
                .to_string();
            vec![RawRecord { id, raw }]
        }
    };
    tracing::debug!(path = %p.display(), records = records.len(), "read input");
    Ok(records)
}

/// Read the first record of `path`, for commands that work on one sequence.
pub fn read_first<P: AsRef<Path>>(path: P) -> Result<RawRecord> {
    let p = path.as_ref();
    match read_raw(p)?.into_iter().next() {
        Some(r) => Ok(r),
        None => bail!("{} contains no records", p.display()),
    }
}

fn read_fastx(bytes: Vec<u8>) -> Result<Vec<RawRecord>> {
    let mut reader = parse_fastx_reader(Cursor::new(bytes))?;
    let mut out = Vec::new();
    while let Some(record) = reader.next() {
        let rec = record?;
        let id = String::from_utf8_lossy(rec.id()).to_string();
        let raw = String::from_utf8_lossy(&rec.seq()).to_string();
        out.push(RawRecord { id, raw });
    }
    Ok(out)
}

/// Write `text` plus a trailing newline to `path`, gzipped when it ends in `.gz`.
pub fn save_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let p = path.as_ref();
    let file = File::create(p).with_context(|| format!("creating {}", p.display()))?;
    let writer = BufWriter::new(file);
    let gz = p
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("gz"));
    if gz {
        let mut enc = flate2::write::GzEncoder::new(writer, flate2::Compression::default());
        write_line(&mut enc, text).with_context(|| format!("writing {}", p.display()))?;
        enc.finish()?.flush()?;
    } else {
        let mut w = writer;
        write_line(&mut w, text).with_context(|| format!("writing {}", p.display()))?;
        w.flush()?;
    }
    tracing::info!(path = %p.display(), bytes = text.len(), gzip = gz, "saved result");
    Ok(())
}

fn write_line<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    w.write_all(text.as_bytes())?;
    w.write_all(b"\n")
}
