use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;

use seqsum::config::{CliOverrides, Settings};
use seqsum::fetch::{ExampleSource, NcbiClient, SequenceSource};
use seqsum::{classify_with, seqio, Sequence};

/// seqsum CLI
#[derive(Parser)]
#[command(name = "seqsum")]
#[command(version)]
#[command(about = "Validate, summarize and transcribe DNA/RNA sequences", long_about = None)]
struct Cli {
    /// Config file (default: ./seqsum.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Accept the ambiguity code N (`--allow-ambiguous=false` turns it off)
    #[arg(long, global = true, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    allow_ambiguous: Option<bool>,

    /// Symbols shown at each end of the report preview
    #[arg(long, global = true)]
    preview_len: Option<usize>,

    /// Debug logging (SEQSUM_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a sequence and print its report
    Analyze {
        /// Sequence text (stdin when neither this nor --file is given)
        seq: Option<String>,
        /// Read the first record of a text/FASTA/FASTQ file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
        /// Print the composition as a table
        #[arg(long, conflicts_with = "json")]
        table: bool,
    },

    /// Fetch a sequence from NCBI by accession id and print its report
    Fetch {
        /// Accession id (e.g., "NM_000207.3")
        accession: String,
        /// Use the bundled example sequence instead of the network
        #[arg(long)]
        example: bool,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
        /// Also save the canonical sequence to this path (.gz to compress)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Transcribe DNA to RNA
    Transcribe {
        /// DNA sequence text (stdin when neither this nor --file is given)
        seq: Option<String>,
        /// Read the first record of a text/FASTA/FASTQ file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Save the RNA to this path instead of printing it (.gz to compress)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Reverse complement of a sequence
    Revcomp {
        /// Sequence text (stdin when neither this nor --file is given)
        seq: Option<String>,
        /// Read the first record of a text/FASTA/FASTQ file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Find motif positions (1-based, overlapping)
    Motif {
        /// One or more motifs
        #[arg(required = true)]
        motifs: Vec<String>,
        /// Sequence text (stdin when neither this nor --file is given)
        #[arg(long)]
        seq: Option<String>,
        /// Read the first record of a text/FASTA/FASTQ file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Allow up to this many edits (single motif up to 64 nt)
        #[arg(long, default_value_t = 0)]
        max_edits: usize,
    },

    /// Summarize every record of one or more FASTA/FASTQ/text files
    Batch {
        /// Input files (FASTA/FASTQ, optionally .gz, or plain text)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Threads (0/None = all)
        #[arg(long)]
        threads: Option<usize>,
        /// Emit CSV to stdout
        #[arg(long)]
        csv: bool,
    },

    /// Interactive menu
    Menu {
        /// Use the bundled example sequence instead of the network
        #[arg(long)]
        example: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    seqsum::telemetry::init_tracing(cli.verbose);

    let overrides = CliOverrides {
        allow_ambiguous: cli.allow_ambiguous,
        preview_len: cli.preview_len,
    };
    let settings = Settings::load(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Commands::Analyze { seq, file, json, table } => {
            let seq = load(&settings, seq, file)?;
            cmd_report(&settings, &seq, json, table)?;
        }

        Commands::Fetch { accession, example, json, save } => {
            let raw = source_for(&settings, example).fetch_sequence(&accession)?;
            let seq = classify_with(&raw, &settings.classify_options())
                .with_context(|| format!("record {accession} is not a usable nucleotide sequence"))?;
            cmd_report(&settings, &seq, json, false)?;
            if let Some(path) = save {
                seqio::save_text(&path, seq.as_str())?;
                eprintln!("saved {} bases to {}", seq.len(), path.display());
            }
        }

        Commands::Transcribe { seq, file, output } => {
            let dna = load(&settings, seq, file)?;
            let rna = seqsum::transcribe(&dna)?;
            match output {
                Some(path) => {
                    seqio::save_text(&path, rna.as_str())?;
                    eprintln!("saved {} bases to {}", rna.len(), path.display());
                }
                None => println!("{rna}"),
            }
        }

        Commands::Revcomp { seq, file } => {
            let seq = load(&settings, seq, file)?;
            println!("{}", seqsum::reverse_complement(&seq));
        }

        Commands::Motif { motifs, seq, file, max_edits } => {
            let seq = load(&settings, seq, file)?;
            cmd_motif(&seq, &motifs, max_edits)?;
        }

        Commands::Batch { files, threads, csv } => {
            cmd_batch(&settings, &files, threads, csv)?;
        }

        Commands::Menu { example } => {
            let source = source_for(&settings, example);
            let stdin = io::stdin();
            seqsum::menu::run_menu(stdin.lock(), io::stdout(), source.as_ref(), &settings)?;
        }
    }

    Ok(())
}

fn source_for(settings: &Settings, example: bool) -> Box<dyn SequenceSource> {
    if example {
        Box::new(ExampleSource)
    } else {
        Box::new(NcbiClient::new(settings.ncbi_config()))
    }
}

/// Resolve a single input from a literal, a file, or stdin, and classify it.
fn load(settings: &Settings, seq: Option<String>, file: Option<PathBuf>) -> Result<Sequence> {
    let raw = match (seq, file) {
        (Some(_), Some(_)) => bail!("give either a sequence or --file, not both"),
        (Some(s), None) => s,
        (None, Some(p)) => seqio::read_first(&p)?.raw,
        (None, None) => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("no sequence given (pass it as an argument, with --file, or on stdin)");
            }
            let mut s = String::new();
            stdin.lock().read_to_string(&mut s).context("reading stdin")?;
            s
        }
    };
    Ok(classify_with(&raw, &settings.classify_options())?)
}

fn cmd_report(settings: &Settings, seq: &Sequence, json: bool, table: bool) -> Result<()> {
    let report = seqsum::build_report_with(seq, &settings.report_options());
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if table {
        let rows = seqsum::composition_rows(&report);
        let df = df!(
            "symbol"     => rows.iter().map(|r| r.0.clone()).collect::<Vec<_>>(),
            "count"      => rows.iter().map(|r| r.1 as u64).collect::<Vec<_>>(),
            "percentage" => rows.iter().map(|r| r.2.clone()).collect::<Vec<_>>(),
        )?;
        println!("kind: {}  length: {}", report.kind, report.length);
        if let Some(gc) = report.gc_content {
            println!("gc content: {gc}%");
        }
        println!("{df}");
    } else {
        println!("{report}");
    }
    Ok(())
}

fn cmd_motif(seq: &Sequence, motifs: &[String], max_edits: usize) -> Result<()> {
    if max_edits == 0 {
        for hit in seqsum::motif::find_motifs(seq, motifs)? {
            let pos: Vec<String> = hit.positions.iter().map(|p| p.to_string()).collect();
            println!("{}\t{}\t{}", hit.motif, hit.positions.len(), pos.join(","));
        }
        return Ok(());
    }
    if motifs.len() != 1 {
        bail!("--max-edits works on a single motif");
    }
    for h in seqsum::motif::find_motif_fuzzy(seq, &motifs[0], max_edits)? {
        println!("{}\t{}..{}\tedits={}", motifs[0].to_ascii_uppercase(), h.start, h.end, h.edits);
    }
    Ok(())
}

fn cmd_batch(settings: &Settings, files: &[PathBuf], threads: Option<usize>, csv: bool) -> Result<()> {
    let rows = seqsum::batch::analyze_files(files, &settings.classify_options(), &settings.report_options(), threads)?;

    let ok = |r: &seqsum::batch::RecordSummary| r.result.as_ref().ok().cloned();
    let mut df = df!(
        "file"   => rows.iter().map(|r| r.source.clone()).collect::<Vec<_>>(),
        "id"     => rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
        "kind"   => rows.iter().map(|r| ok(r).map(|rep| seqsum::kind_to_str(rep.kind).to_string())).collect::<Vec<_>>(),
        "length" => rows.iter().map(|r| ok(r).map(|rep| rep.length as u64)).collect::<Vec<_>>(),
        "gc"     => rows.iter().map(|r| ok(r).and_then(|rep| rep.gc_content).map(|g| g.as_f64())).collect::<Vec<_>>(),
        "error"  => rows.iter().map(|r| r.result.as_ref().err().map(|e| e.to_string())).collect::<Vec<_>>(),
    )?;

    if csv {
        let w = CsvWriter::new(std::io::stdout());
        w.include_header(true).finish(&mut df)?;
    } else {
        std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
        std::env::set_var("POLARS_FMT_STR_LEN", "100000");
        println!("{df}");
    }

    let failed = rows.iter().filter(|r| r.result.is_err()).count();
    if failed > 0 {
        eprintln!("{failed} of {} record(s) rejected", rows.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambiguous_flag(args: &[&str]) -> Option<bool> {
        Cli::try_parse_from(args).unwrap().allow_ambiguous
    }

    #[test]
    fn allow_ambiguous_is_tri_state() {
        assert_eq!(ambiguous_flag(&["seqsum", "analyze", "ACGT"]), None);
        assert_eq!(ambiguous_flag(&["seqsum", "--allow-ambiguous", "analyze", "ACGT"]), Some(true));
        assert_eq!(ambiguous_flag(&["seqsum", "analyze", "--allow-ambiguous=false", "ACGT"]), Some(false));
    }

    #[test]
    fn cli_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqsum.toml");
        std::fs::write(&path, "allow_ambiguous = true\n").unwrap();
        let overrides = CliOverrides { allow_ambiguous: ambiguous_flag(&["seqsum", "--allow-ambiguous=false", "menu"]), preview_len: None };
        let settings = Settings::load(Some(&path), &overrides).unwrap();
        assert!(!settings.allow_ambiguous);
    }

    #[test]
    fn motif_sequence_is_a_flag() {
        let cli = Cli::try_parse_from(["seqsum", "motif", "GAA", "TTC", "--seq", "GAATTC"]).unwrap();
        match cli.command {
            Commands::Motif { motifs, seq, .. } => {
                assert_eq!(motifs, ["GAA", "TTC"]);
                assert_eq!(seq.as_deref(), Some("GAATTC"));
            }
            _ => panic!("expected motif"),
        }
    }
}
