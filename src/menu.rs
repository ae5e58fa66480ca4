//! Interactive menu front end.
//!
//! A small state machine over a [`Session`]: every step reads at most a few
//! lines, calls into the engine, prints the outcome and returns to the menu.
//! Engine errors are shown and never end the loop; only option 4 or EOF do.
//! Input and output are injected so the loop can be driven by scripts.
use std::io::{self, BufRead, Write};

use crate::config::Settings;
use crate::fetch::{SequenceSource, ACCESSION_HINTS, ACCESSION_PREFIXES};
use crate::report::build_report_with;
use crate::seq::Sequence;
use crate::seqio;
use crate::session::Session;

/// Characters shown before a long sequence is elided.
const ECHO_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Menu,
    Analyze,
    Fetch,
    Transcribe,
    Quit,
}

/// Run the menu until the user quits or input ends. Returns the final session.
pub fn run_menu<R, W>(mut input: R, mut out: W, source: &dyn SequenceSource, settings: &Settings) -> io::Result<Session>
where
    R: BufRead,
    W: Write,
{
    let mut session = Session::new();
    let mut step = Step::Menu;
    loop {
        step = match step {
            Step::Menu => choose(&mut input, &mut out)?,
            Step::Analyze => analyze(&mut input, &mut out, &mut session, settings)?,
            Step::Fetch => fetch(&mut input, &mut out, &mut session, source, settings)?,
            Step::Transcribe => transcribe(&mut input, &mut out, &session)?,
            Step::Quit => {
                writeln!(out, "\nbye")?;
                return Ok(session);
            }
        };
    }
}

/// Print `msg`, then read one trimmed line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> io::Result<Option<String>> {
    write!(out, "{msg}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn choose<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Step> {
    let rule = "=".repeat(60);
    writeln!(out, "\n{rule}\nDNA/RNA SEQUENCE ANALYZER\n{rule}")?;
    writeln!(out, "1. Analyze a typed sequence")?;
    writeln!(out, "2. Fetch a sequence from NCBI")?;
    writeln!(out, "3. Transcribe DNA to RNA")?;
    writeln!(out, "4. Quit")?;
    let Some(choice) = prompt(input, out, "\nChoose an option (1-4): ")? else {
        return Ok(Step::Quit);
    };
    Ok(match choice.as_str() {
        "1" => Step::Analyze,
        "2" => Step::Fetch,
        "3" => Step::Transcribe,
        "4" => Step::Quit,
        other => {
            writeln!(out, "\ninvalid option '{other}', choose a number from 1 to 4")?;
            Step::Menu
        }
    })
}

fn analyze<R: BufRead, W: Write>(input: &mut R, out: &mut W, session: &mut Session, settings: &Settings) -> io::Result<Step> {
    let Some(raw) = prompt(input, out, "\nType the sequence: ")? else {
        return Ok(Step::Quit);
    };
    load_and_report(out, session, &raw, settings)?;
    Ok(Step::Menu)
}

fn fetch<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    session: &mut Session,
    source: &dyn SequenceSource,
    settings: &Settings,
) -> io::Result<Step> {
    writeln!(out, "\nExample accession ids:")?;
    for (id, what) in ACCESSION_HINTS {
        writeln!(out, "  {id:<14} {what}")?;
    }
    writeln!(out, "\nCommon prefixes:")?;
    for (prefix, what) in ACCESSION_PREFIXES {
        writeln!(out, "  {prefix} = {what}")?;
    }
    let Some(accession) = prompt(input, out, "\nNCBI accession id: ")? else {
        return Ok(Step::Quit);
    };
    match source.fetch_sequence(&accession) {
        Ok(raw) => {
            writeln!(out, "\nfetched {} characters", raw.len())?;
            load_and_report(out, session, &raw, settings)?;
        }
        Err(e) => writeln!(out, "\nerror: {e}")?,
    }
    Ok(Step::Menu)
}

fn load_and_report<W: Write>(out: &mut W, session: &mut Session, raw: &str, settings: &Settings) -> io::Result<()> {
    match session.load(raw, &settings.classify_options()) {
        Ok(seq) => {
            writeln!(out, "\nvalid {} sequence", seq.kind())?;
            writeln!(out, "{}", build_report_with(seq, &settings.report_options()))?;
        }
        Err(e) => writeln!(out, "\nerror: {e}")?,
    }
    Ok(())
}

fn transcribe<R: BufRead, W: Write>(input: &mut R, out: &mut W, session: &Session) -> io::Result<Step> {
    let (dna, rna) = match (session.current(), session.transcribe_current()) {
        (Some(dna), Some(Ok(rna))) => (dna, rna),
        (_, Some(Err(e))) => {
            writeln!(out, "\nerror: {e}")?;
            return Ok(Step::Menu);
        }
        _ => {
            writeln!(out, "\nerror: no sequence loaded, use option 1 or 2 first")?;
            return Ok(Step::Menu);
        }
    };
    writeln!(out, "\n--- Transcription DNA -> RNA ---")?;
    writeln!(out, "DNA: {}", elide(dna))?;
    writeln!(out, "RNA: {}", elide(&rna))?;

    let Some(answer) = prompt(input, out, "\nSave the RNA to a file? (y/n): ")? else {
        return Ok(Step::Quit);
    };
    if answer.eq_ignore_ascii_case("y") {
        let Some(path) = prompt(input, out, "Output file name: ")? else {
            return Ok(Step::Quit);
        };
        if path.is_empty() {
            writeln!(out, "error: no file name given")?;
        } else {
            match seqio::save_text(&path, rna.as_str()) {
                Ok(()) => writeln!(out, "saved to {path}")?,
                Err(e) => writeln!(out, "error: {e:#}")?,
            }
        }
    }
    Ok(Step::Menu)
}

fn elide(seq: &Sequence) -> String {
    let s = seq.as_str();
    if s.len() > ECHO_LEN { format!("{}...", &s[..ECHO_LEN]) } else { s.to_string() }
}
