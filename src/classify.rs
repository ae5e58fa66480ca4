//! Turn untrusted text into a [`Sequence`].
//!
//! Normalization uppercases (ASCII) and drops every whitespace character, so
//! pasted multi-line blocks and FASTA bodies classify the same as a single
//! typed line. The decision itself only looks at `T` and `U`:
//!
//! | contains T | contains U | result                  |
//! |------------|------------|-------------------------|
//! | yes        | no         | DNA                     |
//! | no         | yes        | RNA                     |
//! | no         | no         | DNA (conventional)      |
//! | yes        | yes        | error: mixed symbols    |
//!
//! # Examples
//! ```
//! use seqsum::{classify, SeqKind};
//! let err = classify("atg c\nAU").unwrap_err();
//! assert!(err.to_string().contains("mixed"));
//! let s = classify("augc").unwrap();
//! assert_eq!(s.kind(), SeqKind::Rna);
//! assert_eq!(s.as_str(), "AUGC");
//! ```
use crate::error::{Invalid, Result, SeqError};
use crate::seq::{SeqKind, Sequence};

/// Knobs for [`classify_with`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClassifyOptions {
    /// Accept the ambiguity code `N` in either kind. It never influences the
    /// DNA/RNA decision.
    pub allow_ambiguous: bool,
}

/// Classify with default options (no ambiguity codes).
pub fn classify(raw: &str) -> Result<Sequence> {
    classify_with(raw, &ClassifyOptions::default())
}

/// Normalize `raw`, validate it and decide its kind.
pub fn classify_with(raw: &str, opts: &ClassifyOptions) -> Result<Sequence> {
    let symbols = normalize(raw);
    if symbols.is_empty() {
        return Err(SeqError::InvalidSequence(Invalid::Empty));
    }

    let mut bad = Vec::new();
    let mut first_t = None;
    let mut first_u = None;
    for (pos, c) in symbols.chars().enumerate() {
        match c {
            'A' | 'C' | 'G' => {}
            'T' => { first_t.get_or_insert(pos); }
            'U' => { first_u.get_or_insert(pos); }
            'N' if opts.allow_ambiguous => {}
            other => bad.push((pos, other)),
        }
    }
    if !bad.is_empty() {
        return Err(SeqError::InvalidSequence(Invalid::Disallowed(bad)));
    }

    let kind = match (first_t, first_u) {
        (Some(first_t), Some(first_u)) => {
            return Err(SeqError::InvalidSequence(Invalid::Mixed { first_t, first_u }));
        }
        (None, Some(_)) => SeqKind::Rna,
        _ => SeqKind::Dna,
    };

    tracing::debug!(%kind, len = symbols.len(), "classified sequence");
    Ok(Sequence::from_validated(symbols, kind))
}

/// Uppercase and strip whitespace. Non-ASCII characters pass through untouched
/// so validation can report them.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(raw: &str) -> Invalid {
        classify(raw).unwrap_err().invalid().cloned().expect("invalid-sequence error")
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert_eq!(invalid(""), Invalid::Empty);
        assert_eq!(invalid("  \n\t \r\n"), Invalid::Empty);
    }

    #[test]
    fn lowercase_is_normalized() {
        let s = classify("atgc").unwrap();
        assert_eq!(s.kind(), SeqKind::Dna);
        assert_eq!(s.as_str(), "ATGC");
    }

    #[test]
    fn whitespace_and_line_breaks_are_stripped() {
        let s = classify("ATG CGA\nTCG\r\n  aa").unwrap();
        assert_eq!(s.as_str(), "ATGCGATCGAA");
    }

    #[test]
    fn u_without_t_is_rna() {
        assert_eq!(classify("AUGC").unwrap().kind(), SeqKind::Rna);
    }

    #[test]
    fn neither_t_nor_u_defaults_to_dna() {
        assert_eq!(classify("GATCA").unwrap().kind(), SeqKind::Dna);
        assert_eq!(classify("ACGGCA").unwrap().kind(), SeqKind::Dna);
    }

    #[test]
    fn mixed_t_and_u_is_rejected() {
        assert_eq!(invalid("ATGCU"), Invalid::Mixed { first_t: 1, first_u: 4 });
        assert!(classify("ATGCU").unwrap_err().to_string().contains("mixed DNA/RNA symbols"));
    }

    #[test]
    fn disallowed_characters_reported_with_offsets() {
        assert_eq!(invalid("AC-GX T"), Invalid::Disallowed(vec![(2, '-'), (4, 'X')]));
    }

    #[test]
    fn disallowed_takes_precedence_over_mixed() {
        assert!(matches!(invalid("TUX"), Invalid::Disallowed(_)));
    }

    #[test]
    fn single_symbol_sequences() {
        assert_eq!(classify("u").unwrap().kind(), SeqKind::Rna);
        assert_eq!(classify("G").unwrap().kind(), SeqKind::Dna);
        assert!(classify("x").is_err());
    }

    #[test]
    fn n_requires_opt_in() {
        assert_eq!(invalid("ACNT"), Invalid::Disallowed(vec![(2, 'N')]));
        let opts = ClassifyOptions { allow_ambiguous: true };
        let s = classify_with("acnt", &opts).unwrap();
        assert_eq!((s.kind(), s.as_str()), (SeqKind::Dna, "ACNT"));
    }

    #[test]
    fn n_never_forces_a_kind() {
        let opts = ClassifyOptions { allow_ambiguous: true };
        assert_eq!(classify_with("NNN", &opts).unwrap().kind(), SeqKind::Dna);
        assert_eq!(classify_with("ANU", &opts).unwrap().kind(), SeqKind::Rna);
    }

    #[test]
    fn non_ascii_is_disallowed() {
        assert_eq!(invalid("AÇG"), Invalid::Disallowed(vec![(1, 'Ç')]));
    }
}
