//! Strand transforms over validated sequences.
//!
//! # Examples
//! ```
//! use seqsum::{classify, transcribe, reverse_complement, SeqKind};
//! let dna = classify("ATGCTT").unwrap();
//! let rna = transcribe(&dna).unwrap();
//! assert_eq!((rna.kind(), rna.as_str()), (SeqKind::Rna, "AUGCUU"));
//! assert_eq!(reverse_complement(&dna).as_str(), "AAGCAT");
//! ```
use crate::error::{Result, SeqError};
use crate::seq::{SeqKind, Sequence};

/// DNA → RNA: `T` becomes `U`, everything else is kept in place.
///
/// RNA input is rejected with [`SeqError::WrongKind`] instead of being passed
/// through unchanged.
pub fn transcribe(seq: &Sequence) -> Result<Sequence> {
    if seq.kind() != SeqKind::Dna {
        return Err(SeqError::WrongKind { expected: SeqKind::Dna, found: seq.kind() });
    }
    let rna: String = seq
        .as_str()
        .chars()
        .map(|c| if c == 'T' { 'U' } else { c })
        .collect();
    tracing::debug!(len = rna.len(), "transcribed DNA to RNA");
    Ok(Sequence::from_validated(rna, SeqKind::Rna))
}

/// Reverse complement within the sequence's own alphabet.
pub fn reverse_complement(seq: &Sequence) -> Sequence {
    let kind = seq.kind();
    let rc: String = seq.as_str().chars().rev().map(|c| complement(c, kind)).collect();
    Sequence::from_validated(rc, kind)
}

fn complement(c: char, kind: SeqKind) -> char {
    match (c, kind) {
        ('A', SeqKind::Dna) => 'T',
        ('A', SeqKind::Rna) => 'U',
        ('T', _) | ('U', _) => 'A',
        ('C', _) => 'G',
        ('G', _) => 'C',
        (other, _) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, classify_with, ClassifyOptions};

    #[test]
    fn t_becomes_u() {
        let rna = transcribe(&classify("ATGCGATCGATCGATCG").unwrap()).unwrap();
        assert_eq!(rna.as_str(), "AUGCGAUCGAUCGAUCG");
        assert_eq!(rna.kind(), SeqKind::Rna);
    }

    #[test]
    fn dna_without_t_changes_kind_only() {
        let rna = transcribe(&classify("GGCA").unwrap()).unwrap();
        assert_eq!((rna.kind(), rna.as_str()), (SeqKind::Rna, "GGCA"));
    }

    #[test]
    fn rna_is_rejected() {
        let err = transcribe(&classify("AUGC").unwrap()).unwrap_err();
        assert_eq!(err, SeqError::WrongKind { expected: SeqKind::Dna, found: SeqKind::Rna });
    }

    #[test]
    fn n_survives_transcription() {
        let s = classify_with("TNA", &ClassifyOptions { allow_ambiguous: true }).unwrap();
        assert_eq!(transcribe(&s).unwrap().as_str(), "UNA");
    }

    #[test]
    fn reverse_complement_per_kind() {
        assert_eq!(reverse_complement(&classify("ATCG").unwrap()).as_str(), "CGAT");
        assert_eq!(reverse_complement(&classify("AAAA").unwrap()).as_str(), "TTTT");
        let rna = reverse_complement(&classify("AUGG").unwrap());
        assert_eq!((rna.kind(), rna.as_str()), (SeqKind::Rna, "CCAU"));
    }

    #[test]
    fn reverse_complement_is_an_involution() {
        let s = classify("GATTACAGGC").unwrap();
        assert_eq!(reverse_complement(&reverse_complement(&s)), s);
    }
}
