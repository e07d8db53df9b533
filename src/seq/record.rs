// A record for sequences, consisting of a tag (the text after '>') and a raw sequence. Both are
// non-empty; length and alphabet are computed on demand rather than stored.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::errors::FastaError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Alphabet {
    Nucleotide,
    Protein,
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Alphabet::Nucleotide => "Nucleotide",
            Alphabet::Protein => "Protein",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeqRecord {
    tag: String,
    sequence: String,
}

impl SeqRecord {
    pub fn new(tag: impl Into<String>, sequence: impl Into<String>) -> Result<Self, FastaError> {
        let tag = tag.into();
        let sequence = sequence.into();
        if tag.is_empty() {
            return Err(String::from("Empty tag").into());
        }
        if sequence.is_empty() {
            return Err(format!("Empty sequence for '{}'", tag).into());
        }
        Ok(SeqRecord { tag, sequence })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Number of characters (not bytes) in the sequence.
    pub fn seq_len(&self) -> usize {
        self.sequence.chars().count()
    }

    /// Nucleotide iff the set of distinct characters is exactly {A, C, G, T}. All four bases must
    /// occur, so "AAAA", "ACG" and RNA ("ACGU") all come out as Protein.
    pub fn alphabet(&self) -> Alphabet {
        let distinct: String = self.sequence.chars().unique().sorted().collect();
        if distinct == "ACGT" {
            Alphabet::Nucleotide
        } else {
            Alphabet::Protein
        }
    }
}

// FastA form, without a trailing newline.
impl fmt::Display for SeqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}\n{}", self.tag, self.sequence)
    }
}
