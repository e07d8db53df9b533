// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use serde::Serialize;

use crate::errors::FastaError;
use crate::seq::record::{Alphabet, SeqRecord};

// For our purposes, a sequence file is just a Vec of sequence records.
//

pub type SeqFile = Vec<SeqRecord>;

// Whole-file counts, gathered while streaming so that the records need not be kept.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub nb_records: usize,
    pub nb_residues: usize,
    pub nb_nucleotide: usize,
    pub nb_protein: usize,
}

impl FileSummary {
    pub fn add(&mut self, record: &SeqRecord) {
        self.nb_records += 1;
        self.nb_residues += record.seq_len();
        match record.alphabet() {
            Alphabet::Nucleotide => self.nb_nucleotide += 1,
            Alphabet::Protein => self.nb_protein += 1,
        }
    }

    /// Stops at the first error.
    pub fn from_records<I>(records: I) -> Result<Self, FastaError>
    where
        I: IntoIterator<Item = Result<SeqRecord, FastaError>>,
    {
        let mut summary = FileSummary::default();
        for record in records {
            summary.add(&record?);
        }
        Ok(summary)
    }
}
