// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::path::Path;

use fastaread::{errors::FastaError, FastaReader, SeqRecord};

#[allow(dead_code)]
pub const SAMPLE: &str = "tests/data/sample.fasta";

// Records in SAMPLE before the trailing header that has no sequence.
#[allow(dead_code)]
pub const SAMPLE_GOOD_RECORDS: usize = 12;

#[allow(dead_code)]
pub fn parse_str(text: &str) -> Result<Vec<SeqRecord>, FastaError> {
    FastaReader::from_reader(text.as_bytes()).records().collect()
}

#[allow(dead_code)]
pub fn tags(records: &[SeqRecord]) -> Vec<&str> {
    records.iter().map(|r| r.tag()).collect()
}

// Pulls at most `n` records, stopping at the first error.
#[allow(dead_code)]
pub fn first_n<P: AsRef<Path>>(path: P, n: usize) -> Result<Vec<SeqRecord>, FastaError> {
    FastaReader::new(path).records().take(n).collect()
}
