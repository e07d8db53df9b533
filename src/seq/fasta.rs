// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::FusedIterator;
use std::mem;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::errors::FastaError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

enum Source<'a> {
    Path(PathBuf),
    Reader(Box<dyn BufRead + 'a>),
}

/// Streaming FastA reader. Nothing is opened or read until records are pulled from the iterator
/// returned by [`FastaReader::records`].
pub struct FastaReader<'a> {
    source: Option<Source<'a>>,
}

impl<'a> FastaReader<'a> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FastaReader {
            source: Some(Source::Path(path.as_ref().to_path_buf())),
        }
    }

    pub fn from_reader<R: BufRead + 'a>(reader: R) -> Self {
        FastaReader {
            source: Some(Source::Reader(Box::new(reader))),
        }
    }

    /// Lazily parses the source, one record per call to `next()`. The source can only be read
    /// once: calling this again yields an empty iterator.
    pub fn records(&mut self) -> Records<'a> {
        Records {
            pending: self.source.take(),
            lines: None,
            tag: None,
            seq: String::new(),
            line_num: 0,
            deferred: None,
            done: false,
        }
    }
}

impl<'a> IntoIterator for FastaReader<'a> {
    type Item = Result<SeqRecord, FastaError>;
    type IntoIter = Records<'a>;

    fn into_iter(mut self) -> Records<'a> {
        self.records()
    }
}

pub struct Records<'a> {
    // Source not yet opened
    pending: Option<Source<'a>>,
    lines: Option<Lines<Box<dyn BufRead + 'a>>>,
    tag: Option<String>,
    seq: String,
    line_num: usize,
    // An empty tag found on the same line that completed the previous record: that record is
    // yielded first, the error on the following call.
    deferred: Option<FastaError>,
    done: bool,
}

impl<'a> Records<'a> {
    fn open(&mut self) -> Result<(), FastaError> {
        if let Some(source) = self.pending.take() {
            let reader: Box<dyn BufRead + 'a> = match source {
                Source::Path(path) => {
                    let file = match File::open(&path) {
                        Ok(file) => file,
                        Err(source) => return Err(FastaError::SourceUnavailable { path, source }),
                    };
                    info!("Reading {}", path.display());
                    Box::new(BufReader::new(file))
                }
                Source::Reader(reader) => reader,
            };
            self.lines = Some(reader.lines());
        }
        Ok(())
    }

    // Sequence data seen before any header belongs to no record. Returns the number of residues
    // dropped.
    fn discard_orphan(&mut self) -> usize {
        let nb_residues = self.seq.chars().count();
        if nb_residues > 0 {
            warn!(
                "Discarding {} residue(s) found before the first header",
                nb_residues
            );
            self.seq.clear();
        }
        nb_residues
    }

    // Completes the record in progress, if there is one.
    fn finish_record(&mut self) -> Result<Option<SeqRecord>, FastaError> {
        let Some(tag) = self.tag.take() else {
            self.discard_orphan();
            return Ok(None);
        };
        if self.seq.is_empty() {
            return Err(FastaError::EmptySequence {
                tag,
                line: self.line_num,
            });
        }
        let record = SeqRecord::new(tag, mem::take(&mut self.seq))?;
        debug!("Record '{}': {} residues", record.tag(), record.seq_len());
        Ok(Some(record))
    }

    fn advance(&mut self) -> Result<Option<SeqRecord>, FastaError> {
        self.open()?;
        loop {
            let line = match self.lines.as_mut().and_then(|lines| lines.next()) {
                Some(line) => line?,
                None => break,
            };
            self.line_num += 1;
            if line.is_empty() {
                continue;
            }
            let trimmed = line.trim();
            if let Some(hdr) = trimmed.strip_prefix('>') {
                let finished = self.finish_record()?;
                if hdr.is_empty() {
                    let err = FastaError::EmptyTag {
                        line: self.line_num,
                    };
                    return match finished {
                        Some(record) => {
                            self.deferred = Some(err);
                            Ok(Some(record))
                        }
                        None => Err(err),
                    };
                }
                self.tag = Some(hdr.to_string());
                if finished.is_some() {
                    return Ok(finished);
                }
            } else {
                self.seq.push_str(trimmed);
            }
        }
        // End of source: drop the handle before emitting the last record.
        self.lines = None;
        self.finish_record()
    }

    fn close(&mut self) {
        self.done = true;
        self.pending = None;
        self.lines = None;
    }
}

impl Iterator for Records<'_> {
    type Item = Result<SeqRecord, FastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(err) = self.deferred.take() {
            self.close();
            return Some(Err(err));
        }
        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.close();
                None
            }
            Err(e) => {
                self.close();
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Records<'_> {}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, FastaError> {
    FastaReader::new(path).records().collect()
}
