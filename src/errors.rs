// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum FastaError {
    Io(io::Error),
    Format(String),
    // A '>' line with nothing after it.
    EmptyTag { line: usize },
    // A record that got finalized without any sequence data. `line` is where finalization
    // happened: the next header, or the last line of the source.
    EmptySequence { tag: String, line: usize },
    SourceUnavailable { path: PathBuf, source: io::Error },
}

// These allow conversion to FastaError, required for main() to return Result<()> and for '?' to
// work.

impl From<io::Error> for FastaError {
    fn from(e: io::Error) -> Self {
        FastaError::Io(e)
    }
}

impl From<String> for FastaError {
    fn from(s: String) -> Self {
        FastaError::Format(s)
    }
}

impl fmt::Display for FastaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastaError::Io(e) => write!(f, "I/O error: {}", e),
            FastaError::Format(msg) => write!(f, "Format error: {}", msg),
            FastaError::EmptyTag { line } => write!(f, "Empty tag found at line {}", line),
            FastaError::EmptySequence { tag, line } => {
                write!(f, "Empty sequence found for '{}' (line {})", tag, line)
            }
            FastaError::SourceUnavailable { path, source } => {
                write!(f, "Cannot open {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for FastaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FastaError::Io(e) => Some(e),
            FastaError::SourceUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}
