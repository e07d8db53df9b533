// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::errors::FastaError;

pub const CONFIG_FILENAME: &str = ".fastareadconfig";
pub const DEFAULT_NUM_RECORDS: usize = 10;

// Everything is optional; command-line flags take precedence over whatever is set here.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FastaReadConfig {
    pub num_records: Option<usize>,
    pub json: Option<bool>,
    pub tag_match: Option<String>,
}

impl FastaReadConfig {
    pub fn from_file(path: &Path) -> Result<Self, FastaError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, FastaError> {
        Ok(serde_json::from_str(text).map_err(|e| e.to_string())?)
    }
}

pub fn find_config() -> Option<PathBuf> {
    find_config_in(
        std::env::var("HOME").ok().map(PathBuf::from),
        std::env::current_dir().ok(),
    )
}

// The home directory wins over the working directory.
pub fn find_config_in(home: Option<PathBuf>, cwd: Option<PathBuf>) -> Option<PathBuf> {
    [home, cwd]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|path| path.exists())
}
