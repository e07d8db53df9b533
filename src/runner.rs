// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    io::{stdin, stdout, BufRead, Write},
    path::Path,
};

use clap::Parser;
use log::info;
use regex::Regex;
use serde_json::json;

use crate::config::{find_config, FastaReadConfig, DEFAULT_NUM_RECORDS};
use crate::errors::FastaError;
use crate::seq::fasta::FastaReader;
use crate::seq::file::FileSummary;
use crate::seq::record::SeqRecord;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// FastA file (asked for interactively if not given)
    fasta_fname: Option<String>,

    /// Number of records to show [default: 10]
    #[arg(short, long = "num-records")]
    num_records: Option<usize>,

    /// Only show records whose tag matches this regex
    #[arg(short = 'm', long = "match")]
    tag_match: Option<String>,

    /// Output JSON, one object per line
    #[arg(short, long)]
    json: bool,

    /// Info mode: read the whole file and print a summary
    #[arg(short, long)]
    info: bool,
}

// Command line and config file, merged.
#[derive(Debug)]
struct Settings {
    num_records: usize,
    tag_regex: Option<Regex>,
    json: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: FastaReadConfig) -> Result<Self, FastaError> {
        let num_records = cli
            .num_records
            .or(config.num_records)
            .unwrap_or(DEFAULT_NUM_RECORDS);
        let tag_regex = match cli.tag_match.as_ref().or(config.tag_match.as_ref()) {
            Some(pattern) => {
                Some(Regex::new(pattern).map_err(|e| format!("Bad tag pattern: {}", e))?)
            }
            None => None,
        };
        let json = cli.json || config.json.unwrap_or(false);
        Ok(Settings {
            num_records,
            tag_regex,
            json,
        })
    }
}

// A config file that cannot be read or parsed is reported, then ignored.
fn load_config(path: Option<&Path>) -> FastaReadConfig {
    let Some(path) = path else {
        return FastaReadConfig::default();
    };
    match FastaReadConfig::from_file(path) {
        Ok(cfg) => {
            info!("Using config {}", path.display());
            cfg
        }
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            FastaReadConfig::default()
        }
    }
}

fn prompt_for_path<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<String, FastaError> {
    write!(output, "Enter the path to the FastA file: ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let path = answer.trim();
    if path.is_empty() {
        return Err(String::from("No FastA file given").into());
    }
    Ok(path.to_string())
}

fn write_record<W: Write>(
    out: &mut W,
    record: &SeqRecord,
    as_json: bool,
) -> Result<(), FastaError> {
    if as_json {
        let obj = json!({
            "tag": record.tag(),
            "sequence": record.sequence(),
            "length": record.seq_len(),
            "alphabet": record.alphabet(),
        });
        writeln!(out, "{}", obj)?;
    } else {
        writeln!(out, "{}", record)?;
        writeln!(out, "{}", record.seq_len())?;
        writeln!(out, "{}", record.alphabet())?;
        writeln!(out)?;
    }
    Ok(())
}

// Pulls records only until enough have been shown, so that problems further down the file go
// unnoticed. Returns the number of records written.
fn show_records<I, W>(records: I, settings: &Settings, out: &mut W) -> Result<usize, FastaError>
where
    I: IntoIterator<Item = Result<SeqRecord, FastaError>>,
    W: Write,
{
    let mut records = records.into_iter();
    let mut shown = 0;
    while shown < settings.num_records {
        let Some(record) = records.next() else {
            break;
        };
        let record = record?;
        if let Some(re) = &settings.tag_regex {
            if !re.is_match(record.tag()) {
                continue;
            }
        }
        write_record(out, &record, settings.json)?;
        shown += 1;
    }
    Ok(shown)
}

fn write_summary<W: Write>(
    out: &mut W,
    fname: &str,
    summary: &FileSummary,
    as_json: bool,
) -> Result<(), FastaError> {
    if as_json {
        let mut obj = serde_json::to_value(summary).map_err(|e| e.to_string())?;
        obj["name"] = json!(fname);
        writeln!(out, "{}", obj)?;
    } else {
        writeln!(out, "name: {}", fname)?;
        writeln!(out, "nb_records: {}", summary.nb_records)?;
        writeln!(out, "nb_residues: {}", summary.nb_residues)?;
        writeln!(out, "nb_nucleotide: {}", summary.nb_nucleotide)?;
        writeln!(out, "nb_protein: {}", summary.nb_protein)?;
    }
    Ok(())
}

pub fn run() -> Result<(), FastaError> {
    env_logger::init();
    info!("Starting log");

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli, load_config(find_config().as_deref()))?;

    let fasta_fname = match &cli.fasta_fname {
        Some(fname) => fname.clone(),
        None => prompt_for_path(stdin().lock(), stdout())?,
    };

    let reader = FastaReader::new(&fasta_fname);
    let mut out = stdout().lock();
    if cli.info {
        info!("Running in info mode.");
        let summary = FileSummary::from_records(reader)?;
        write_summary(&mut out, &fasta_fname, &summary, settings.json)?;
    } else {
        let shown = show_records(reader, &settings, &mut out)?;
        info!("Showed {} record(s)", shown);
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> Settings {
        let cli = Cli::parse_from(args);
        Settings::resolve(&cli, FastaReadConfig::default()).expect("valid settings")
    }

    fn show(text: &str, settings: &Settings) -> (Result<usize, FastaError>, String) {
        let mut out: Vec<u8> = Vec::new();
        let reader = FastaReader::from_reader(text.as_bytes());
        let res = show_records(reader, settings, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_settings_defaults() {
        let s = settings(&["fastaread", "x.fas"]);
        assert_eq!(s.num_records, DEFAULT_NUM_RECORDS);
        assert!(s.tag_regex.is_none());
        assert!(!s.json);
    }

    #[test]
    fn test_settings_cli_overrides_config() {
        let cli = Cli::parse_from(["fastaread", "-n", "2", "x.fas"]);
        let config = FastaReadConfig {
            num_records: Some(5),
            json: Some(true),
            tag_match: Some(String::from("^chr")),
        };
        let s = Settings::resolve(&cli, config).unwrap();
        assert_eq!(s.num_records, 2);
        assert!(s.json);
        assert!(s.tag_regex.unwrap().is_match("chr1"));
    }

    #[test]
    fn test_settings_bad_regex() {
        let cli = Cli::parse_from(["fastaread", "-m", "(", "x.fas"]);
        let res = Settings::resolve(&cli, FastaReadConfig::default());
        assert!(matches!(res, Err(FastaError::Format(_))));
    }

    #[test]
    fn test_load_config() {
        let path = Path::new("data/config/home/.fastareadconfig");
        let cfg = load_config(Some(path));
        assert_eq!(cfg.num_records, Some(3));
        assert_eq!(cfg.tag_match.as_deref(), Some("^chr"));
        assert_eq!(load_config(None), FastaReadConfig::default());
    }

    #[test]
    fn test_load_config_bad_file_ignored() {
        let bad = Path::new("data/config/bad/.fastareadconfig");
        assert_eq!(load_config(Some(bad)), FastaReadConfig::default());
        let missing = Path::new("data/config/no-such-dir/.fastareadconfig");
        assert_eq!(load_config(Some(missing)), FastaReadConfig::default());
    }

    #[test]
    fn test_show_text() {
        let (res, text) = show(">a\nAC\nGT\n>b\nMKV\n", &settings(&["fastaread"]));
        assert_eq!(res.unwrap(), 2);
        insta::assert_snapshot!(text.trim_end(), @r"
        >a
        ACGT
        4
        Nucleotide

        >b
        MKV
        3
        Protein
        ");
    }

    #[test]
    fn test_show_json() {
        let (res, text) = show(">a\nACGT\n", &settings(&["fastaread", "--json"]));
        assert_eq!(res.unwrap(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(
            value,
            json!({"tag": "a", "sequence": "ACGT", "length": 4, "alphabet": "Nucleotide"})
        );
    }

    #[test]
    fn test_show_stops_before_bad_record() {
        let two = settings(&["fastaread", "-n", "2"]);
        let (res, text) = show(">a\nAC\n>b\nGT\n>\nTT\n", &two);
        assert_eq!(res.unwrap(), 2);
        assert!(text.contains(">b\nGT\n"));
    }

    #[test]
    fn test_show_reports_error() {
        let (res, text) = show(">a\nAC\n>b\n>c\nTT\n", &settings(&["fastaread"]));
        assert!(matches!(res, Err(FastaError::EmptySequence { .. })));
        // The record before the error is still shown
        assert!(text.starts_with(">a\nAC\n"));
    }

    #[test]
    fn test_show_tag_match() {
        let text = ">chr1\nACGT\n>scaffold_7\nACGT\n>chr2\nTTTT\n>chr3\nGGGG\n";
        let (res, out) = show(text, &settings(&["fastaread", "-m", "^chr", "-n", "2"]));
        assert_eq!(res.unwrap(), 2);
        assert!(out.contains(">chr1"));
        assert!(out.contains(">chr2"));
        assert!(!out.contains("scaffold"));
        assert!(!out.contains(">chr3"));
    }

    #[test]
    fn test_summary_text() {
        let summary = FileSummary {
            nb_records: 3,
            nb_residues: 30,
            nb_nucleotide: 3,
            nb_protein: 0,
        };
        let mut out: Vec<u8> = Vec::new();
        write_summary(&mut out, "data/test2.fas", &summary, false).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r"
        name: data/test2.fas
        nb_records: 3
        nb_residues: 30
        nb_nucleotide: 3
        nb_protein: 0
        ");
    }

    #[test]
    fn test_summary_json() {
        let summary = FileSummary {
            nb_records: 1,
            nb_residues: 4,
            nb_nucleotide: 1,
            nb_protein: 0,
        };
        let mut out: Vec<u8> = Vec::new();
        write_summary(&mut out, "x.fas", &summary, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "x.fas",
                "nb_records": 1,
                "nb_residues": 4,
                "nb_nucleotide": 1,
                "nb_protein": 0,
            })
        );
    }

    #[test]
    fn test_prompt_for_path() {
        let mut prompt: Vec<u8> = Vec::new();
        let path = prompt_for_path("  data/test1.fas \n".as_bytes(), &mut prompt);
        assert_eq!(path.unwrap(), "data/test1.fas");
        let prompt = String::from_utf8(prompt).unwrap();
        assert!(prompt.starts_with("Enter the path"));
    }

    #[test]
    fn test_prompt_for_path_empty() {
        let res = prompt_for_path("\n".as_bytes(), Vec::new());
        assert!(matches!(res, Err(FastaError::Format(_))));
    }
}
