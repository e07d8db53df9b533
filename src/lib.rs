pub mod config;
pub mod errors;
mod runner;
pub mod seq;

use crate::errors::FastaError;

pub use crate::seq::fasta::{read_fasta_file, FastaReader, Records};
pub use crate::seq::record::{Alphabet, SeqRecord};

pub fn run() -> Result<(), FastaError> {
    runner::run()
}
