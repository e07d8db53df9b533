// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use fastaread::errors::FastaError;

fn main() -> Result<(), FastaError> {
    fastaread::run()
}
