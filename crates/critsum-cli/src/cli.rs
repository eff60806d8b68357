// Dweve Critsum - Criterion benchmark comparison tables
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line arguments and their translation into a [`SummaryConfig`].

use crate::error::CliError;
use clap::Parser;
use critsum_core::{
    default_criterion_dir, summarize, LibraryCatalog, LibrarySelection, SummaryConfig,
    DEFAULT_THRESHOLD_PERCENT,
};
use std::io::{self, Write};
use std::path::PathBuf;

/// Summarize Criterion benchmark results as a comparison table
///
/// Reads the latest results of every benchmark group for the selected
/// libraries and prints one row per benchmark, highlighting the values
/// within the threshold of the fastest.
///
/// # Examples
///
/// ```bash
/// # Default scalar libraries
/// critsum
///
/// # Pick libraries and a stricter tie threshold
/// critsum glam nalgebra --threshold 1
///
/// # Every wide (SIMD) library on wide benchmarks
/// critsum --all-wide
/// ```
#[derive(Parser, Debug)]
#[command(name = "critsum")]
#[command(author, version, about = "Critsum - Criterion benchmark comparison tables", long_about = None)]
pub struct Cli {
    /// Libraries to compare, in column order
    #[arg(value_name = "LIB")]
    pub libs: Vec<String>,

    /// Show wide (SIMD) benchmarks instead of scalar ones
    #[arg(long)]
    pub wide: bool,

    /// Add every default scalar library
    #[arg(short = 's', long)]
    pub all_scalar: bool,

    /// Add every default wide library (implies --wide)
    #[arg(short = 'w', long)]
    pub all_wide: bool,

    /// Add every known library
    #[arg(short, long)]
    pub all: bool,

    /// Highlight values within this many percent of the fastest
    #[arg(short, long, value_name = "PCT", default_value_t = DEFAULT_THRESHOLD_PERCENT)]
    pub threshold: f64,

    /// Criterion output directory [default: $CRITSUM_CRITERION_DIR or target/criterion]
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// JSON file listing the selectable libraries
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Log discovery details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The library selection expressed by the arguments.
    pub fn selection(&self) -> LibrarySelection {
        LibrarySelection {
            libs: self.libs.clone(),
            all_scalar: self.all_scalar,
            all_wide: self.all_wide,
            all: self.all,
            wide: self.wide,
        }
    }

    /// Resolve the arguments into a pipeline configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable catalog file or an unknown library.
    pub fn config(&self) -> Result<SummaryConfig, CliError> {
        let catalog = match &self.catalog {
            Some(path) => LibraryCatalog::from_json_file(path)?,
            None => LibraryCatalog::default(),
        };
        let selection = self.selection();
        let libraries = catalog.resolve(&selection)?;
        let root = self.dir.clone().unwrap_or_else(default_criterion_dir);

        Ok(SummaryConfig::new(root, libraries)
            .with_threshold_percent(self.threshold)
            .with_mode(selection.display_mode()))
    }

    /// Build the table and print it to stdout.
    ///
    /// # Errors
    ///
    /// Returns any configuration, record or output error.
    pub fn execute(&self) -> Result<(), CliError> {
        let table = summarize(&self.config()?)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(table.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
