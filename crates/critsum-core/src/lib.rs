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

//! Comparison tables from Criterion benchmark results.
//!
//! This crate turns the `target/criterion` tree left behind by a set of
//! benchmarks comparing several libraries into one table: a row per
//! benchmark case, a column per library, and the fastest values of each row
//! highlighted.
//!
//! # Pipeline
//!
//! ```text
//! locate ──▶ parse_record ──▶ ResultTable ──▶ TableRenderer
//! (locator)   (record)         (aggregate)     (render)
//! ```
//!
//! - [`locator`]: finds `new/` directories per group, library and input size
//! - [`record`]: reads `benchmark.json` + `estimates.json` into a key and a
//!   slope estimate, or `None` when the record is absent
//! - [`aggregate`]: sparse key → library → value map
//! - [`render`]: per-row units, threshold highlighting, sorted Markdown table
//!
//! # Examples
//!
//! ```no_run
//! use critsum_core::{summarize, LibraryCatalog, LibrarySelection, SummaryConfig};
//!
//! # fn main() -> critsum_core::Result<()> {
//! let selection = LibrarySelection::named(["glam", "cgmath", "nalgebra"]);
//! let libraries = LibraryCatalog::default().resolve(&selection)?;
//! let config = SummaryConfig::new("target/criterion", libraries)
//!     .with_mode(selection.display_mode());
//!
//! print!("{}", summarize(&config)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Missing record files are expected and skipped. A missing results
//! directory, an unknown library or a malformed record file stops the run
//! with a [`SummaryError`].

pub mod aggregate;
pub mod config;
mod error;
pub mod locator;
pub mod record;
pub mod render;

pub use aggregate::{LibraryValues, ResultTable};
pub use config::{
    default_criterion_dir, DisplayMode, LibraryCatalog, LibrarySelection, SummaryConfig,
    DEFAULT_THRESHOLD_PERCENT,
};
pub use error::{Result, SummaryError};
pub use locator::{locate, ResultLocation};
pub use record::{parse_record, BenchmarkKey, Record};
pub use render::{ResultCell, TableRenderer, Unit};

use std::path::Path;
use tracing::info;

/// Collect every record for `libraries` below `root`.
///
/// # Errors
///
/// Propagates locator and record errors; absent records are skipped.
pub fn collect(root: &Path, libraries: &[String]) -> Result<ResultTable> {
    let mut table = ResultTable::new();
    let mut records = 0usize;
    for location in locate(root, libraries)? {
        if let Some(record) = parse_record(&location)? {
            table.insert_record(record);
            records += 1;
        }
    }
    info!(records, benchmarks = table.len(), "aggregated results");
    Ok(table)
}

/// Run the whole pipeline and return the rendered table.
///
/// # Errors
///
/// Returns [`SummaryError::Configuration`] for an invalid threshold or a
/// missing root directory, and [`SummaryError::Data`] / [`SummaryError::Io`]
/// for unreadable records.
pub fn summarize(config: &SummaryConfig) -> Result<String> {
    config.validate()?;
    let table = collect(&config.root, &config.libraries)?.partition(config.mode);
    let renderer = TableRenderer::new(config.libraries.clone(), config.threshold_percent);
    Ok(renderer.render(&table))
}
