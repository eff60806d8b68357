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

//! Discovery of result records in a Criterion output tree.
//!
//! Criterion writes one directory per benchmark group, one directory per
//! function inside it, and the latest run under `new/`:
//!
//! ```text
//! target/criterion/
//! ├── report/                      (ignored)
//! ├── vec3 length/
//! │   └── glam/new/{benchmark,estimates}.json
//! └── wide euler 3d/
//!     └── ultraviolet_f32x4/
//!         ├── 80000/new/{benchmark,estimates}.json
//!         └── report/              (ignored)
//! ```
//!
//! [`locate`] classifies every candidate once into a [`ResultLocation`].

use crate::error::{Result, SummaryError};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Top-level entry holding Criterion's HTML report, never a benchmark group.
pub const REPORT_DIR: &str = "report";

/// Subdirectory holding the most recent run of a benchmark.
pub const LATEST_RUN_DIR: &str = "new";

/// Where one (group, library[, size]) record lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultLocation {
    /// A plain `bench_function` result.
    Unparameterized {
        /// Library the result belongs to
        library: String,
        /// The `new/` directory
        path: PathBuf,
    },
    /// One input size of a `bench_with_input` result.
    Parameterized {
        /// Library the result belongs to
        library: String,
        /// Input size taken from the directory name
        size: u64,
        /// The `new/` directory
        path: PathBuf,
    },
}

impl ResultLocation {
    /// The library this record belongs to.
    pub fn library(&self) -> &str {
        match self {
            ResultLocation::Unparameterized { library, .. }
            | ResultLocation::Parameterized { library, .. } => library,
        }
    }

    /// The directory holding `benchmark.json` and `estimates.json`.
    pub fn path(&self) -> &Path {
        match self {
            ResultLocation::Unparameterized { path, .. }
            | ResultLocation::Parameterized { path, .. } => path,
        }
    }

    /// The input size, if this is a parameterized result.
    pub fn size(&self) -> Option<u64> {
        match self {
            ResultLocation::Unparameterized { .. } => None,
            ResultLocation::Parameterized { size, .. } => Some(*size),
        }
    }
}

/// Find every candidate record for `libraries` below `root`.
///
/// Groups are visited in file-name order. Libraries that were not benchmarked
/// for a group are skipped. The returned locations may still lack their
/// record files; the record parser decides that.
///
/// # Errors
///
/// Returns [`SummaryError::Configuration`] if `root` is not a directory and
/// [`SummaryError::Io`] if a directory cannot be listed.
pub fn locate(root: &Path, libraries: &[String]) -> Result<Vec<ResultLocation>> {
    if !root.is_dir() {
        return Err(SummaryError::configuration(format!(
            "'{}' directory doesn't exist, run `cargo bench` first.",
            root.display()
        )));
    }

    let mut locations = Vec::new();
    for group_dir in child_dirs(root)? {
        if group_dir.file_name().is_some_and(|name| name == REPORT_DIR) {
            continue;
        }
        for library in libraries {
            let library_dir = group_dir.join(library);
            if !library_dir.is_dir() {
                continue;
            }
            classify(&library_dir, library, &mut locations)?;
        }
    }

    debug!(
        root = %root.display(),
        candidates = locations.len(),
        "located result directories"
    );
    Ok(locations)
}

/// Sort one library directory into plain and per-size results.
fn classify(library_dir: &Path, library: &str, out: &mut Vec<ResultLocation>) -> Result<()> {
    let latest = library_dir.join(LATEST_RUN_DIR);
    if latest.is_dir() {
        out.push(ResultLocation::Unparameterized {
            library: library.to_string(),
            path: latest,
        });
    }

    for size_dir in child_dirs(library_dir)? {
        let name = size_dir.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match name.parse::<u64>() {
            Ok(size) => out.push(ResultLocation::Parameterized {
                library: library.to_string(),
                size,
                path: size_dir.join(LATEST_RUN_DIR),
            }),
            Err(_) => {
                if name != LATEST_RUN_DIR {
                    debug!(dir = %size_dir.display(), "ignoring non-numeric directory");
                }
            }
        }
    }
    Ok(())
}

/// Immediate subdirectories of `dir`, sorted by name.
fn child_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => SummaryError::io_error(path, io),
                None => SummaryError::Io {
                    path,
                    message: "filesystem loop detected".to_string(),
                },
            }
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}
