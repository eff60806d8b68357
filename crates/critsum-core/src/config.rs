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

//! Run configuration: which libraries to compare, where the results live and
//! how close to the fastest a value must be to count as a tie.
//!
//! Nothing here is global. The library catalog is a plain value handed to
//! [`LibraryCatalog::resolve`], so callers can summarize any benchmark suite.

use crate::error::{Result, SummaryError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default highlight threshold, in percent above the row minimum.
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 2.5;

/// Environment variable overriding the default results directory.
pub const CRITERION_DIR_ENV: &str = "CRITSUM_CRITERION_DIR";

/// Results directory used when neither `--dir` nor the environment is set.
pub const DEFAULT_CRITERION_DIR: &str = "target/criterion";

/// Substring marking a benchmark key as a SIMD ("wide") variant.
pub const WIDE_MARKER: &str = "wide";

/// Which partition of the benchmark keys gets rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Keys without the wide marker.
    #[default]
    Scalar,
    /// Keys containing the wide marker.
    Wide,
}

impl DisplayMode {
    /// Returns true if `key` belongs to this partition.
    pub fn includes(self, key: &str) -> bool {
        let is_wide = key.contains(WIDE_MARKER);
        match self {
            DisplayMode::Scalar => !is_wide,
            DisplayMode::Wide => is_wide,
        }
    }
}

/// The set of libraries a benchmark suite compares.
///
/// The allowed names are the union of the three lists, in order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryCatalog {
    /// Default selection for scalar benchmarks.
    pub scalar: Vec<String>,
    /// Default selection for wide benchmarks.
    pub wide: Vec<String>,
    /// Libraries only shown when named explicitly or with `--all`.
    #[serde(default)]
    pub optional: Vec<String>,
}

impl Default for LibraryCatalog {
    fn default() -> Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }

        Self {
            scalar: owned(&[
                "glam",
                "cgmath",
                "nalgebra",
                "euclid",
                "vek",
                "pathfinder",
                "static-math",
                "ultraviolet",
            ]),
            wide: owned(&[
                "glam_f32x1",
                "ultraviolet_f32x4",
                "nalgebra_f32x4",
                "ultraviolet_f32x8",
                "nalgebra_f32x8",
            ]),
            optional: owned(&[
                "ultraviolet_f64",
                "ultraviolet_f64x2",
                "ultraviolet_f64x4",
                "nalgebra_f64",
                "nalgebra_f64x2",
                "nalgebra_f64x4",
                "nalgebra_f64x8",
                "nalgebra_f32x16",
            ]),
        }
    }
}

impl LibraryCatalog {
    /// Load a catalog from a JSON file.
    ///
    /// The file holds `{"scalar": [...], "wide": [...], "optional": [...]}`;
    /// `optional` may be left out.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Configuration`] if the file cannot be read or
    /// does not have that shape.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SummaryError::configuration(format!(
                "cannot read catalog '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content).map_err(|e| match e {
            SummaryError::Configuration(msg) => SummaryError::configuration(format!(
                "catalog '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| SummaryError::configuration(format!("invalid catalog: {}", e)))
    }

    /// All selectable library names, deduplicated, in catalog order.
    pub fn choices(&self) -> Vec<&str> {
        let mut choices: Vec<&str> = Vec::new();
        for name in self.scalar.iter().chain(&self.wide).chain(&self.optional) {
            if !choices.contains(&name.as_str()) {
                choices.push(name);
            }
        }
        choices
    }

    /// Returns true if `name` may be selected.
    pub fn contains(&self, name: &str) -> bool {
        self.scalar
            .iter()
            .chain(&self.wide)
            .chain(&self.optional)
            .any(|n| n == name)
    }

    /// Turn a user selection into the ordered list of columns to render.
    ///
    /// Explicit names come first, then the scalar set (`all_scalar` or
    /// `all`), the wide set (`all_wide` or `all`) and the optional set
    /// (`all`). An empty selection falls back to the defaults of the
    /// selection's display mode. Duplicates keep their first position.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Configuration`] for a name outside the catalog.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use critsum_core::{LibraryCatalog, LibrarySelection};
    ///
    /// let catalog = LibraryCatalog::default();
    /// let selection = LibrarySelection::named(["nalgebra", "glam", "nalgebra"]);
    /// assert_eq!(catalog.resolve(&selection).unwrap(), vec!["nalgebra", "glam"]);
    /// ```
    pub fn resolve(&self, selection: &LibrarySelection) -> Result<Vec<String>> {
        if let Some(bad) = selection.libs.iter().find(|name| !self.contains(name)) {
            let choices: Vec<String> = self
                .choices()
                .iter()
                .map(|c| format!("'{}'", c))
                .collect();
            return Err(SummaryError::configuration(format!(
                "invalid choice: '{}' (choose from {})",
                bad,
                choices.join(", ")
            )));
        }

        let mut requested: Vec<&String> = selection.libs.iter().collect();
        if selection.all || selection.all_scalar {
            requested.extend(&self.scalar);
        }
        if selection.all || selection.all_wide {
            requested.extend(&self.wide);
        }
        if selection.all {
            requested.extend(&self.optional);
        }
        if requested.is_empty() {
            requested.extend(match selection.display_mode() {
                DisplayMode::Scalar => &self.scalar,
                DisplayMode::Wide => &self.wide,
            });
        }

        let mut libs: Vec<String> = Vec::with_capacity(requested.len());
        for name in requested {
            if !libs.contains(name) {
                libs.push(name.clone());
            }
        }
        Ok(libs)
    }
}

/// Libraries and convenience flags as collected by the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySelection {
    /// Explicitly named libraries, in the order given.
    pub libs: Vec<String>,
    /// Add the catalog's scalar set.
    pub all_scalar: bool,
    /// Add the catalog's wide set and show wide benchmarks.
    pub all_wide: bool,
    /// Add every library in the catalog.
    pub all: bool,
    /// Show wide benchmarks instead of scalar ones.
    pub wide: bool,
}

impl LibrarySelection {
    /// A selection of explicitly named libraries and no flags.
    pub fn named<I, S>(libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            libs: libs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Wide benchmarks are shown when asked for directly or via `all_wide`.
    pub fn display_mode(&self) -> DisplayMode {
        if self.wide || self.all_wide {
            DisplayMode::Wide
        } else {
            DisplayMode::Scalar
        }
    }
}

/// Everything the pipeline needs for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    /// The Criterion output directory (usually `target/criterion`).
    pub root: PathBuf,
    /// Resolved library columns, in display order.
    pub libraries: Vec<String>,
    /// Highlight tolerance in percent above the row minimum.
    pub threshold_percent: f64,
    /// Which partition of benchmark keys to render.
    pub mode: DisplayMode,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            root: default_criterion_dir(),
            libraries: LibraryCatalog::default().scalar,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            mode: DisplayMode::Scalar,
        }
    }
}

impl SummaryConfig {
    /// Create a configuration for `root` comparing `libraries`.
    pub fn new(root: impl Into<PathBuf>, libraries: Vec<String>) -> Self {
        Self {
            root: root.into(),
            libraries,
            ..Default::default()
        }
    }

    /// Set the highlight threshold in percent.
    pub fn with_threshold_percent(mut self, threshold_percent: f64) -> Self {
        self.threshold_percent = threshold_percent;
        self
    }

    /// Set the display mode.
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// The ratio to the row minimum up to which a value is highlighted.
    pub fn threshold_ratio(&self) -> f64 {
        1.0 + self.threshold_percent / 100.0
    }

    /// Check the threshold is a finite, non-negative percentage.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Configuration`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_percent.is_finite() || self.threshold_percent < 0.0 {
            return Err(SummaryError::configuration(format!(
                "threshold must be a non-negative percentage, got {}",
                self.threshold_percent
            )));
        }
        Ok(())
    }
}

/// The results directory from `CRITSUM_CRITERION_DIR`, or `target/criterion`.
pub fn default_criterion_dir() -> PathBuf {
    std::env::var_os(CRITERION_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CRITERION_DIR))
}
