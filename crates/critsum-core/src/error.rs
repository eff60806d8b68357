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

//! Structured error types for summary generation.
//!
//! Every fatal condition of the pipeline maps to one [`SummaryError`] variant.
//! A record that simply does not exist on disk is *not* an error: the record
//! parser reports it as `Ok(None)` and the caller skips it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// The main error type for summary generation.
///
/// # Examples
///
/// ```rust
/// use critsum_core::SummaryError;
///
/// let err = SummaryError::configuration("invalid choice: 'foo'");
/// assert_eq!(err.to_string(), "Configuration error: invalid choice: 'foo'");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// Invalid library selection, missing results directory, bad threshold
    /// or unusable catalog file.
    ///
    /// Raised before any record is read.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A record file exists but does not have the expected structure.
    #[error("Malformed record '{path}': {message}")]
    Data {
        /// The offending file
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// I/O failure other than a missing record file.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path being read or listed
        path: PathBuf,
        /// The error message
        message: String,
    },
}

impl SummaryError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a data error for a malformed record file.
    pub fn data(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Data {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create an I/O error with path context.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use critsum_core::SummaryError;
    /// use std::fs;
    ///
    /// let result = fs::read_to_string("estimates.json")
    ///     .map_err(|e| SummaryError::io_error("estimates.json", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns true for errors raised before aggregation started.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
