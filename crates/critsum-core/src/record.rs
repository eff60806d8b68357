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

//! Reading one Criterion result record.
//!
//! A record is the pair `benchmark.json` / `estimates.json` inside a `new/`
//! directory. Field names are dictated by Criterion and matched exactly.

use crate::error::{Result, SummaryError};
use crate::locator::ResultLocation;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Metadata file written by Criterion for every benchmark.
pub const BENCHMARK_FILE: &str = "benchmark.json";

/// Statistics file written by Criterion for every benchmark.
pub const ESTIMATES_FILE: &str = "estimates.json";

/// Identity of one logical benchmark case, e.g. `"vec3 length"` or
/// `"wide euler 3d x80000"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BenchmarkKey(String);

impl BenchmarkKey {
    /// Key for an unparameterized benchmark.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self(group_id.into())
    }

    /// Key for one input size of a parameterized benchmark: `"{group} x{size}"`.
    ///
    /// ```rust
    /// use critsum_core::BenchmarkKey;
    ///
    /// assert_eq!(BenchmarkKey::with_size("add", 4).as_str(), "add x4");
    /// ```
    pub fn with_size(group_id: &str, size: u64) -> Self {
        Self(format!("{} x{}", group_id, size))
    }

    /// The key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BenchmarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BenchmarkKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// One parsed record: a key, the library and its slope estimate in ns.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Benchmark identity
    pub key: BenchmarkKey,
    /// Library that produced the value
    pub library: String,
    /// Slope point estimate in nanoseconds
    pub value: f64,
}

#[derive(Debug, Deserialize)]
struct BenchmarkInfo {
    group_id: String,
    function_id: Option<String>,
    value_str: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Estimates {
    slope: Estimate,
}

#[derive(Debug, Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Parse the record at `location`.
///
/// Returns `Ok(None)` when either file is missing, which is what a partial
/// benchmark run looks like.
///
/// # Errors
///
/// Returns [`SummaryError::Data`] if a file exists but is not valid JSON,
/// lacks `group_id` or `slope.point_estimate`, or holds a negative estimate,
/// and [`SummaryError::Io`] for any other read failure.
pub fn parse_record(location: &ResultLocation) -> Result<Option<Record>> {
    let dir = location.path();

    let Some(info) = read_json::<BenchmarkInfo>(&dir.join(BENCHMARK_FILE))? else {
        debug!(dir = %dir.display(), "no benchmark metadata, skipping");
        return Ok(None);
    };
    let estimates_path = dir.join(ESTIMATES_FILE);
    let Some(estimates) = read_json::<Estimates>(&estimates_path)? else {
        debug!(dir = %dir.display(), "no estimates, skipping");
        return Ok(None);
    };

    let value = estimates.slope.point_estimate;
    if !value.is_finite() || value < 0.0 {
        return Err(SummaryError::data(
            estimates_path,
            format!("slope point estimate must be a non-negative number, got {}", value),
        ));
    }

    debug!(
        group = %info.group_id,
        function = info.function_id.as_deref().unwrap_or(""),
        value = info.value_str.as_deref().unwrap_or(""),
        library = location.library(),
        estimate_ns = value,
        "parsed record"
    );

    let key = match location.size() {
        Some(size) => BenchmarkKey::with_size(&info.group_id, size),
        None => BenchmarkKey::new(info.group_id),
    };

    Ok(Some(Record {
        key,
        library: location.library().to_string(),
        value,
    }))
}

/// Read and decode a JSON file, mapping "not found" to `None`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SummaryError::io_error(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| SummaryError::data(path, e.to_string()))
}
