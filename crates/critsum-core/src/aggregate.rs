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

//! In-memory merge of parsed records.

use crate::config::DisplayMode;
use crate::record::{BenchmarkKey, Record};
use std::collections::HashMap;

/// Per-library values of one benchmark key, in nanoseconds.
pub type LibraryValues = HashMap<String, f64>;

/// Sparse mapping from benchmark key to per-library values.
///
/// Keys are remembered in the order they were first inserted. A
/// (key, library) pair holds at most one value; inserting it again replaces
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    order: Vec<BenchmarkKey>,
    values: HashMap<BenchmarkKey, LibraryValues>,
}

impl ResultTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for (`key`, `library`), returning the value it replaced.
    pub fn insert(
        &mut self,
        key: BenchmarkKey,
        library: impl Into<String>,
        value: f64,
    ) -> Option<f64> {
        if !self.values.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.values
            .entry(key)
            .or_default()
            .insert(library.into(), value)
    }

    /// Store a parsed record.
    pub fn insert_record(&mut self, record: Record) -> Option<f64> {
        self.insert(record.key, record.library, record.value)
    }

    /// All values recorded for `key`.
    pub fn get(&self, key: &BenchmarkKey) -> Option<&LibraryValues> {
        self.values.get(key)
    }

    /// The value for one (key, library) pair.
    pub fn value(&self, key: &BenchmarkKey, library: &str) -> Option<f64> {
        self.values.get(key)?.get(library).copied()
    }

    /// Known keys in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &BenchmarkKey> {
        self.order.iter()
    }

    /// Number of benchmark keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no record was inserted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// A copy holding only the keys of one display partition.
    pub fn partition(&self, mode: DisplayMode) -> ResultTable {
        let mut table = ResultTable::new();
        for key in self.order.iter().filter(|k| mode.includes(k.as_str())) {
            if let Some(values) = self.values.get(key) {
                table.order.push(key.clone());
                table.values.insert(key.clone(), values.clone());
            }
        }
        table
    }
}

impl FromIterator<Record> for ResultTable {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut table = ResultTable::new();
        for record in iter {
            table.insert_record(record);
        }
        table
    }
}
