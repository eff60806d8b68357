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

//! Comparison table rendering.
//!
//! One row per benchmark key, sorted by key, one column per library. Each row
//! picks its own unit and highlights every value within the threshold of the
//! row's fastest library:
//!
//! ```text
//! | benchmark   |      glam      |     cgmath     |
//! |-------------|----------------|----------------|
//! | mat4 mul    | __8.1234 ns__  |   9.0010 ns    |
//! | wide euler  |  __12.5 us__   |     N/A        |
//! ```
//!
//! The output is a valid Markdown table.

use crate::aggregate::{LibraryValues, ResultTable};
use crate::record::BenchmarkKey;
use prettytable::format::{Alignment, FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{Cell, Row, Table};
use std::fmt;

/// Rows whose largest value reaches this many nanoseconds are shown in µs.
pub const MICROSECOND_CUTOFF_NS: f64 = 1000.0;

/// Placeholder for a library without a record for the row.
pub const MISSING: &str = "N/A";

/// Title of the leading column.
pub const BENCHMARK_COLUMN: &str = "benchmark";

/// Display unit of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Nanoseconds, four decimals.
    Nanoseconds,
    /// Microseconds, four significant digits.
    Microseconds,
}

impl Unit {
    /// Pick the unit for a row from its largest value.
    pub fn for_row_max(max_value: f64) -> Self {
        if max_value >= MICROSECOND_CUTOFF_NS {
            Unit::Microseconds
        } else {
            Unit::Nanoseconds
        }
    }

    /// Unit suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Nanoseconds => "ns",
            Unit::Microseconds => "us",
        }
    }

    /// Format a nanosecond value in this unit, suffix included.
    pub fn format(self, value_ns: f64) -> String {
        match self {
            Unit::Nanoseconds => format!("{:.4} {}", value_ns, self.suffix()),
            Unit::Microseconds => format!(
                "{} {}",
                format_significant(value_ns / 1000.0, 4),
                self.suffix()
            ),
        }
    }
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultCell {
    /// The library has no record for this row.
    Missing,
    /// A measured value.
    Value {
        /// Slope estimate in nanoseconds
        value: f64,
        /// Unit chosen for the row
        unit: Unit,
        /// Within the threshold of the row minimum
        highlighted: bool,
    },
}

impl ResultCell {
    /// Returns true for a highlighted value.
    pub fn is_highlighted(&self) -> bool {
        matches!(
            self,
            ResultCell::Value {
                highlighted: true,
                ..
            }
        )
    }
}

impl fmt::Display for ResultCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCell::Missing => write!(f, "  {}  ", MISSING),
            ResultCell::Value {
                value,
                unit,
                highlighted: true,
            } => write!(f, "__{}__", unit.format(*value)),
            ResultCell::Value {
                value,
                unit,
                highlighted: false,
            } => write!(f, "  {}  ", unit.format(*value)),
        }
    }
}

/// Renders a [`ResultTable`] for a fixed list of library columns.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    libraries: Vec<String>,
    threshold_ratio: f64,
}

impl TableRenderer {
    /// Create a renderer for `libraries` (column order) highlighting values
    /// up to `threshold_percent` above the row minimum.
    pub fn new(libraries: Vec<String>, threshold_percent: f64) -> Self {
        Self {
            libraries,
            threshold_ratio: 1.0 + threshold_percent / 100.0,
        }
    }

    /// The library columns, in order.
    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    /// Compute the cells of one row.
    ///
    /// Only selected libraries present in `values` count towards the row's
    /// minimum and maximum. With a single library column nothing is
    /// highlighted.
    pub fn row_cells(&self, values: &LibraryValues) -> Vec<ResultCell> {
        let present: Vec<f64> = self
            .libraries
            .iter()
            .filter_map(|lib| values.get(lib).copied())
            .collect();
        let max_value = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_value = present.iter().copied().fold(f64::INFINITY, f64::min);

        let unit = Unit::for_row_max(max_value);
        let highlight = self.libraries.len() > 1;

        self.libraries
            .iter()
            .map(|lib| match values.get(lib) {
                None => ResultCell::Missing,
                Some(&value) => ResultCell::Value {
                    value,
                    unit,
                    highlighted: highlight && self.is_tied(value, min_value),
                },
            })
            .collect()
    }

    fn is_tied(&self, value: f64, min_value: f64) -> bool {
        if min_value > 0.0 {
            value / min_value <= self.threshold_ratio
        } else {
            value <= min_value
        }
    }

    /// Render the whole table, rows sorted by benchmark key.
    pub fn render(&self, table: &ResultTable) -> String {
        let mut out = Table::new();
        out.set_format(markdown_format());

        let mut titles = vec![Cell::new_align(BENCHMARK_COLUMN, Alignment::LEFT)];
        titles.extend(
            self.libraries
                .iter()
                .map(|lib| Cell::new_align(&format!("  {}  ", lib), Alignment::RIGHT)),
        );
        out.set_titles(Row::new(titles));

        let mut keys: Vec<&BenchmarkKey> = table.keys().collect();
        keys.sort();

        let empty = LibraryValues::new();
        for key in keys {
            let values = table.get(key).unwrap_or(&empty);
            let mut cells = vec![Cell::new_align(key.as_str(), Alignment::LEFT)];
            cells.extend(
                self.row_cells(values)
                    .iter()
                    .map(|cell| Cell::new_align(&cell.to_string(), Alignment::RIGHT)),
            );
            out.add_row(Row::new(cells));
        }

        out.to_string()
    }
}

/// Pipe-separated table with a dashed rule under the titles only.
fn markdown_format() -> TableFormat {
    FormatBuilder::new()
        .padding(1, 1)
        .borders('|')
        .column_separator('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .build()
}

/// Format `value` with `digits` significant digits, like C's `%.{digits}g`.
///
/// Trailing zeros are removed; exponent notation is used when the decimal
/// exponent is below -4 or at least `digits`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
