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

//! End-to-end tests over synthetic Criterion output trees.

use critsum_core::{
    collect, summarize, BenchmarkKey, DisplayMode, LibraryCatalog, LibrarySelection,
    SummaryConfig, SummaryError,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ===== Test Helpers =====

/// Write a Criterion record below `root/<rel>/new`.
fn write_record(root: &Path, rel: &str, group_id: &str, function_id: &str, slope_ns: f64) {
    let dir = root.join(rel).join("new");
    fs::create_dir_all(&dir).expect("Failed to create record directory");
    let benchmark = serde_json::json!({
        "group_id": group_id,
        "function_id": function_id,
        "value_str": null,
        "throughput": null,
        "full_id": format!("{}/{}", group_id, function_id),
        "directory_name": rel,
        "title": format!("{}/{}", group_id, function_id),
    });
    let estimates = serde_json::json!({
        "mean": { "point_estimate": slope_ns * 1.01, "standard_error": 0.1 },
        "slope": {
            "confidence_interval": {
                "confidence_level": 0.95,
                "lower_bound": slope_ns * 0.99,
                "upper_bound": slope_ns * 1.01
            },
            "point_estimate": slope_ns,
            "standard_error": 0.1
        }
    });
    fs::write(dir.join("benchmark.json"), benchmark.to_string())
        .expect("Failed to write benchmark.json");
    fs::write(dir.join("estimates.json"), estimates.to_string())
        .expect("Failed to write estimates.json");
}

fn libs(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Find the rendered line of one benchmark row.
fn row<'a>(table: &'a str, key: &str) -> &'a str {
    table
        .lines()
        .find(|line| line.starts_with(&format!("| {} ", key)))
        .unwrap_or_else(|| panic!("no row for '{}' in:\n{}", key, table))
}

// ===== Scenarios =====

#[test]
fn test_end_to_end_threshold_scenario() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "mul/glam", "mul", "glam", 10.0);
    write_record(dir.path(), "mul/cgmath", "mul", "cgmath", 10.2);

    let config = SummaryConfig::new(dir.path(), libs(&["glam", "cgmath"]));
    let out = summarize(&config).unwrap();
    let line = row(&out, "mul");
    assert!(line.contains("__10.0000 ns__"));
    assert!(line.contains("__10.2000 ns__"));

    let strict = config.with_threshold_percent(1.0);
    let out = summarize(&strict).unwrap();
    let line = row(&out, "mul");
    assert!(line.contains("__10.0000 ns__"));
    assert!(line.contains("  10.2000 ns  "));
}

#[test]
fn test_parameterized_keys() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "add/nalgebra/4", "add", "nalgebra", 2.0);
    write_record(dir.path(), "add/nalgebra/16", "add", "nalgebra", 7.5);
    write_record(dir.path(), "add/glam/4", "add", "glam", 1.5);

    let table = collect(dir.path(), &libs(&["glam", "nalgebra"])).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(&BenchmarkKey::new("add x4"), "nalgebra"), Some(2.0));
    assert_eq!(table.value(&BenchmarkKey::new("add x4"), "glam"), Some(1.5));
    assert_eq!(table.value(&BenchmarkKey::new("add x16"), "nalgebra"), Some(7.5));
    assert_eq!(table.value(&BenchmarkKey::new("add x16"), "glam"), None);
}

#[test]
fn test_missing_combination_renders_na() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "quat mul/glam", "quat mul", "glam", 4.0);
    write_record(dir.path(), "quat mul/cgmath", "quat mul", "cgmath", 8.0);

    let config = SummaryConfig::new(dir.path(), libs(&["glam", "cgmath", "nalgebra"]));
    let out = summarize(&config).unwrap();
    let line = row(&out, "quat mul");
    assert!(line.contains("__4.0000 ns__"));
    assert!(line.contains("  8.0000 ns  "));
    assert!(line.contains("  N/A  "));
}

#[test]
fn test_row_local_units() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "mat4 inverse/glam", "mat4 inverse", "glam", 1500.0);
    write_record(dir.path(), "mat4 inverse/cgmath", "mat4 inverse", "cgmath", 900.0);
    write_record(dir.path(), "vec3 dot/glam", "vec3 dot", "glam", 1.25);
    write_record(dir.path(), "vec3 dot/cgmath", "vec3 dot", "cgmath", 1.5);

    let config = SummaryConfig::new(dir.path(), libs(&["glam", "cgmath"]));
    let out = summarize(&config).unwrap();

    let inverse = row(&out, "mat4 inverse");
    assert!(inverse.contains("  1.5 us  "));
    assert!(inverse.contains("__0.9 us__"));
    assert!(!inverse.contains(" ns"));

    let dot = row(&out, "vec3 dot");
    assert!(dot.contains("__1.2500 ns__"));
    assert!(dot.contains("  1.5000 ns  "));
}

#[test]
fn test_rows_sorted_by_key() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "vec3 length/glam", "vec3 length", "glam", 2.0);
    write_record(dir.path(), "affine3 inverse/glam", "affine3 inverse", "glam", 20.0);
    write_record(dir.path(), "mat2 det/glam", "mat2 det", "glam", 1.0);

    let config = SummaryConfig::new(dir.path(), libs(&["glam"]));
    let out = summarize(&config).unwrap();
    let keys: Vec<&str> = out
        .lines()
        .skip(2)
        .map(|line| line.trim_start_matches("| ").split(" |").next().unwrap().trim())
        .collect();
    assert_eq!(keys, vec!["affine3 inverse", "mat2 det", "vec3 length"]);
}

#[test]
fn test_single_library_disables_highlighting() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "vec3 length/glam", "vec3 length", "glam", 2.0);
    write_record(dir.path(), "mat4 mul/glam", "mat4 mul", "glam", 9.0);

    let config = SummaryConfig::new(dir.path(), libs(&["glam"]));
    let out = summarize(&config).unwrap();
    assert!(!out.contains("__"));
}

#[test]
fn test_wide_and_scalar_partitions() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "vec3 length/glam_f32x1", "vec3 length", "glam_f32x1", 2.0);
    write_record(
        dir.path(),
        "wide euler 3d/glam_f32x1/80000",
        "wide euler 3d",
        "glam_f32x1",
        95000.0,
    );
    write_record(
        dir.path(),
        "wide euler 3d/ultraviolet_f32x4/80000",
        "wide euler 3d",
        "ultraviolet_f32x4",
        30000.0,
    );

    let selection = LibrarySelection {
        all_wide: true,
        ..Default::default()
    };
    let libraries = LibraryCatalog::default().resolve(&selection).unwrap();
    let wide = SummaryConfig::new(dir.path(), libraries.clone()).with_mode(selection.display_mode());
    let out = summarize(&wide).unwrap();
    assert!(out.contains("wide euler 3d x80000"));
    assert!(!out.contains("vec3 length"));
    assert!(row(&out, "wide euler 3d x80000").contains("__30 us__"));

    let scalar = SummaryConfig::new(dir.path(), libraries).with_mode(DisplayMode::Scalar);
    let out = summarize(&scalar).unwrap();
    assert!(out.contains("vec3 length"));
    assert!(!out.contains("wide euler"));
}

#[test]
fn test_report_directory_ignored() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "report/glam", "report", "glam", 1.0);
    write_record(dir.path(), "vec2 add/glam", "vec2 add", "glam", 1.0);

    let table = collect(dir.path(), &libs(&["glam"])).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.get(&BenchmarkKey::new("report")).is_none());
}

#[test]
fn test_empty_tree_renders_empty_table() {
    let dir = TempDir::new().unwrap();
    let config = SummaryConfig::new(dir.path(), libs(&["glam", "cgmath"]));
    let out = summarize(&config).unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains("benchmark"));
}

#[test]
fn test_empty_selection_renders_empty_table() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "vec2 add/glam", "vec2 add", "glam", 1.0);

    let config = SummaryConfig::new(dir.path(), Vec::new());
    let out = summarize(&config).unwrap();
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_missing_root_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config = SummaryConfig::new(dir.path().join("criterion"), libs(&["glam"]));
    let err = summarize(&config).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("doesn't exist"));
}

#[test]
fn test_malformed_record_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "vec2 add/glam", "vec2 add", "glam", 1.0);
    fs::write(
        dir.path().join("vec2 add/glam/new/estimates.json"),
        r#"{"mean":{"point_estimate":1.0}}"#,
    )
    .unwrap();

    let config = SummaryConfig::new(dir.path(), libs(&["glam"]));
    let err = summarize(&config).unwrap_err();
    assert!(matches!(err, SummaryError::Data { .. }));
}

#[test]
fn test_partial_record_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "vec2 add/glam", "vec2 add", "glam", 1.0);
    write_record(dir.path(), "vec2 add/cgmath", "vec2 add", "cgmath", 1.0);
    fs::remove_file(dir.path().join("vec2 add/cgmath/new/estimates.json")).unwrap();

    let table = collect(dir.path(), &libs(&["glam", "cgmath"])).unwrap();
    assert_eq!(table.value(&BenchmarkKey::new("vec2 add"), "glam"), Some(1.0));
    assert_eq!(table.value(&BenchmarkKey::new("vec2 add"), "cgmath"), None);
}

#[test]
fn test_invalid_threshold_rejected_before_reading() {
    let dir = TempDir::new().unwrap();
    let config = SummaryConfig::new(dir.path().join("missing"), libs(&["glam"]))
        .with_threshold_percent(-5.0);
    let err = summarize(&config).unwrap_err();
    assert!(err.to_string().contains("threshold"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    for (lib, ns) in [("glam", 3.0), ("cgmath", 3.05), ("nalgebra", 4.0), ("euclid", 3.2)] {
        write_record(dir.path(), &format!("quat slerp/{}", lib), "quat slerp", lib, ns);
        write_record(dir.path(), &format!("mat3 mul/{}/8", lib), "mat3 mul", lib, ns * 500.0);
    }

    let config = SummaryConfig::new(dir.path(), libs(&["glam", "cgmath", "nalgebra", "euclid"]));
    let first = summarize(&config).unwrap();
    let second = summarize(&config).unwrap();
    assert_eq!(first, second);
}
