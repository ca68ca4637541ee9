// Ovcomp - Overhead Compensation Reporting
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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn ovcomp_cmd() -> Command {
    Command::cargo_bin("ovcomp").expect("Failed to find ovcomp binary")
}

fn write_benchmark(dir: &Path, name: &str, reference: f64, profiled: f64) {
    let content = format!(
        r#"{{
  "benchmark": "{name}",
  "sampling_percent": 1.0,
  "phases": {{
    "total": {{ "reference": {reference}, "instrumented": {profiled}, "profiled": {profiled},
               "compensated": {reference}, "driver": [{profiled}, {profiled}] }},
    "ss-all": {{ "reference": {reference}, "instrumented": {reference}, "profiled": {profiled},
                "compensated": {reference} }}
  }}
}}"#
    );
    fs::write(dir.join(format!("{}.json", name)), content).expect("Failed to write input");
}

fn input_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_benchmark(dir.path(), "403.gcc", 10.0, 12.0);
    write_benchmark(dir.path(), "429.mcf", 20.0, 30.0);
    write_benchmark(dir.path(), "447.dealII", 5.0, 15.0);
    dir
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    ovcomp_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ovcomp - overhead compensation reporting"))
        .stdout(predicate::str::contains("aggregate"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_version_output() {
    ovcomp_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ovcomp"));
}

#[test]
fn test_no_subcommand_fails() {
    ovcomp_cmd().assert().failure();
}

// ===== Aggregate Command Tests =====

#[test]
fn test_aggregate_writes_both_files() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let raw = out.path().join("raw.json");
    let avg = out.path().join("avg.json");

    ovcomp_cmd()
        .arg("aggregate")
        .arg(input.path())
        .arg("--raw-out")
        .arg(&raw)
        .arg("--avg-out")
        .arg(&avg)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("3 benchmarks aggregated"));

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(raw).unwrap()).unwrap();
    assert_eq!(raw.as_object().unwrap().len(), 3);

    let avg: serde_json::Value = serde_json::from_str(&fs::read_to_string(avg).unwrap()).unwrap();
    let avg = avg.as_object().unwrap();
    assert_eq!(avg.len(), 5);
    assert!(avg.contains_key("average"));
    assert!(avg.contains_key("average-no-outlier"));
}

#[test]
fn test_aggregate_is_deterministic() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let first = out.path().join("first.json");
    let second = out.path().join("second.json");

    for avg in [&first, &second] {
        ovcomp_cmd()
            .arg("aggregate")
            .arg(input.path())
            .arg("--raw-out")
            .arg(out.path().join("raw.json"))
            .arg("--avg-out")
            .arg(avg)
            .assert()
            .success();
    }

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn test_aggregate_skips_malformed_input() {
    let input = input_dir();
    fs::write(input.path().join("broken.json"), "{ not json").unwrap();
    let out = TempDir::new().unwrap();

    ovcomp_cmd()
        .arg("aggregate")
        .arg(input.path())
        .arg("--raw-out")
        .arg(out.path().join("raw.json"))
        .arg("--avg-out")
        .arg(out.path().join("avg.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("broken.json"))
        .stdout(predicate::str::contains("Skipped: 1"));
}

#[test]
fn test_aggregate_missing_directory_fails() {
    let out = TempDir::new().unwrap();

    ovcomp_cmd()
        .arg("aggregate")
        .arg(out.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_aggregate_empty_directory_fails() {
    let input = TempDir::new().unwrap();

    ovcomp_cmd()
        .current_dir(input.path())
        .arg("aggregate")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No benchmark results found"));
}

#[test]
fn test_outlier_flags_conflict() {
    let input = input_dir();

    ovcomp_cmd()
        .arg("aggregate")
        .arg(input.path())
        .arg("--outlier")
        .arg("403.gcc")
        .arg("--no-outlier")
        .assert()
        .failure();
}

// ===== Report and Run Command Tests =====

fn plan_file(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("plan.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_run_with_plan() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let plan = plan_file(
        out.path(),
        r#"{"charts": [
            {"kind": "runtime_comparison"},
            {"kind": "variant_comparison", "variants": ["ss-all", "total"],
             "benchmarks": {"all": {"skip": ["with_outlier"]}}}
        ]}"#,
    );

    ovcomp_cmd()
        .current_dir(out.path())
        .arg("run")
        .arg(input.path())
        .arg("--plan")
        .arg(&plan)
        .arg("--fig-dir")
        .arg("fig")
        .arg("--table-dir")
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 charts rendered, 4 files written"));

    assert!(out.path().join("fig/overheadCompensation.svg").exists());
    assert!(out.path().join("fig/vs_ss-all,total.svg").exists());
    assert!(out.path().join("fig/vs_ss-all,total_50.svg").exists());

    let table = fs::read_to_string(out.path().join("tables/ss-all,total.tex")).unwrap();
    assert!(table.contains("\\rot{gcc\\,}"));
    assert!(table.contains("\\rot{average-no-outlier\\,}"));
}

#[test]
fn test_report_unknown_benchmark_fails() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let avg = out.path().join("avg.json");

    ovcomp_cmd()
        .arg("aggregate")
        .arg(input.path())
        .arg("--raw-out")
        .arg(out.path().join("raw.json"))
        .arg("--avg-out")
        .arg(&avg)
        .assert()
        .success();

    let plan = plan_file(
        out.path(),
        r#"{"charts": [{"kind": "phase_comparison", "phase": "total",
                        "benchmarks": {"named": ["999.none"]}}]}"#,
    );

    ovcomp_cmd()
        .arg("report")
        .arg(&avg)
        .arg("--plan")
        .arg(&plan)
        .arg("--fig-dir")
        .arg(out.path().join("fig"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("999.none"));
}

#[test]
fn test_report_missing_results_fails() {
    let out = TempDir::new().unwrap();

    ovcomp_cmd()
        .arg("report")
        .arg(out.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_report_invalid_plan_fails() {
    let out = TempDir::new().unwrap();
    let avg = out.path().join("avg.json");
    fs::write(&avg, "{}").unwrap();
    let plan = plan_file(out.path(), r#"{"charts": [{"kind": "pie"}]}"#);

    ovcomp_cmd()
        .arg("report")
        .arg(&avg)
        .arg("--plan")
        .arg(&plan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("plan.json"));
}
