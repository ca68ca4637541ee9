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

//! Aggregation of raw per-benchmark measurements.
//!
//! Reads every `*.json` file of an input directory, derives per-phase overhead
//! percentages and computes the two summary rows.
//!
//! # Percentages
//!
//! With `s` the sampling term (`reference * sampling_percent / 100` when
//! sampling costs are *not* considered, `0` otherwise):
//!
//! ```text
//! instr_percent = (instrumented - s - reference) / reference * 100
//! unw_percent   = (profiled - instrumented)      / reference * 100
//! percent       = (profiled - s - reference)     / reference * 100
//! ```
//!
//! A zero, missing or non-finite reference yields `0` for every percentage.

use crate::error::{max_file_size, OvError, Result};
use crate::model::{
    mean, BenchmarkResult, PhaseStats, ResultSet, SummaryRow, DEFAULT_OUTLIER,
};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Raw measurements of one phase as found in an input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPhase {
    /// Unprofiled runtime in seconds.
    #[serde(default)]
    pub reference: f64,
    /// Runtime with instrumentation only; defaults to `profiled`.
    #[serde(default)]
    pub instrumented: Option<f64>,
    /// Fully profiled runtime in seconds.
    pub profiled: f64,
    /// Profiled runtime after overhead compensation in seconds.
    pub compensated: f64,
    /// Per-trial runtimes measured through the driver.
    #[serde(default)]
    pub driver: Option<Vec<f64>>,
}

/// Raw contents of one benchmark input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBenchmark {
    /// Benchmark name; the file stem is used when absent.
    #[serde(default)]
    pub benchmark: Option<String>,
    /// Sampling overhead in percent of the reference runtime.
    #[serde(default)]
    pub sampling_percent: f64,
    /// Phase name to measurements.
    pub phases: BTreeMap<String, RawPhase>,
}

/// Options controlling aggregation.
///
/// # Example
///
/// ```
/// use ovcomp_core::AggregateOptions;
///
/// let options = AggregateOptions::default()
///     .with_sampling_costs(true)
///     .with_outlier(None::<String>);
/// assert!(options.consider_sampling_costs);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOptions {
    /// Keep the sampling cost inside the measured runtimes.
    pub consider_sampling_costs: bool,
    /// Benchmark left out of the "without outlier" summary row.
    pub outlier: Option<String>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            consider_sampling_costs: false,
            outlier: Some(DEFAULT_OUTLIER.to_string()),
        }
    }
}

impl AggregateOptions {
    /// Sets whether sampling costs stay in the measured runtimes.
    pub fn with_sampling_costs(mut self, consider: bool) -> Self {
        self.consider_sampling_costs = consider;
        self
    }

    /// Sets the outlier benchmark, `None` to average over everything twice.
    pub fn with_outlier(mut self, outlier: Option<impl Into<String>>) -> Self {
        self.outlier = outlier.map(Into::into);
        self
    }
}

/// An input file that was not aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedInput {
    /// The file that was skipped.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// One entry per successfully parsed benchmark.
    pub raw: ResultSet,
    /// `raw` plus the summary rows.
    pub with_summary: ResultSet,
    /// Inputs that were skipped, in discovery order.
    pub skipped: Vec<SkippedInput>,
}

/// Aggregate every benchmark file of `dir`.
///
/// # Errors
///
/// Returns `Err` only if the directory itself cannot be listed. Unreadable or
/// malformed benchmark files are logged, recorded in
/// [`Aggregation::skipped`] and otherwise ignored.
pub fn aggregate(dir: impl AsRef<Path>, options: &AggregateOptions) -> Result<Aggregation> {
    let dir = dir.as_ref();
    let files = discover_inputs(dir)?;
    debug!(dir = %dir.display(), count = files.len(), "discovered benchmark inputs");

    let mut raw = ResultSet::new();
    let mut skipped = Vec::new();

    for path in files {
        let parsed = load_raw_benchmark(&path).map(|bench| {
            let name = bench
                .benchmark
                .clone()
                .unwrap_or_else(|| file_stem(&path));
            (name, bench)
        });

        match parsed {
            Ok((name, bench)) => match rejected_name(&name, &raw) {
                Some(reason) => {
                    warn!(path = %path.display(), "skipping benchmark: {}", reason);
                    skipped.push(SkippedInput { path, reason });
                }
                None => {
                    raw.insert(name, derive_benchmark(&bench, options.consider_sampling_costs));
                }
            },
            Err(e) => {
                warn!(
                    benchmark = %file_stem(&path),
                    "skipping benchmark: {}", e
                );
                skipped.push(SkippedInput {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    let with_summary = with_summary_rows(&raw, options.outlier.as_deref());
    info!(
        benchmarks = raw.len(),
        skipped = skipped.len(),
        "aggregated benchmark results"
    );

    Ok(Aggregation {
        raw,
        with_summary,
        skipped,
    })
}

/// Lists `*.json` files of `dir`, sorted by path.
fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| OvError::io_error(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OvError::io_error(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Why a benchmark name cannot be aggregated, if it cannot.
///
/// Names become file stems of rendered charts, so they must be plain file
/// names, and the summary row names stay reserved.
fn rejected_name(name: &str, raw: &ResultSet) -> Option<String> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        Some(format!("benchmark name '{}' is not a plain file name", name))
    } else if SummaryRow::is_summary(name) {
        Some(format!("benchmark name '{}' is reserved for a summary row", name))
    } else if raw.contains(name) {
        Some(format!("duplicate benchmark '{}'", name))
    } else {
        None
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read and parse one raw benchmark file.
///
/// # Errors
///
/// Returns `Err` if the file is larger than the configured limit, cannot be
/// read, or is not a valid raw benchmark document.
pub fn load_raw_benchmark(path: &Path) -> Result<RawBenchmark> {
    let metadata = fs::metadata(path).map_err(|e| OvError::io_error(path, e))?;
    let max = max_file_size();
    if metadata.len() > max {
        return Err(OvError::FileTooLarge {
            path: path.to_path_buf(),
            actual: metadata.len(),
            max,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| OvError::io_error(path, e))?;
    let bench: RawBenchmark =
        serde_json::from_str(&content).map_err(|e| OvError::json_error(path, e))?;

    if bench.phases.is_empty() {
        return Err(OvError::InvalidInput(format!(
            "'{}' contains no phases",
            path.display()
        )));
    }
    Ok(bench)
}

/// Derive the percentages of every phase of a raw benchmark.
pub fn derive_benchmark(raw: &RawBenchmark, consider_sampling_costs: bool) -> BenchmarkResult {
    let phases = raw
        .phases
        .iter()
        .map(|(name, phase)| {
            (
                name.clone(),
                derive_phase(phase, raw.sampling_percent, consider_sampling_costs),
            )
        })
        .collect();

    BenchmarkResult {
        sampling_percent: raw.sampling_percent,
        phases,
    }
}

/// Derive the overhead percentages of one phase.
pub fn derive_phase(
    raw: &RawPhase,
    sampling_percent: f64,
    consider_sampling_costs: bool,
) -> PhaseStats {
    let reference = raw.reference;
    let instrumented = raw.instrumented.unwrap_or(raw.profiled);
    let sampling = if consider_sampling_costs {
        0.0
    } else {
        reference * sampling_percent / 100.0
    };

    let driver_percent = raw.driver.as_ref().map(|trials| {
        trials
            .iter()
            .map(|t| percent_of(t - reference, reference))
            .collect()
    });

    PhaseStats {
        reference,
        compensated: raw.compensated,
        profiled: raw.profiled,
        instr_percent: percent_of(instrumented - sampling - reference, reference),
        unw_percent: percent_of(raw.profiled - instrumented, reference),
        percent: percent_of(raw.profiled - sampling - reference, reference),
        driver_percent,
    }
}

/// `delta / reference * 100`, saturating to `0` for an unusable reference.
fn percent_of(delta: f64, reference: f64) -> f64 {
    if reference == 0.0 || !reference.is_finite() || !delta.is_finite() {
        0.0
    } else {
        delta / reference * 100.0
    }
}

/// Returns `raw` extended by the summary rows.
///
/// A summary row without member benchmarks is omitted.
pub fn with_summary_rows(raw: &ResultSet, outlier: Option<&str>) -> ResultSet {
    let mut out = raw.clone();

    for row in SummaryRow::ALL {
        let members: Vec<&BenchmarkResult> = raw
            .real_benchmarks()
            .filter(|(name, _)| match row {
                SummaryRow::WithOutlier => true,
                SummaryRow::WithoutOutlier => Some(*name) != outlier,
            })
            .map(|(_, result)| result)
            .collect();

        match summarize(&members) {
            Some(summary) => {
                out.insert(row.name(), summary);
            }
            None => warn!(row = row.name(), "no benchmarks to average, row omitted"),
        }
    }

    out
}

/// Field-wise mean of `members`; `None` if there are none.
///
/// Every phase is averaged over the members that contain it. The driver
/// series of the result holds one mean per member that has driver trials.
pub fn summarize(members: &[&BenchmarkResult]) -> Option<BenchmarkResult> {
    let sampling_percent = mean(members.iter().map(|m| m.sampling_percent))?;

    let phase_names: BTreeSet<&String> = members.iter().flat_map(|m| m.phases.keys()).collect();

    let mut phases = BTreeMap::new();
    for name in phase_names {
        let stats: Vec<&PhaseStats> = members.iter().filter_map(|m| m.phases.get(name)).collect();
        let field = |f: fn(&PhaseStats) -> f64| mean(stats.iter().map(|s| f(s))).unwrap_or(0.0);

        let driver_means: Vec<f64> = stats
            .iter()
            .filter_map(|s| s.driver_spread().map(|spread| spread.mean))
            .collect();

        phases.insert(
            name.clone(),
            PhaseStats {
                reference: field(|s| s.reference),
                compensated: field(|s| s.compensated),
                profiled: field(|s| s.profiled),
                instr_percent: field(|s| s.instr_percent),
                unw_percent: field(|s| s.unw_percent),
                percent: field(|s| s.percent),
                driver_percent: (!driver_means.is_empty()).then_some(driver_means),
            },
        );
    }

    Some(BenchmarkResult {
        sampling_percent,
        phases,
    })
}
