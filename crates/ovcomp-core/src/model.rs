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

//! Aggregated result model.
//!
//! A [`ResultSet`] maps benchmark names to [`BenchmarkResult`]s, each of which
//! owns its phases. All maps are `BTreeMap`s so that serialized output has a
//! stable key order.

use crate::error::{OvError, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Name of the summary row averaging every real benchmark.
pub const AVERAGE_WITH_OUTLIER: &str = "average";

/// Name of the summary row averaging every real benchmark except the outlier.
pub const AVERAGE_WITHOUT_OUTLIER: &str = "average-no-outlier";

/// Benchmark excluded from [`AVERAGE_WITHOUT_OUTLIER`] unless configured otherwise.
pub const DEFAULT_OUTLIER: &str = "447.dealII";

/// Phase used for runtime comparisons unless configured otherwise.
pub const DEFAULT_TOTAL_PHASE: &str = "total";

/// Tolerance used when comparing derived percentages.
pub const PERCENT_TOLERANCE: f64 = 1e-6;

/// The two synthetic average rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryRow {
    /// Mean across all real benchmarks.
    WithOutlier,
    /// Mean across all real benchmarks except the designated outlier.
    WithoutOutlier,
}

impl SummaryRow {
    /// All summary rows in output order.
    pub const ALL: [SummaryRow; 2] = [SummaryRow::WithOutlier, SummaryRow::WithoutOutlier];

    /// Key of this row in a [`ResultSet`].
    pub fn name(&self) -> &'static str {
        match self {
            SummaryRow::WithOutlier => AVERAGE_WITH_OUTLIER,
            SummaryRow::WithoutOutlier => AVERAGE_WITHOUT_OUTLIER,
        }
    }

    /// Returns `true` if `name` is the key of a summary row.
    pub fn is_summary(name: &str) -> bool {
        Self::ALL.iter().any(|row| row.name() == name)
    }
}

/// Measurements and derived overheads of one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseStats {
    /// Runtime without any profiling, in seconds.
    pub reference: f64,
    /// Profiled runtime after overhead compensation, in seconds.
    pub compensated: f64,
    /// Profiled runtime before compensation, in seconds.
    pub profiled: f64,
    /// Overhead caused by instrumentation, in percent of `reference`.
    pub instr_percent: f64,
    /// Overhead caused by stack unwinding, in percent of `reference`.
    pub unw_percent: f64,
    /// Combined overhead, in percent of `reference`.
    pub percent: f64,
    /// Per-trial overhead measured by the driver, in percent of `reference`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_percent: Option<Vec<f64>>,
}

impl PhaseStats {
    /// Sum of instrumentation and unwind overhead.
    pub fn stacked_percent(&self) -> f64 {
        self.instr_percent + self.unw_percent
    }

    /// Returns `true` if the phase contributes any overhead to a stacked bar.
    pub fn has_overhead(&self) -> bool {
        self.stacked_percent() > 0.0
    }

    /// Mean, minimum and maximum of the driver trials, if any were recorded.
    pub fn driver_spread(&self) -> Option<DriverSpread> {
        let trials = self.driver_percent.as_deref()?;
        if trials.is_empty() {
            return None;
        }
        let mean = mean(trials.iter().copied())?;
        let min = trials.iter().copied().fold(f64::INFINITY, f64::min);
        let max = trials.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(DriverSpread { mean, min, max })
    }
}

/// Summary of the driver trials of one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSpread {
    /// Arithmetic mean of the trials.
    pub mean: f64,
    /// Smallest trial.
    pub min: f64,
    /// Largest trial.
    pub max: f64,
}

impl DriverSpread {
    /// Asymmetric deviation `(mean - min, max - mean)` for error bars.
    pub fn deviation(&self) -> (f64, f64) {
        (self.mean - self.min, self.max - self.mean)
    }
}

/// One benchmark (or synthetic summary row).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Overhead of sampling alone, in percent of the reference runtime.
    pub sampling_percent: f64,
    /// Phase name to phase measurements.
    pub phases: BTreeMap<String, PhaseStats>,
}

impl BenchmarkResult {
    /// Look up a phase, failing with [`OvError::UnknownPhase`].
    pub fn phase(&self, benchmark: &str, phase: &str) -> Result<&PhaseStats> {
        self.phases.get(phase).ok_or_else(|| OvError::UnknownPhase {
            benchmark: benchmark.to_string(),
            phase: phase.to_string(),
        })
    }
}

/// Ordered mapping from benchmark name to result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: BTreeMap<String, BenchmarkResult>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a result, returning the previous entry of the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        result: BenchmarkResult,
    ) -> Option<BenchmarkResult> {
        self.entries.insert(name.into(), result)
    }

    /// Look up a benchmark, failing with [`OvError::UnknownBenchmark`].
    pub fn get(&self, name: &str) -> Result<&BenchmarkResult> {
        self.entries
            .get(name)
            .ok_or_else(|| OvError::UnknownBenchmark {
                name: name.to_string(),
            })
    }

    /// The stored name of a benchmark, borrowed from this set.
    pub fn name_of(&self, name: &str) -> Result<&str> {
        self.entries
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| OvError::UnknownBenchmark {
                name: name.to_string(),
            })
    }

    /// Look up a phase of a benchmark.
    pub fn phase(&self, benchmark: &str, phase: &str) -> Result<&PhaseStats> {
        self.get(benchmark)?.phase(benchmark, phase)
    }

    /// Returns `true` if a benchmark of this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries, summary rows included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BenchmarkResult> {
        self.entries.iter()
    }

    /// Benchmark names sorted, summary rows included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries that are not synthetic summary rows.
    pub fn real_benchmarks(&self) -> impl Iterator<Item = (&str, &BenchmarkResult)> {
        self.entries
            .iter()
            .filter(|(name, _)| !SummaryRow::is_summary(name))
            .map(|(name, result)| (name.as_str(), result))
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = (&'a String, &'a BenchmarkResult);
    type IntoIter = btree_map::Iter<'a, String, BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, BenchmarkResult)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (String, BenchmarkResult)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Arithmetic mean, `None` for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(instr: f64, unw: f64) -> PhaseStats {
        PhaseStats {
            reference: 10.0,
            compensated: 10.5,
            profiled: 11.0,
            instr_percent: instr,
            unw_percent: unw,
            percent: instr + unw,
            driver_percent: None,
        }
    }

    #[test]
    fn test_lookup_errors() {
        let mut set = ResultSet::new();
        let mut bench = BenchmarkResult::default();
        bench.phases.insert("total".to_string(), phase(1.0, 2.0));
        set.insert("403.gcc", bench);

        assert!(set.get("403.gcc").is_ok());
        assert_eq!(set.name_of("403.gcc").unwrap(), "403.gcc");
        assert!(set.name_of("429.mcf").unwrap_err().is_lookup());
        assert_eq!(
            set.get("429.mcf").unwrap_err(),
            OvError::UnknownBenchmark {
                name: "429.mcf".to_string()
            }
        );
        assert_eq!(
            set.phase("403.gcc", "ss-all").unwrap_err(),
            OvError::UnknownPhase {
                benchmark: "403.gcc".to_string(),
                phase: "ss-all".to_string()
            }
        );
    }

    #[test]
    fn test_real_benchmarks_skip_summary_rows() {
        let mut set = ResultSet::new();
        set.insert("403.gcc", BenchmarkResult::default());
        set.insert(AVERAGE_WITH_OUTLIER, BenchmarkResult::default());
        set.insert(AVERAGE_WITHOUT_OUTLIER, BenchmarkResult::default());

        let real: Vec<&str> = set.real_benchmarks().map(|(name, _)| name).collect();
        assert_eq!(real, vec!["403.gcc"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_driver_spread() {
        let mut stats = phase(1.0, 1.0);
        assert!(stats.driver_spread().is_none());

        stats.driver_percent = Some(vec![4.0, 6.0, 11.0]);
        let spread = stats.driver_spread().unwrap();
        assert_eq!(spread.mean, 7.0);
        assert_eq!(spread.min, 4.0);
        assert_eq!(spread.max, 11.0);
        assert_eq!(spread.deviation(), (3.0, 4.0));
    }

    #[test]
    fn test_has_overhead() {
        assert!(!phase(0.0, 0.0).has_overhead());
        assert!(phase(0.0, 0.1).has_overhead());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean(vec![1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_serialized_keys_are_sorted() {
        let mut set = ResultSet::new();
        set.insert("b", BenchmarkResult::default());
        set.insert("a", BenchmarkResult::default());
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.find("\"a\"").unwrap() < json.find("\"b\"").unwrap());
    }
}
