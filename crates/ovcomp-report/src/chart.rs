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

//! Chart specifications.
//!
//! A [`ChartSpec`] names one chart kind together with exactly the fields that
//! kind needs. Specifications are plain data and can be read from a JSON
//! chart plan:
//!
//! ```json
//! { "kind": "variant_comparison",
//!   "variants": ["ss-all", "unw-all"],
//!   "benchmarks": { "all": { "skip": ["with_outlier"] } },
//!   "display": { "max_y": 50 } }
//! ```

use crate::config::GOLDEN_RATIO;
use crate::error::{ReportError, Result};
use ovcomp_core::{ResultSet, SummaryRow, DEFAULT_TOTAL_PHASE};
use serde::{Deserialize, Serialize};

/// Y maximum of the clamped variant comparison when none is configured.
pub const DEFAULT_VARIANT_MAX_Y: f64 = 50.0;

/// Which benchmarks a chart shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkSelection {
    /// Every entry sorted by name, minus the listed summary rows.
    All {
        /// Summary rows left out of the chart.
        #[serde(default)]
        skip: Vec<SummaryRow>,
    },
    /// Exactly these benchmarks, in this order.
    Named(Vec<String>),
}

impl Default for BenchmarkSelection {
    fn default() -> Self {
        BenchmarkSelection::All { skip: Vec::new() }
    }
}

impl BenchmarkSelection {
    /// All entries except the given summary row.
    pub fn all_except(row: SummaryRow) -> Self {
        BenchmarkSelection::All { skip: vec![row] }
    }

    /// Resolves the selection against a result set.
    ///
    /// # Errors
    ///
    /// Returns a lookup error for the first named benchmark that is absent.
    pub fn resolve<'r>(&self, results: &'r ResultSet) -> Result<Vec<&'r str>> {
        match self {
            BenchmarkSelection::All { skip } => Ok(results
                .names()
                .filter(|name| !skip.iter().any(|row| row.name() == *name))
                .collect()),
            BenchmarkSelection::Named(names) => names
                .iter()
                .map(|name| -> Result<&'r str> { Ok(results.name_of(name)?) })
                .collect(),
        }
    }
}

/// Geometry and clamping of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Upper bound of the clamped rendering.
    pub max_y: Option<f64>,
    /// Figure width as a fraction of the text width.
    pub width: f64,
    /// Figure height relative to its width.
    pub ratio: f64,
    /// Draw x tick labels vertically.
    pub rotate_labels: bool,
    /// Title override.
    pub title: Option<String>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_y: None,
            width: 1.0,
            ratio: GOLDEN_RATIO,
            rotate_labels: false,
            title: None,
        }
    }
}

impl DisplayOptions {
    /// Sets the clamp bound.
    pub fn with_max_y(mut self, max_y: f64) -> Self {
        self.max_y = Some(max_y);
        self
    }

    /// Sets width fraction and height ratio.
    pub fn with_size(mut self, width: f64, ratio: f64) -> Self {
        self.width = width;
        self.ratio = ratio;
        self
    }

    /// Draws x tick labels vertically.
    pub fn rotated(mut self) -> Self {
        self.rotate_labels = true;
        self
    }

    fn validate(&self, chart: &str) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ReportError::invalid(chart, "width must be positive"));
        }
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(ReportError::invalid(chart, "ratio must be positive"));
        }
        if let Some(max_y) = self.max_y {
            if !(max_y.is_finite() && max_y > 0.0) {
                return Err(ReportError::invalid(chart, "max_y must be positive"));
            }
        }
        Ok(())
    }
}

/// Where value labels of clipped bars are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    /// Small black text just above the plot area.
    AboveAxis,
    /// Bold white text inside the clipped top of the bar.
    Overlay,
}

/// One chart to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    /// Profiled, compensated and reference runtime per benchmark.
    RuntimeComparison {
        /// Phase whose runtimes are compared.
        #[serde(default = "default_total_phase")]
        phase: String,
        /// Benchmarks on the x axis.
        #[serde(default)]
        benchmarks: BenchmarkSelection,
        /// Geometry.
        #[serde(default)]
        display: DisplayOptions,
    },
    /// Stacked instrumentation/unwind overhead per phase, one chart per benchmark.
    PhaseBreakdown {
        /// Benchmarks to chart.
        #[serde(default)]
        benchmarks: BenchmarkSelection,
        /// Phase order; every phase in name order when absent.
        #[serde(default)]
        phases: Option<Vec<String>>,
        /// Geometry.
        #[serde(default)]
        display: DisplayOptions,
    },
    /// Sampling/instrumentation/unwind stack next to the driver measurement.
    DriverDetail {
        /// Benchmarks to chart.
        #[serde(default)]
        benchmarks: BenchmarkSelection,
        /// Fixed phase order.
        phases: Vec<String>,
        /// Geometry.
        #[serde(default)]
        display: DisplayOptions,
    },
    /// One phase across all selected benchmarks.
    PhaseComparison {
        /// The phase to compare.
        phase: String,
        /// Benchmarks on the x axis.
        #[serde(default)]
        benchmarks: BenchmarkSelection,
        /// Geometry.
        #[serde(default)]
        display: DisplayOptions,
    },
    /// Combined overhead of several variants per benchmark, plus a table.
    VariantComparison {
        /// Variant (phase) names, one bar each.
        variants: Vec<String>,
        /// Benchmarks on the x axis.
        #[serde(default)]
        benchmarks: BenchmarkSelection,
        /// Geometry.
        #[serde(default)]
        display: DisplayOptions,
    },
}

fn default_total_phase() -> String {
    DEFAULT_TOTAL_PHASE.to_string()
}

impl ChartSpec {
    /// Snake-case name of the chart kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::RuntimeComparison { .. } => "runtime_comparison",
            ChartSpec::PhaseBreakdown { .. } => "phase_breakdown",
            ChartSpec::DriverDetail { .. } => "driver_detail",
            ChartSpec::PhaseComparison { .. } => "phase_comparison",
            ChartSpec::VariantComparison { .. } => "variant_comparison",
        }
    }

    /// Display options of the chart.
    pub fn display(&self) -> &DisplayOptions {
        match self {
            ChartSpec::RuntimeComparison { display, .. }
            | ChartSpec::PhaseBreakdown { display, .. }
            | ChartSpec::DriverDetail { display, .. }
            | ChartSpec::PhaseComparison { display, .. }
            | ChartSpec::VariantComparison { display, .. } => display,
        }
    }

    /// Checks parameters that do not depend on the data.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidChart`] for empty name lists or
    /// non-positive geometry.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        self.display().validate(kind)?;

        let benchmarks = match self {
            ChartSpec::RuntimeComparison { phase, benchmarks, .. }
            | ChartSpec::PhaseComparison { phase, benchmarks, .. } => {
                if phase.is_empty() {
                    return Err(ReportError::invalid(kind, "phase name is empty"));
                }
                benchmarks
            }
            ChartSpec::PhaseBreakdown {
                benchmarks, phases, ..
            } => {
                if phases.as_ref().is_some_and(Vec::is_empty) {
                    return Err(ReportError::invalid(kind, "phase list is empty"));
                }
                benchmarks
            }
            ChartSpec::DriverDetail {
                benchmarks, phases, ..
            } => {
                if phases.is_empty() {
                    return Err(ReportError::invalid(kind, "phase list is empty"));
                }
                benchmarks
            }
            ChartSpec::VariantComparison {
                variants,
                benchmarks,
                ..
            } => {
                if variants.is_empty() {
                    return Err(ReportError::invalid(kind, "no variants given"));
                }
                benchmarks
            }
        };

        if matches!(benchmarks, BenchmarkSelection::Named(names) if names.is_empty()) {
            return Err(ReportError::invalid(kind, "benchmark list is empty"));
        }
        Ok(())
    }
}

/// File stem of a clamped rendering, e.g. `vs_ss-all,unw-all_50`.
pub fn clamped_stem(stem: &str, max_y: f64) -> String {
    format!("{}_{}", stem, format_bound(max_y))
}

/// Formats a bound without a fractional part when it is integral.
fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovcomp_core::{BenchmarkResult, AVERAGE_WITHOUT_OUTLIER, AVERAGE_WITH_OUTLIER};

    fn results() -> ResultSet {
        let mut set = ResultSet::new();
        for name in ["429.mcf", "403.gcc", AVERAGE_WITH_OUTLIER, AVERAGE_WITHOUT_OUTLIER] {
            set.insert(name, BenchmarkResult::default());
        }
        set
    }

    #[test]
    fn test_resolve_all_sorted_and_skipping() {
        let set = results();
        let all = BenchmarkSelection::default().resolve(&set).unwrap();
        assert_eq!(
            all,
            vec!["403.gcc", "429.mcf", AVERAGE_WITH_OUTLIER, AVERAGE_WITHOUT_OUTLIER]
        );

        let selection = BenchmarkSelection::all_except(SummaryRow::WithoutOutlier);
        let some = selection.resolve(&set).unwrap();
        assert_eq!(some, vec!["403.gcc", "429.mcf", AVERAGE_WITH_OUTLIER]);
    }

    #[test]
    fn test_resolve_named_missing_is_lookup_error() {
        let set = results();
        let selection = BenchmarkSelection::Named(vec!["403.gcc".into(), "999.none".into()]);
        let err = selection.resolve(&set).unwrap_err();
        assert!(err.is_lookup());
        assert!(err.to_string().contains("999.none"));
    }

    #[test]
    fn test_resolved_names_outlive_selection() {
        let set = results();
        let names = BenchmarkSelection::Named(vec!["429.mcf".into(), "403.gcc".into()])
            .resolve(&set)
            .unwrap();
        assert_eq!(names, vec!["429.mcf", "403.gcc"]);
    }

    #[test]
    fn test_validate() {
        let spec = ChartSpec::VariantComparison {
            variants: vec![],
            benchmarks: BenchmarkSelection::default(),
            display: DisplayOptions::default(),
        };
        assert!(matches!(
            spec.validate(),
            Err(ReportError::InvalidChart { .. })
        ));

        let spec = ChartSpec::PhaseComparison {
            phase: "ss-all".into(),
            benchmarks: BenchmarkSelection::default(),
            display: DisplayOptions::default().with_max_y(-1.0),
        };
        assert!(spec.validate().is_err());

        let spec = ChartSpec::RuntimeComparison {
            phase: "total".into(),
            benchmarks: BenchmarkSelection::Named(vec![]),
            display: DisplayOptions::default(),
        };
        assert!(spec.validate().is_err());

        let spec = ChartSpec::DriverDetail {
            benchmarks: BenchmarkSelection::default(),
            phases: vec!["ss-all".into()],
            display: DisplayOptions::default().with_size(0.5, 0.5),
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_deserialize_plan_entry() {
        let json = r#"{
            "kind": "variant_comparison",
            "variants": ["ss-all", "unw-all"],
            "benchmarks": {"all": {"skip": ["with_outlier"]}},
            "display": {"max_y": 50, "rotate_labels": true}
        }"#;
        let spec: ChartSpec = serde_json::from_str(json).unwrap();
        match spec {
            ChartSpec::VariantComparison {
                variants,
                benchmarks,
                display,
            } => {
                assert_eq!(variants, vec!["ss-all", "unw-all"]);
                assert_eq!(
                    benchmarks,
                    BenchmarkSelection::all_except(SummaryRow::WithOutlier)
                );
                assert_eq!(display.max_y, Some(50.0));
                assert!(display.rotate_labels);
                assert_eq!(display.width, 1.0);
            }
            other => panic!("unexpected spec {:?}", other),
        }
    }

    #[test]
    fn test_runtime_comparison_defaults() {
        let spec: ChartSpec = serde_json::from_str(r#"{"kind": "runtime_comparison"}"#).unwrap();
        assert_eq!(
            spec,
            ChartSpec::RuntimeComparison {
                phase: "total".to_string(),
                benchmarks: BenchmarkSelection::default(),
                display: DisplayOptions::default(),
            }
        );
    }

    #[test]
    fn test_clamped_stem() {
        assert_eq!(clamped_stem("vs_ss-all,unw-all", 50.0), "vs_ss-all,unw-all_50");
        assert_eq!(clamped_stem("403.gcc", 12.5), "403.gcc_12.5");
    }
}
