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

//! Ordered lists of charts.

use crate::chart::{BenchmarkSelection, ChartSpec, DisplayOptions};
use crate::config::GOLDEN_RATIO;
use crate::error::{ReportError, Result};
use ovcomp_core::{SummaryRow, AVERAGE_WITHOUT_OUTLIER, AVERAGE_WITH_OUTLIER, DEFAULT_TOTAL_PHASE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Benchmarks shown in the driver detail views.
const DRIVER_BENCHMARKS: &[&str] = &[
    "453.povray",
    "450.soplex",
    "444.namd",
    "447.dealII",
    "462.libquantum",
    "458.sjeng",
    "473.astar",
    "482.sphinx3",
    "464.h264ref",
    "429.mcf",
    "433.milc",
    "470.lbm",
    "456.hmmer",
    "403.gcc",
    AVERAGE_WITH_OUTLIER,
    AVERAGE_WITHOUT_OUTLIER,
];

/// Profiling variants in presentation order.
const VARIANTS: &[&str] = &[
    "ss-all",
    "ss-cpd",
    "ss-min",
    "ss-conj",
    "unw-all",
    "unw-min",
    "hybrid-st",
    "hybrid-dyn",
];

/// Variant comparisons as `(variants, max_y)`.
const COMPARISONS: &[(&[&str], f64)] = &[
    (&["ss-all", "unw-all"], 50.0),
    (&["ss-all", "ss-cpd", "unw-all"], 100.0),
    (&["ss-cpd", "ss-min", "ss-conj"], 50.0),
    (&["unw-all", "unw-min"], 50.0),
    (&["ss-cpd", "unw-all", "hybrid-dyn"], 50.0),
    (&["ss-cpd", "unw-min", "hybrid-st"], 50.0),
    (&["hybrid-dyn", "hybrid-st"], 50.0),
    (&["ss-min", "unw-min", "hybrid-dyn"], 50.0),
];

/// A sequence of charts rendered in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPlan {
    /// Charts in rendering order.
    pub charts: Vec<ChartSpec>,
}

impl ChartPlan {
    /// Loads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be read and
    /// [`ReportError::InvalidChart`] if it is not a valid plan.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ReportError::io_error(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| ReportError::invalid(path.display().to_string(), e.to_string()))
    }

    /// The full figure sequence of the overhead compensation chapter.
    pub fn default_thesis_plan() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let half = DisplayOptions::default().with_size(0.5, GOLDEN_RATIO);
        let mut charts = vec![
            ChartSpec::DriverDetail {
                benchmarks: BenchmarkSelection::Named(owned(DRIVER_BENCHMARKS)),
                phases: owned(VARIANTS),
                display: half.clone(),
            },
            ChartSpec::RuntimeComparison {
                phase: DEFAULT_TOTAL_PHASE.to_string(),
                benchmarks: BenchmarkSelection::all_except(SummaryRow::WithoutOutlier),
                display: DisplayOptions::default().rotated(),
            },
            ChartSpec::PhaseBreakdown {
                benchmarks: BenchmarkSelection::default(),
                phases: Some(owned(VARIANTS)),
                display: half.with_max_y(20.0).rotated(),
            },
        ];

        charts.extend(VARIANTS.iter().map(|phase| ChartSpec::PhaseComparison {
            phase: phase.to_string(),
            benchmarks: BenchmarkSelection::default(),
            display: DisplayOptions::default().rotated(),
        }));

        let vs_display = DisplayOptions::default().with_size(1.0, 1.0 / 3.0).rotated();
        charts.extend(COMPARISONS.iter().map(|(variants, max_y)| ChartSpec::VariantComparison {
            variants: owned(*variants),
            benchmarks: BenchmarkSelection::all_except(SummaryRow::WithOutlier),
            display: vs_display.clone().with_max_y(*max_y),
        }));
        charts.push(ChartSpec::VariantComparison {
            variants: owned(VARIANTS),
            benchmarks: BenchmarkSelection::all_except(SummaryRow::WithOutlier),
            display: DisplayOptions::default()
                .with_size(1.4, 0.66)
                .with_max_y(100.0)
                .rotated(),
        });

        Self { charts }
    }
}
