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

//! Presentation-ready bar series.
//!
//! Each chart kind is first turned into a backend-independent [`BarChart`]:
//! x categories plus a list of series. Series sharing a `slot` are stacked
//! in list order; different slots sit side by side within a category.

use crate::error::Result;
use ovcomp_core::{PhaseStats, ResultSet};

/// Colour role of a series, resolved by [`RenderConfig`](crate::RenderConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorKey {
    /// Sampling overhead.
    Sampling,
    /// Instrumentation overhead.
    Instrumentation,
    /// Unwind overhead.
    Unwinding,
    /// Driver measurement.
    Driver,
    /// Runtime before compensation.
    Profiled,
    /// Runtime after compensation.
    Compensated,
    /// Reference runtime.
    Reference,
    /// A named overhead variant.
    Variant(String),
}

/// Quantity on the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Overhead in percent.
    Overhead,
    /// Runtime in seconds.
    Runtime,
}

/// One bar series.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Legend entry.
    pub label: String,
    /// Colour role.
    pub color: ColorKey,
    /// Position within a category group.
    pub slot: usize,
    /// One value per category.
    pub values: Vec<f64>,
    /// Optional asymmetric `(below, above)` error per category.
    pub errors: Option<Vec<Option<(f64, f64)>>>,
}

impl BarSeries {
    fn new(label: &str, color: ColorKey, slot: usize) -> Self {
        Self {
            label: label.to_string(),
            color,
            slot,
            values: Vec::new(),
            errors: None,
        }
    }
}

/// A rectangle of a (possibly stacked) bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Index into [`BarChart::series`].
    pub series: usize,
    /// Category index.
    pub category: usize,
    /// Slot within the category.
    pub slot: usize,
    /// Lower end.
    pub bottom: f64,
    /// Upper end.
    pub top: f64,
}

/// Backend-independent bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    /// Chart title.
    pub title: Option<String>,
    /// X axis labels.
    pub categories: Vec<String>,
    /// Series in drawing and legend order.
    pub series: Vec<BarSeries>,
    /// Y axis quantity.
    pub axis: Axis,
}

impl BarChart {
    /// Number of side-by-side slots per category.
    pub fn slots(&self) -> usize {
        self.series.iter().map(|s| s.slot + 1).max().unwrap_or(1)
    }

    /// Series with the given legend label.
    pub fn series_by_label(&self, label: &str) -> Option<&BarSeries> {
        self.series.iter().find(|s| s.label == label)
    }

    /// Values of every series for one category, in series order.
    pub fn values_at(&self, category: usize) -> Vec<f64> {
        self.series
            .iter()
            .filter_map(|s| s.values.get(category).copied())
            .collect()
    }

    /// Stacked rectangles of every series.
    pub fn segments(&self) -> Vec<Segment> {
        let mut base = vec![vec![0.0; self.slots()]; self.categories.len()];
        let mut out = Vec::new();
        for (index, series) in self.series.iter().enumerate() {
            for (category, &value) in series.values.iter().enumerate() {
                let Some(row) = base.get_mut(category) else {
                    continue;
                };
                let bottom = row[series.slot];
                let top = bottom + value;
                row[series.slot] = top;
                out.push(Segment {
                    series: index,
                    category,
                    slot: series.slot,
                    bottom,
                    top,
                });
            }
        }
        out
    }

    /// Top of every non-empty stack as `(category, slot, top)`.
    pub fn stack_tops(&self) -> Vec<(usize, usize, f64)> {
        let mut tops: Vec<(usize, usize, f64)> = Vec::new();
        for seg in self.segments() {
            match tops
                .iter_mut()
                .find(|(c, s, _)| *c == seg.category && *s == seg.slot)
            {
                Some(entry) => entry.2 = seg.top,
                None => tops.push((seg.category, seg.slot, seg.top)),
            }
        }
        tops
    }

    /// Value range covered by bars and error bars, always including zero.
    pub fn value_range(&self) -> (f64, f64) {
        let mut low: f64 = 0.0;
        let mut high: f64 = 0.0;
        for seg in self.segments() {
            low = low.min(seg.bottom).min(seg.top);
            high = high.max(seg.bottom).max(seg.top);
        }
        for series in &self.series {
            let Some(errors) = &series.errors else {
                continue;
            };
            for (value, error) in series.values.iter().zip(errors) {
                if let Some((below, above)) = error {
                    low = low.min(value - below);
                    high = high.max(value + above);
                }
            }
        }
        (low, high)
    }
}

/// Profiled, compensated and reference runtime of `phase` per benchmark.
///
/// # Errors
///
/// Returns a lookup error if a benchmark lacks the phase.
pub fn runtime_comparison(
    results: &ResultSet,
    phase: &str,
    benchmarks: &[&str],
) -> Result<BarChart> {
    let mut profiled = BarSeries::new("Before ov. compensation", ColorKey::Profiled, 0);
    let mut compensated = BarSeries::new("After ov. compensation", ColorKey::Compensated, 1);
    let mut reference = BarSeries::new("Reference runtime", ColorKey::Reference, 2);

    for name in benchmarks {
        let stats = results.phase(name, phase)?;
        profiled.values.push(stats.profiled);
        compensated.values.push(stats.compensated);
        reference.values.push(stats.reference);
    }

    Ok(BarChart {
        title: None,
        categories: benchmarks.iter().map(|s| s.to_string()).collect(),
        series: vec![profiled, compensated, reference],
        axis: Axis::Runtime,
    })
}

/// Instrumentation and unwind overhead of each phase of one benchmark.
///
/// Phases without positive stacked overhead are dropped. Without an explicit
/// order every phase is listed in name order.
///
/// # Errors
///
/// Returns a lookup error for an absent benchmark or listed phase.
pub fn phase_breakdown(
    results: &ResultSet,
    benchmark: &str,
    phases: Option<&[String]>,
) -> Result<BarChart> {
    let selected = overhead_phases(results, benchmark, phases)?;

    let mut instr = BarSeries::new("instr.", ColorKey::Instrumentation, 0);
    let mut unw = BarSeries::new("unw.", ColorKey::Unwinding, 0);
    for (_, stats) in &selected {
        instr.values.push(stats.instr_percent);
        unw.values.push(stats.unw_percent);
    }

    Ok(BarChart {
        title: Some(benchmark.to_string()),
        categories: selected.into_iter().map(|(name, _)| name).collect(),
        series: vec![instr, unw],
        axis: Axis::Overhead,
    })
}

/// Sampling, instrumentation and unwind overhead next to the driver mean.
///
/// The driver series carries the `(mean - min, max - mean)` spread of the
/// driver trials as its errors; phases without trials get an empty driver bar.
///
/// # Errors
///
/// Returns a lookup error for an absent benchmark or phase.
pub fn driver_detail(results: &ResultSet, benchmark: &str, phases: &[String]) -> Result<BarChart> {
    let sampling_percent = results.get(benchmark)?.sampling_percent;
    let selected = overhead_phases(results, benchmark, Some(phases))?;

    let mut sample = BarSeries::new("sample", ColorKey::Sampling, 0);
    let mut instr = BarSeries::new("instr.", ColorKey::Instrumentation, 0);
    let mut unw = BarSeries::new("unw.", ColorKey::Unwinding, 0);
    let mut driver = BarSeries::new("driver", ColorKey::Driver, 1);
    let mut errors = Vec::with_capacity(selected.len());

    for (_, stats) in &selected {
        sample.values.push(sampling_percent);
        instr.values.push(stats.instr_percent);
        unw.values.push(stats.unw_percent);

        match stats.driver_spread() {
            Some(spread) => {
                driver.values.push(spread.mean);
                errors.push(Some(spread.deviation()));
            }
            None => {
                driver.values.push(0.0);
                errors.push(None);
            }
        }
    }
    driver.errors = Some(errors);

    Ok(BarChart {
        title: Some(benchmark.to_string()),
        categories: selected.into_iter().map(|(name, _)| name).collect(),
        series: vec![sample, instr, unw, driver],
        axis: Axis::Overhead,
    })
}

/// Instrumentation and unwind overhead of one phase per benchmark.
///
/// # Errors
///
/// Returns a lookup error if a benchmark lacks the phase.
pub fn phase_comparison(results: &ResultSet, phase: &str, benchmarks: &[&str]) -> Result<BarChart> {
    let mut instr = BarSeries::new("instrumentation", ColorKey::Instrumentation, 0);
    let mut unw = BarSeries::new("unwind", ColorKey::Unwinding, 0);

    for name in benchmarks {
        let stats = results.phase(name, phase)?;
        instr.values.push(stats.instr_percent);
        unw.values.push(stats.unw_percent);
    }

    Ok(BarChart {
        title: Some(phase.to_string()),
        categories: benchmarks.iter().map(|s| s.to_string()).collect(),
        series: vec![instr, unw],
        axis: Axis::Overhead,
    })
}

/// Combined overhead of each variant per benchmark, one slot per variant.
///
/// # Errors
///
/// Returns a lookup error if a benchmark lacks one of the variants.
pub fn variant_comparison(
    results: &ResultSet,
    variants: &[String],
    benchmarks: &[&str],
) -> Result<BarChart> {
    let mut series = Vec::with_capacity(variants.len());
    for (slot, variant) in variants.iter().enumerate() {
        let mut bars = BarSeries::new(variant, ColorKey::Variant(variant.clone()), slot);
        for name in benchmarks {
            bars.values.push(results.phase(name, variant)?.percent);
        }
        series.push(bars);
    }

    Ok(BarChart {
        title: None,
        categories: benchmarks.iter().map(|s| s.to_string()).collect(),
        series,
        axis: Axis::Overhead,
    })
}

/// Phases of `benchmark` in the requested order that carry overhead.
fn overhead_phases<'a>(
    results: &'a ResultSet,
    benchmark: &str,
    order: Option<&[String]>,
) -> Result<Vec<(String, &'a PhaseStats)>> {
    let bench = results.get(benchmark)?;
    let ordered: Vec<(String, &PhaseStats)> = match order {
        Some(names) => names
            .iter()
            .map(|name| -> Result<(String, &PhaseStats)> {
                Ok((name.clone(), bench.phase(benchmark, name)?))
            })
            .collect::<Result<_>>()?,
        None => bench
            .phases
            .iter()
            .map(|(name, stats)| (name.clone(), stats))
            .collect(),
    };

    Ok(ordered
        .into_iter()
        .filter(|(_, stats)| stats.has_overhead())
        .collect())
}
