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

//! Chart rendering entry point.

use crate::chart::{
    clamped_stem, ChartSpec, DisplayOptions, LabelPlacement, DEFAULT_VARIANT_MAX_Y,
};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::latex::write_variant_table;
use crate::plan::ChartPlan;
use crate::render::{render_svg, Layout};
use crate::series::{self, BarChart};
use ovcomp_core::ResultSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Stem of the runtime comparison figure.
pub const RUNTIME_COMPARISON_STEM: &str = "overheadCompensation";

/// Renders chart specifications into figure and table files.
///
/// # Example
///
/// ```no_run
/// use ovcomp_core::load_result_set;
/// use ovcomp_report::{ChartPlan, RenderConfig, Reporter};
///
/// # fn main() -> ovcomp_report::Result<()> {
/// let results = load_result_set("spec-estimation-with-avg.json")?;
/// let reporter = Reporter::new(RenderConfig::default().with_figure_dir("thesis/fig"));
/// let written = reporter.render_plan(&ChartPlan::default_thesis_plan(), &results)?;
/// println!("{} files", written.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: RenderConfig,
}

impl Reporter {
    /// Creates a reporter owning the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders one chart and returns every file written.
    ///
    /// # Errors
    ///
    /// Fails on invalid display parameters, absent benchmarks or phases, and
    /// output that cannot be written.
    pub fn render(&self, spec: &ChartSpec, results: &ResultSet) -> Result<Vec<PathBuf>> {
        spec.validate()?;
        debug!("rendering {}", spec.kind());

        let display = spec.display();
        let mut written = Vec::new();
        match spec {
            ChartSpec::RuntimeComparison {
                phase, benchmarks, ..
            } => {
                let names = benchmarks.resolve(results)?;
                let chart = series::runtime_comparison(results, phase, &names)?;
                self.figure(
                    &chart,
                    display,
                    RUNTIME_COMPARISON_STEM,
                    LabelPlacement::AboveAxis,
                    &mut written,
                )?;
            }
            ChartSpec::PhaseBreakdown {
                benchmarks, phases, ..
            } => {
                for name in benchmarks.resolve(results)? {
                    let chart = series::phase_breakdown(results, name, phases.as_deref())?;
                    if chart.categories.is_empty() {
                        warn!("{}: no phase with overhead", name);
                    }
                    self.figure(&chart, display, name, LabelPlacement::Overlay, &mut written)?;
                }
            }
            ChartSpec::DriverDetail {
                benchmarks, phases, ..
            } => {
                for name in benchmarks.resolve(results)? {
                    let chart = series::driver_detail(results, name, phases)?;
                    let stem = format!("driver_{}", name);
                    self.figure(&chart, display, &stem, LabelPlacement::Overlay, &mut written)?;
                }
            }
            ChartSpec::PhaseComparison {
                phase, benchmarks, ..
            } => {
                let names = benchmarks.resolve(results)?;
                let chart = series::phase_comparison(results, phase, &names)?;
                self.figure(&chart, display, phase, LabelPlacement::AboveAxis, &mut written)?;
            }
            ChartSpec::VariantComparison {
                variants,
                benchmarks,
                ..
            } => {
                let names = benchmarks.resolve(results)?;
                let chart = series::variant_comparison(results, variants, &names)?;
                let joined = variants.join(",");

                let mut display = display.clone();
                display.max_y.get_or_insert(DEFAULT_VARIANT_MAX_Y);
                let stem = format!("vs_{}", joined);
                self.figure(&chart, &display, &stem, LabelPlacement::AboveAxis, &mut written)?;

                let table = self.config.table_dir.join(format!("{}.tex", joined));
                write_variant_table(&chart, &table)?;
                written.push(table);
            }
        }
        Ok(written)
    }

    /// Renders every chart of a plan in order.
    ///
    /// # Errors
    ///
    /// Stops at the first chart that fails.
    pub fn render_plan(&self, plan: &ChartPlan, results: &ResultSet) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for spec in &plan.charts {
            written.extend(self.render(spec, results)?);
        }
        Ok(written)
    }

    /// Writes `<stem>.svg` and, with a clamp bound, `<stem>_<max_y>.svg`.
    fn figure(
        &self,
        chart: &BarChart,
        display: &DisplayOptions,
        stem: &str,
        placement: LabelPlacement,
        written: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let layout = Layout::from_display(display, chart.title.as_deref());
        let path = self.svg_path(stem);
        info!("saving {}", path.display());
        render_svg(chart, &layout, &self.config, &path)?;
        written.push(path);

        if let Some(max_y) = display.max_y {
            let path = self.svg_path(&clamped_stem(stem, max_y));
            info!("saving {}", path.display());
            render_svg(chart, &layout.clamped(max_y, placement), &self.config, &path)?;
            written.push(path);
        }
        Ok(())
    }

    fn svg_path(&self, stem: &str) -> PathBuf {
        self.config.figure_dir.join(format!("{}.svg", stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BenchmarkSelection;
    use crate::error::ReportError;
    use crate::render::tests::text_tag;
    use ovcomp_core::{BenchmarkResult, PhaseStats, SummaryRow, AVERAGE_WITH_OUTLIER};
    use std::fs;
    use tempfile::TempDir;

    fn stats(instr: f64, unw: f64) -> PhaseStats {
        PhaseStats {
            reference: 10.0,
            compensated: 11.0,
            profiled: 12.0,
            instr_percent: instr,
            unw_percent: unw,
            percent: instr + unw,
            driver_percent: Some(vec![instr, instr + unw]),
        }
    }

    fn results() -> ResultSet {
        let mut set = ResultSet::new();
        for (name, scale) in [("403.gcc", 1.0), ("429.mcf", 3.0), (AVERAGE_WITH_OUTLIER, 2.0)] {
            let mut bench = BenchmarkResult {
                sampling_percent: 1.0,
                ..Default::default()
            };
            bench.phases.insert("total".into(), stats(10.0 * scale, 5.0 * scale));
            bench.phases.insert("ss-all".into(), stats(20.0 * scale, 0.0));
            bench.phases.insert("unw-all".into(), stats(0.0, 0.0));
            set.insert(name, bench);
        }
        set
    }

    fn reporter(dir: &TempDir) -> Reporter {
        Reporter::new(
            RenderConfig::default()
                .with_figure_dir(dir.path().join("fig"))
                .with_table_dir(dir.path().join("tables")),
        )
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_runtime_comparison_output() {
        let dir = TempDir::new().unwrap();
        let spec = ChartSpec::RuntimeComparison {
            phase: "total".into(),
            benchmarks: BenchmarkSelection::default(),
            display: DisplayOptions::default(),
        };
        let written = reporter(&dir).render(&spec, &results()).unwrap();
        assert_eq!(file_names(&written), vec!["overheadCompensation.svg"]);
        assert!(written[0].exists());
    }

    #[test]
    fn test_phase_breakdown_writes_clamped_variant() {
        let dir = TempDir::new().unwrap();
        let spec = ChartSpec::PhaseBreakdown {
            benchmarks: BenchmarkSelection::Named(vec!["429.mcf".into()]),
            phases: None,
            display: DisplayOptions::default().with_max_y(20.0),
        };
        let written = reporter(&dir).render(&spec, &results()).unwrap();
        assert_eq!(file_names(&written), vec!["429.mcf.svg", "429.mcf_20.svg"]);

        let clamped = fs::read_to_string(&written[1]).unwrap();
        for label in ["45", "60"] {
            let tag = text_tag(&clamped, label).unwrap();
            assert!(tag.contains("font-weight=\"bold\""));
        }
    }

    #[test]
    fn test_driver_detail_stems() {
        let dir = TempDir::new().unwrap();
        let spec = ChartSpec::DriverDetail {
            benchmarks: BenchmarkSelection::all_except(SummaryRow::WithOutlier),
            phases: vec!["total".into(), "unw-all".into()],
            display: DisplayOptions::default(),
        };
        let written = reporter(&dir).render(&spec, &results()).unwrap();
        assert_eq!(
            file_names(&written),
            vec!["driver_403.gcc.svg", "driver_429.mcf.svg"]
        );
    }

    #[test]
    fn test_phase_comparison_stem() {
        let dir = TempDir::new().unwrap();
        let spec = ChartSpec::PhaseComparison {
            phase: "ss-all".into(),
            benchmarks: BenchmarkSelection::default(),
            display: DisplayOptions::default(),
        };
        let written = reporter(&dir).render(&spec, &results()).unwrap();
        assert_eq!(file_names(&written), vec!["ss-all.svg"]);
    }

    #[test]
    fn test_variant_comparison_outputs() {
        let dir = TempDir::new().unwrap();
        let spec = ChartSpec::VariantComparison {
            variants: vec!["ss-all".into(), "total".into()],
            benchmarks: BenchmarkSelection::all_except(SummaryRow::WithOutlier),
            display: DisplayOptions::default(),
        };
        let written = reporter(&dir).render(&spec, &results()).unwrap();
        assert_eq!(
            file_names(&written),
            vec!["vs_ss-all,total.svg", "vs_ss-all,total_50.svg", "ss-all,total.tex"]
        );

        let clamped = fs::read_to_string(&written[1]).unwrap();
        let tag = text_tag(&clamped, "60").unwrap();
        assert!(!tag.contains("bold"));

        let table = fs::read_to_string(&written[2]).unwrap();
        assert!(table.contains("\\rot{gcc\\,} & \\rot{mcf\\,}"));
        assert!(table.contains("ss-all & 20.0 & 60.0 \\\\"));
        assert!(table.contains("total & 15.0 & 45.0 \\\\"));
    }

    #[test]
    fn test_missing_benchmark_is_lookup_error() {
        let dir = TempDir::new().unwrap();
        let spec = ChartSpec::PhaseComparison {
            phase: "ss-all".into(),
            benchmarks: BenchmarkSelection::Named(vec!["999.none".into()]),
            display: DisplayOptions::default(),
        };
        let err = reporter(&dir).render(&spec, &results()).unwrap_err();
        assert!(err.is_lookup());
        assert!(err.to_string().contains("999.none"));
    }

    #[test]
    fn test_invalid_spec_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let spec = ChartSpec::VariantComparison {
            variants: vec![],
            benchmarks: BenchmarkSelection::default(),
            display: DisplayOptions::default(),
        };
        let err = reporter(&dir).render(&spec, &results()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidChart { .. }));
        assert!(!dir.path().join("fig").exists());
    }

    #[test]
    fn test_render_plan_in_order() {
        let dir = TempDir::new().unwrap();
        let plan = ChartPlan {
            charts: vec![
                ChartSpec::PhaseComparison {
                    phase: "total".into(),
                    benchmarks: BenchmarkSelection::default(),
                    display: DisplayOptions::default(),
                },
                ChartSpec::RuntimeComparison {
                    phase: "total".into(),
                    benchmarks: BenchmarkSelection::default(),
                    display: DisplayOptions::default(),
                },
            ],
        };
        let written = reporter(&dir).render_plan(&plan, &results()).unwrap();
        assert_eq!(file_names(&written), vec!["total.svg", "overheadCompensation.svg"]);
    }
}
