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

//! Report command - figures and tables from averaged results

use crate::cli::ReportArgs;
use crate::error::CliError;
use colored::Colorize;
use ovcomp_core::{load_result_set, ResultSet};
use ovcomp_report::{ChartPlan, Reporter};
use std::path::Path;

/// Render the chart plan for the averaged result file `results`.
///
/// # Errors
///
/// Fails if the result file or plan cannot be loaded or a chart fails.
pub fn report(results: &Path, args: &ReportArgs) -> Result<(), CliError> {
    let results = load_result_set(results)?;
    render(&results, args)
}

/// Render the chart plan for an in-memory result set.
pub(crate) fn render(results: &ResultSet, args: &ReportArgs) -> Result<(), CliError> {
    let plan = match &args.plan {
        Some(path) => ChartPlan::from_file(path)?,
        None => ChartPlan::default_thesis_plan(),
    };

    let reporter = Reporter::new(args.config());
    match reporter.render_plan(&plan, results) {
        Ok(written) => {
            println!(
                "{} {} charts rendered, {} files written",
                "✓".green().bold(),
                plan.charts.len(),
                written.len()
            );
            println!("  Figures: {}", args.fig_dir.display());
            println!("  Tables: {}", args.table_dir.display());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), args.fig_dir.display());
            Err(e.into())
        }
    }
}
