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

//! CLI command definitions and argument parsing.
//!
//! - `aggregate`: raw measurement files to the two result JSON files
//! - `report`: averaged result file to figures and tables
//! - `run`: both stages in sequence

use crate::commands;
use clap::{Args, Subcommand};
use ovcomp_core::{AggregateOptions, DEFAULT_OUTLIER};
use ovcomp_report::RenderConfig;
use std::path::PathBuf;

/// Options of the aggregation stage.
#[derive(Args, Debug, Clone)]
pub struct AggregateArgs {
    /// Output file for the per-benchmark results
    #[arg(long, value_name = "PATH", default_value = "spec-estimation.json")]
    pub raw_out: PathBuf,

    /// Output file for the results including the average rows
    #[arg(long, value_name = "PATH", default_value = "spec-estimation-with-avg.json")]
    pub avg_out: PathBuf,

    /// Keep sampling costs inside the measured overhead
    #[arg(long)]
    pub consider_sampling_costs: bool,

    /// Benchmark excluded from the second average row
    #[arg(long, value_name = "NAME", default_value = DEFAULT_OUTLIER)]
    pub outlier: String,

    /// Average the second row over every benchmark
    #[arg(long, conflicts_with = "outlier")]
    pub no_outlier: bool,
}

impl AggregateArgs {
    /// Aggregation options selected by the flags.
    pub fn options(&self) -> AggregateOptions {
        let outlier = (!self.no_outlier).then(|| self.outlier.clone());
        AggregateOptions::default()
            .with_sampling_costs(self.consider_sampling_costs)
            .with_outlier(outlier)
    }
}

/// Options of the reporting stage.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// JSON chart plan (defaults to the built-in figure sequence)
    #[arg(long, value_name = "PLAN_JSON")]
    pub plan: Option<PathBuf>,

    /// Directory receiving the SVG figures
    #[arg(long, value_name = "DIR", default_value = "fig")]
    pub fig_dir: PathBuf,

    /// Directory receiving the LaTeX tables
    #[arg(long, value_name = "DIR", default_value = "tables")]
    pub table_dir: PathBuf,
}

impl ReportArgs {
    /// Render configuration selected by the flags.
    pub fn config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_figure_dir(&self.fig_dir)
            .with_table_dir(&self.table_dir)
    }
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate raw benchmark measurements
    ///
    /// Reads every `*.json` file of the input directory, derives the overhead
    /// percentages and writes the raw and the averaged result files.
    Aggregate {
        /// Directory of per-benchmark measurement files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        #[command(flatten)]
        args: AggregateArgs,
    },

    /// Render figures and tables from averaged results
    Report {
        /// Averaged result file written by `aggregate`
        #[arg(value_name = "AVERAGED_JSON")]
        results: PathBuf,

        #[command(flatten)]
        args: ReportArgs,
    },

    /// Aggregate and report in one go
    Run {
        /// Directory of per-benchmark measurement files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        #[command(flatten)]
        aggregate: AggregateArgs,

        #[command(flatten)]
        report: ReportArgs,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns the error message of the first failing stage.
    pub fn execute(self) -> Result<(), String> {
        let result = match self {
            Commands::Aggregate { input, args } => commands::aggregate(&input, &args).map(|_| ()),
            Commands::Report { results, args } => commands::report(&results, &args),
            Commands::Run {
                input,
                aggregate,
                report,
            } => commands::run(&input, &aggregate, &report),
        };
        result.map_err(|e| e.to_string())
    }
}
