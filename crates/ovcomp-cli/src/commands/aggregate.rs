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

//! Aggregate command - raw measurements to result files

use crate::cli::AggregateArgs;
use crate::error::CliError;
use colored::Colorize;
use ovcomp_core::{save_result_set, Aggregation};
use std::path::Path;

/// Aggregate the measurement files of `input` and save both result files.
///
/// Prints one line per written file and a warning line per skipped input.
///
/// # Errors
///
/// Fails if the input directory cannot be read, no benchmark could be
/// aggregated, or an output file cannot be written.
pub fn aggregate(input: &Path, args: &AggregateArgs) -> Result<Aggregation, CliError> {
    let aggregation = ovcomp_core::aggregate(input, &args.options())?;

    for skipped in &aggregation.skipped {
        println!(
            "{} {}: {}",
            "!".yellow().bold(),
            skipped.path.display(),
            skipped.reason
        );
    }
    if aggregation.raw.is_empty() {
        println!("{} {}", "✗".red().bold(), input.display());
        return Err(CliError::NoResults(input.display().to_string()));
    }

    save_result_set(&aggregation.raw, &args.raw_out)?;
    save_result_set(&aggregation.with_summary, &args.avg_out)?;

    println!(
        "{} {} benchmarks aggregated",
        "✓".green().bold(),
        aggregation.raw.len()
    );
    println!("  Results: {}", args.raw_out.display());
    println!("  With averages: {}", args.avg_out.display());
    if !aggregation.skipped.is_empty() {
        println!("  Skipped: {}", aggregation.skipped.len());
    }
    Ok(aggregation)
}
