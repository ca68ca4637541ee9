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

//! Run command - aggregation followed by reporting

use super::report::render;
use crate::cli::{AggregateArgs, ReportArgs};
use crate::error::CliError;
use std::path::Path;

/// Aggregate `input` and render the plan on the averaged results.
///
/// # Errors
///
/// Returns the error of the first failing stage.
pub fn run(input: &Path, aggregate: &AggregateArgs, report: &ReportArgs) -> Result<(), CliError> {
    let aggregation = super::aggregate(input, aggregate)?;
    render(&aggregation.with_summary, report)
}
