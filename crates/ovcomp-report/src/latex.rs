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

//! LaTeX tables for variant comparisons.

use crate::error::{ReportError, Result};
use crate::series::BarChart;
use std::fs;
use std::path::Path;
use tracing::info;

/// Column header of a benchmark: the last `.`-separated segment.
fn abbreviate(benchmark: &str) -> &str {
    benchmark.rsplit('.').next().unwrap_or(benchmark)
}

/// Formats a variant comparison as a `tabular` wrapped in an `adjustbox`.
///
/// One column per category (benchmark) with a rotated, abbreviated header,
/// one row per series (variant) with values at one decimal place.
pub fn variant_table(chart: &BarChart) -> String {
    let mut out = String::new();
    out.push_str("\\begin{adjustbox}{max width=1\\textwidth,center}\n");
    out.push_str(&format!(
        "\\begin{{tabular}}{{ {} }}\n",
        "c".repeat(chart.categories.len() + 1)
    ));
    out.push_str("\\hline\n");

    let header = chart
        .categories
        .iter()
        .map(|b| format!("\\rot{{{}\\,}}", abbreviate(b)))
        .collect::<Vec<_>>()
        .join(" & ");
    out.push_str(&format!(" & {} \\\\ \\hline\n", header));

    for series in &chart.series {
        let values = series
            .values
            .iter()
            .map(|v| format!("{:.1}", v))
            .collect::<Vec<_>>()
            .join(" & ");
        out.push_str(&format!("{} & {} \\\\\n", series.label, values));
    }

    out.push_str("\\hline\n");
    out.push_str("\\end{tabular}\n");
    out.push_str("\\end{adjustbox}\n");
    out
}

/// Writes [`variant_table`] to `path`, creating its directory.
///
/// # Errors
///
/// Returns [`ReportError::Io`] naming the path that could not be written.
pub fn write_variant_table(chart: &BarChart, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io_error(parent, e))?;
    }
    info!("saving {}", path.display());
    fs::write(path, variant_table(chart)).map_err(|e| ReportError::io_error(path, e))
}
