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

//! Ovcomp core: benchmark overhead aggregation.
//!
//! Loads per-benchmark measurement files, derives per-phase overhead
//! percentages and the two synthetic average rows, and persists the results
//! as JSON for the reporting stage.
//!
//! ## Usage
//!
//! ```no_run
//! use ovcomp_core::{aggregate, save_result_set, AggregateOptions};
//!
//! # fn main() -> ovcomp_core::Result<()> {
//! let agg = aggregate("spec-output-stats", &AggregateOptions::default())?;
//! save_result_set(&agg.raw, "spec-estimation.json")?;
//! save_result_set(&agg.with_summary, "spec-estimation-with-avg.json")?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod error;
pub mod model;
pub mod persist;

pub use aggregate::{
    aggregate, derive_benchmark, derive_phase, load_raw_benchmark, summarize, with_summary_rows,
    AggregateOptions, Aggregation, RawBenchmark, RawPhase, SkippedInput,
};
pub use error::{OvError, Result, DEFAULT_MAX_FILE_SIZE};
pub use model::{
    mean, BenchmarkResult, DriverSpread, PhaseStats, ResultSet, SummaryRow,
    AVERAGE_WITHOUT_OUTLIER, AVERAGE_WITH_OUTLIER, DEFAULT_OUTLIER, DEFAULT_TOTAL_PHASE,
    PERCENT_TOLERANCE,
};
pub use persist::{load_result_set, save_result_set};
