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

//! Ovcomp CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **aggregate**: derive overhead percentages from a directory of raw
//!   per-benchmark measurements and save the raw and averaged result files
//! - **report**: render a chart plan from an averaged result file
//! - **run**: aggregate, then report on the fresh results
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use ovcomp_cli::cli::Commands;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(subcommand)]
//!     command: Commands,
//! }
//!
//! let cli = Cli::parse_from(["ovcomp", "aggregate", "spec-output-stats"]);
//! cli.command.execute().unwrap();
//! ```
//!
//! # Limits
//!
//! Input files larger than `OVCOMP_MAX_FILE_SIZE` bytes (default 64 MiB)
//! are skipped during aggregation and rejected when loading results.
//!
//! # Error Handling
//!
//! Commands return [`error::CliError`]; [`cli::Commands::execute`] turns it
//! into the message printed by the binary.

pub mod cli;
pub mod commands;
pub mod error;
