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

//! Error types for overhead aggregation.
//!
//! Per-benchmark input problems are reported through these variants and then
//! downgraded to skips by the aggregator; lookup failures are always fatal to
//! the caller that asked for the missing key.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Default maximum input file size (64 MB).
///
/// Can be overridden via the `OVCOMP_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Result type for aggregation operations
pub type Result<T> = std::result::Result<T, OvError>;

/// Errors that can occur while loading, aggregating or persisting results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OvError {
    /// I/O operation failed (directory listing, file read or write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Input file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// The offending file
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// JSON could not be parsed or produced.
    #[error("JSON error for '{path}': {message}")]
    Json {
        /// The file being read or written
        path: PathBuf,
        /// The serde_json error message
        message: String,
    },

    /// A benchmark name is not present in the result set.
    #[error("Unknown benchmark '{name}'")]
    UnknownBenchmark {
        /// The requested benchmark name
        name: String,
    },

    /// A phase name is not present in a benchmark.
    #[error("Unknown phase '{phase}' in benchmark '{benchmark}'")]
    UnknownPhase {
        /// The benchmark that was searched
        benchmark: String,
        /// The requested phase name
        phase: String,
    },

    /// Input is structurally valid JSON but semantically unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl OvError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a JSON error with path context.
    pub fn json_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns `true` for missing benchmark or phase keys.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            OvError::UnknownBenchmark { .. } | OvError::UnknownPhase { .. }
        )
    }
}

/// Maximum accepted input file size, honouring `OVCOMP_MAX_FILE_SIZE`.
pub fn max_file_size() -> u64 {
    std::env::var("OVCOMP_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}
