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

//! Error types for report generation.

use ovcomp_core::OvError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report generation
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while producing charts and tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Lookup or input error from the aggregated results.
    #[error(transparent)]
    Data(#[from] OvError),

    /// The chart specification cannot be rendered as given.
    #[error("Invalid chart '{chart}': {reason}")]
    InvalidChart {
        /// Output stem or kind of the chart
        chart: String,
        /// Why the specification is invalid
        reason: String,
    },

    /// The plotting backend failed.
    #[error("Failed to render '{path}': {message}")]
    Render {
        /// Output file being rendered
        path: PathBuf,
        /// Backend error message
        message: String,
    },

    /// Output directory or file could not be written.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },
}

impl ReportError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a rendering error with path context.
    pub fn render(path: impl Into<PathBuf>, source: impl fmt::Display) -> Self {
        Self::Render {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid chart error.
    pub fn invalid(chart: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidChart {
            chart: chart.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for missing benchmark or phase keys.
    pub fn is_lookup(&self) -> bool {
        matches!(self, ReportError::Data(e) if e.is_lookup())
    }
}
