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

//! Error type of the ovcomp CLI.

use ovcomp_core::OvError;
use ovcomp_report::ReportError;
use thiserror::Error;

/// Errors raised by CLI commands.
///
/// Library errors pass through unchanged so the message printed on stderr
/// names the missing benchmark, phase or path.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Aggregation or result file failure.
    #[error(transparent)]
    Core(#[from] OvError),

    /// Chart or table failure.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Aggregation produced nothing to report on.
    #[error("No benchmark results found in '{0}'")]
    NoResults(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pass_through() {
        let err: CliError = OvError::UnknownPhase {
            benchmark: "403.gcc".to_string(),
            phase: "ss-all".to_string(),
        }
        .into();
        assert!(err.to_string().contains("ss-all"));

        let err: CliError = ReportError::invalid("vs_", "no variants given").into();
        assert!(err.to_string().contains("no variants given"));

        let err = CliError::NoResults("stats".to_string());
        assert_eq!(err.to_string(), "No benchmark results found in 'stats'");
    }
}
