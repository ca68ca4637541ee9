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

//! JSON persistence of result sets.

use crate::error::{max_file_size, OvError, Result};
use crate::model::ResultSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write `set` as pretty-printed JSON, creating parent directories.
///
/// Keys are emitted in sorted order, so unchanged input produces
/// byte-identical files.
///
/// # Errors
///
/// Returns `Err` if the parent directory cannot be created or the file cannot
/// be written.
pub fn save_result_set(set: &ResultSet, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OvError::io_error(parent, e))?;
    }

    let mut json = serde_json::to_string_pretty(set).map_err(|e| OvError::json_error(path, e))?;
    json.push('\n');

    fs::write(path, json).map_err(|e| OvError::io_error(path, e))?;
    info!("saving {}", path.display());
    Ok(())
}

/// Read a result set previously written by [`save_result_set`].
///
/// # Errors
///
/// Returns `Err` if the file is too large, unreadable or not a result set.
pub fn load_result_set(path: impl AsRef<Path>) -> Result<ResultSet> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| OvError::io_error(path, e))?;
    let max = max_file_size();
    if metadata.len() > max {
        return Err(OvError::FileTooLarge {
            path: path.to_path_buf(),
            actual: metadata.len(),
            max,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| OvError::io_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| OvError::json_error(path, e))
}
