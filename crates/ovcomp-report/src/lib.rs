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

//! Ovcomp report: figures and tables for overhead results.
//!
//! Turns an aggregated [`ResultSet`](ovcomp_core::ResultSet) into SVG bar
//! charts and LaTeX tables. Each chart is described by a [`ChartSpec`];
//! a [`ChartPlan`] lists them in rendering order and a [`Reporter`] writes
//! the files using one [`RenderConfig`].
//!
//! # Chart kinds
//!
//! | Kind | Output |
//! |------|--------|
//! | `runtime_comparison` | `overheadCompensation.svg` |
//! | `phase_breakdown` | `<benchmark>.svg` |
//! | `driver_detail` | `driver_<benchmark>.svg` |
//! | `phase_comparison` | `<phase>.svg` |
//! | `variant_comparison` | `vs_<variants>.svg`, `<variants>.tex` |
//!
//! Charts with a `max_y` additionally get a clamped `<stem>_<max_y>.svg`.

pub mod chart;
pub mod config;
pub mod error;
pub mod latex;
pub mod plan;
pub mod render;
pub mod reporter;
pub mod series;

pub use chart::{
    clamped_stem, BenchmarkSelection, ChartSpec, DisplayOptions, LabelPlacement,
    DEFAULT_VARIANT_MAX_Y,
};
pub use config::{FontSizes, RenderConfig, SeriesColors, DEFAULT_TEXT_WIDTH_PT, GOLDEN_RATIO};
pub use error::{ReportError, Result};
pub use latex::{variant_table, write_variant_table};
pub use plan::ChartPlan;
pub use render::{render_svg, render_svg_string, Layout};
pub use reporter::{Reporter, RUNTIME_COMPARISON_STEM};
pub use series::{Axis, BarChart, BarSeries, ColorKey, Segment};
