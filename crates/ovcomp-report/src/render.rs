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

//! SVG rendering of [`BarChart`]s.
//!
//! Bars of one category are grouped into a band of width 0.8 around the
//! integer x position of the category; every slot gets an equal share of
//! that band. A clamped chart fixes the y range to `0..max_y`, cuts bars at
//! the bound and prints the true height of every cut stack.

use crate::chart::{DisplayOptions, LabelPlacement};
use crate::config::RenderConfig;
use crate::error::{ReportError, Result};
use crate::series::{Axis, BarChart};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Share of a category band covered by bars.
const GROUP_WIDTH: f64 = 0.8;

/// Headroom above the tallest bar of an unclamped chart.
const HEADROOM: f64 = 1.1;

/// Relative height of overlay labels inside a clamped bar.
const OVERLAY_HEIGHT: f64 = 0.92;

/// Geometry and clamping of one rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Width as a fraction of the text width.
    pub width: f64,
    /// Height relative to width.
    pub ratio: f64,
    /// Vertical x tick labels.
    pub rotate_labels: bool,
    /// Title drawn above the plot.
    pub title: Option<String>,
    /// Y bound and label placement of a clamped rendering.
    pub clamp: Option<(f64, LabelPlacement)>,
}

impl Layout {
    /// Unclamped layout following the display options.
    pub fn from_display(display: &DisplayOptions, title: Option<&str>) -> Self {
        Self {
            width: display.width,
            ratio: display.ratio,
            rotate_labels: display.rotate_labels,
            title: display.title.clone().or_else(|| title.map(str::to_string)),
            clamp: None,
        }
    }

    /// Clamps the y axis at `max_y`.
    pub fn clamped(mut self, max_y: f64, placement: LabelPlacement) -> Self {
        self.clamp = Some((max_y, placement));
        self
    }
}

/// Renders a chart into an SVG file, creating its directory.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory cannot be created and
/// [`ReportError::Render`] if the backend fails.
pub fn render_svg(
    chart: &BarChart,
    layout: &Layout,
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io_error(parent, e))?;
    }

    let size = config.figure_size(layout.width, layout.ratio);
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw(&root, chart, layout, config).map_err(|e| ReportError::render(path, e))
}

/// Renders a chart into an in-memory SVG document.
///
/// # Errors
///
/// Returns [`ReportError::Render`] if the backend fails.
pub fn render_svg_string(
    chart: &BarChart,
    layout: &Layout,
    config: &RenderConfig,
) -> Result<String> {
    let mut svg = String::new();
    {
        let size = config.figure_size(layout.width, layout.ratio);
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(&root, chart, layout, config).map_err(|e| ReportError::render("<memory>", e))?;
    }
    Ok(svg)
}

/// Left and right x of a bar.
fn bar_span(category: usize, slot: usize, slots: usize) -> (f64, f64) {
    let width = GROUP_WIDTH / slots as f64;
    let left = category as f64 - GROUP_WIDTH / 2.0 + slot as f64 * width;
    (left, left + width)
}

fn bar_center(category: usize, slot: usize, slots: usize) -> f64 {
    let (left, right) = bar_span(category, slot, slots);
    (left + right) / 2.0
}

/// Y range of the plot area.
fn y_range(chart: &BarChart, layout: &Layout) -> (f64, f64) {
    if let Some((max_y, _)) = layout.clamp {
        return (0.0, max_y);
    }
    let (low, high) = chart.value_range();
    let high = if high > 0.0 { high * HEADROOM } else { 1.0 };
    let low = if low < 0.0 { low * HEADROOM } else { 0.0 };
    (low, high)
}

/// Value label of a stack, the rounded integer height.
pub fn value_label(top: f64) -> String {
    format!("{}", top.round() as i64)
}

fn font<'a>(config: &'a RenderConfig, points: f64, style: FontStyle) -> FontDesc<'a> {
    FontDesc::new(
        FontFamily::from(config.font_family.as_str()),
        f64::from(config.px(points)),
        style,
    )
}

fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &BarChart,
    layout: &Layout,
    config: &RenderConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let categories = chart.categories.len().max(1);
    let slots = chart.slots();
    let (y_low, y_high) = y_range(chart, layout);
    let clip = |value: f64| value.clamp(y_low, y_high);

    let sizes = config.font_sizes;
    let longest = chart.categories.iter().map(|c| c.len()).max().unwrap_or(1) as f64;
    let x_label_area = if layout.rotate_labels {
        config.px(sizes.tick * 0.6 * longest + 6.0)
    } else {
        config.px(sizes.tick * 2.0)
    };

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(config.px(4.0))
        .x_label_area_size(x_label_area)
        .y_label_area_size(config.px(sizes.axis * 3.5));
    if let Some(title) = &layout.title {
        builder.caption(title, font(config, sizes.title, FontStyle::Normal));
    }
    if layout.clamp.is_some() {
        builder.margin_top(config.px(4.0 + sizes.label_above * 1.5));
    }
    let mut plot = builder.build_cartesian_2d(-0.5..(categories as f64 - 0.5), y_low..y_high)?;

    let x_formatter = |x: &f64| {
        let idx = x.round();
        if idx >= 0.0 && (x - idx).abs() < 0.3 {
            chart.categories.get(idx as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };
    let tick = font(config, sizes.tick, FontStyle::Normal);
    let x_tick = if layout.rotate_labels {
        tick.clone().transform(FontTransform::Rotate90)
    } else {
        tick.clone()
    };
    let y_desc = match chart.axis {
        Axis::Overhead => config.overhead_label.as_str(),
        Axis::Runtime => config.runtime_label.as_str(),
    };

    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(categories)
        .x_label_formatter(&x_formatter)
        .x_label_style(x_tick)
        .y_label_style(tick)
        .y_desc(y_desc)
        .axis_desc_style(font(config, sizes.axis, FontStyle::Normal))
        .draw()?;

    let segments = chart.segments();
    for (index, series) in chart.series.iter().enumerate() {
        let color = config.color(&series.color);
        let bars = segments
            .iter()
            .filter(|seg| seg.series == index)
            .map(|seg| {
                let (left, right) = bar_span(seg.category, seg.slot, slots);
                Rectangle::new([(left, clip(seg.bottom)), (right, clip(seg.top))], color.filled())
            })
            .collect::<Vec<_>>();

        let drawn = plot.draw_series(bars)?;
        if chart.series.len() > 1 {
            let half = config.px(sizes.legend / 2.0) as i32;
            drawn
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - half), (x + 2 * half, y + half)], color.filled())
                });
        }

        if let Some(errors) = &series.errors {
            let whisker = config.px(3.0);
            let bars = series
                .values
                .iter()
                .zip(errors)
                .enumerate()
                .filter_map(|(category, (value, error))| {
                    let (below, above) = (*error)?;
                    let x = bar_center(category, series.slot, slots);
                    Some(ErrorBar::new_vertical(
                        x,
                        clip(value - below),
                        clip(*value),
                        clip(value + above),
                        config.colors.error_bar.stroke_width(1),
                        whisker,
                    ))
                })
                .collect::<Vec<_>>();
            plot.draw_series(bars)?;
        }
    }

    if chart.series.len() > 1 {
        plot.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(font(config, sizes.legend, FontStyle::Normal))
            .draw()?;
    }

    if let Some((max_y, placement)) = layout.clamp {
        for (category, slot, top) in chart.stack_tops() {
            if top <= max_y {
                continue;
            }
            let x = bar_center(category, slot, slots);
            let text = value_label(top);
            match placement {
                LabelPlacement::AboveAxis => {
                    let (px, py) = plot.backend_coord(&(x, max_y));
                    let style = font(config, sizes.label_above, FontStyle::Normal)
                        .color(&BLACK)
                        .pos(Pos::new(HPos::Center, VPos::Bottom));
                    root.draw(&Text::new(text, (px, py - config.px(1.0) as i32), style))?;
                }
                LabelPlacement::Overlay => {
                    let position = plot.backend_coord(&(x, max_y * OVERLAY_HEIGHT));
                    let style = font(config, sizes.label_overlay, FontStyle::Bold)
                        .color(&WHITE)
                        .pos(Pos::new(HPos::Center, VPos::Center));
                    root.draw(&Text::new(text, position, style))?;
                }
            }
        }
    }

    root.present()?;
    Ok(())
}
