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

//! Render configuration.
//!
//! All plotting settings (fonts, figure geometry, colours, output locations)
//! live in one [`RenderConfig`] owned by a [`Reporter`](crate::Reporter)
//! for the duration of a report run.

use crate::series::ColorKey;
use plotters::style::RGBColor;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Width of the document text block in TeX points (`\the\textwidth`).
pub const DEFAULT_TEXT_WIDTH_PT: f64 = 497.92325;

/// Golden-ratio figure height relative to width.
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_895;

/// Fallback colours for variants without a fixed assignment.
const VARIANT_PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Font sizes in TeX points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    /// Chart title.
    pub title: f64,
    /// Axis descriptions.
    pub axis: f64,
    /// Tick labels.
    pub tick: f64,
    /// Legend entries.
    pub legend: f64,
    /// Value labels placed above the plot area.
    pub label_above: f64,
    /// Value labels overlaid on a bar.
    pub label_overlay: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 10.0,
            axis: 10.0,
            tick: 8.0,
            legend: 8.0,
            label_above: 6.0,
            label_overlay: 8.0,
        }
    }
}

/// Colours of the fixed series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColors {
    /// Sampling overhead.
    pub sampling: RGBColor,
    /// Instrumentation overhead.
    pub instrumentation: RGBColor,
    /// Unwind overhead.
    pub unwinding: RGBColor,
    /// Driver measurement.
    pub driver: RGBColor,
    /// Runtime before compensation.
    pub profiled: RGBColor,
    /// Runtime after compensation.
    pub compensated: RGBColor,
    /// Reference runtime.
    pub reference: RGBColor,
    /// Driver min/max error bars.
    pub error_bar: RGBColor,
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self {
            sampling: RGBColor(255, 187, 120),
            instrumentation: RGBColor(31, 119, 180),
            unwinding: RGBColor(214, 39, 40),
            driver: RGBColor(44, 160, 44),
            profiled: RGBColor(255, 187, 120),
            compensated: RGBColor(31, 119, 180),
            reference: RGBColor(44, 160, 44),
            error_bar: RGBColor(0, 0, 0),
        }
    }
}

/// Plotting configuration for one report run.
///
/// # Example
///
/// ```
/// use ovcomp_report::RenderConfig;
///
/// let config = RenderConfig::default()
///     .with_figure_dir("thesis/fig")
///     .with_table_dir("thesis/tables")
///     .with_font_family("serif");
/// assert_eq!(config.figure_dir.to_str(), Some("thesis/fig"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Directory receiving SVG figures.
    pub figure_dir: PathBuf,
    /// Directory receiving LaTeX tables.
    pub table_dir: PathBuf,
    /// Font family for all text.
    pub font_family: String,
    /// Font sizes in TeX points.
    pub font_sizes: FontSizes,
    /// Width of the document text block in TeX points.
    pub text_width_pt: f64,
    /// Output pixels per TeX point.
    pub pixels_per_pt: f64,
    /// Y axis description of overhead charts.
    pub overhead_label: String,
    /// Y axis description of runtime charts.
    pub runtime_label: String,
    /// Colours of the fixed series.
    pub colors: SeriesColors,
    /// Fixed colour per variant name.
    pub variant_colors: BTreeMap<String, RGBColor>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let variant_colors = [
            ("ss-all", RGBColor(31, 119, 180)),
            ("ss-cpd", RGBColor(174, 199, 232)),
            ("ss-min", RGBColor(23, 190, 207)),
            ("ss-conj", RGBColor(158, 218, 229)),
            ("unw-all", RGBColor(214, 39, 40)),
            ("unw-min", RGBColor(255, 152, 150)),
            ("hybrid-st", RGBColor(44, 160, 44)),
            ("hybrid-dyn", RGBColor(152, 223, 138)),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color))
        .collect();

        Self {
            figure_dir: PathBuf::from("fig"),
            table_dir: PathBuf::from("tables"),
            font_family: "serif".to_string(),
            font_sizes: FontSizes::default(),
            text_width_pt: DEFAULT_TEXT_WIDTH_PT,
            pixels_per_pt: 2.0,
            overhead_label: "Overhead [%]".to_string(),
            runtime_label: "Runtime [s]".to_string(),
            colors: SeriesColors::default(),
            variant_colors,
        }
    }
}

impl RenderConfig {
    /// Sets the figure output directory.
    pub fn with_figure_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.figure_dir = dir.into();
        self
    }

    /// Sets the table output directory.
    pub fn with_table_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.table_dir = dir.into();
        self
    }

    /// Sets the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Sets the output resolution; non-positive values are ignored.
    pub fn with_pixels_per_pt(mut self, pixels_per_pt: f64) -> Self {
        if pixels_per_pt > 0.0 {
            self.pixels_per_pt = pixels_per_pt;
        }
        self
    }

    /// Assigns a fixed colour to a variant.
    pub fn with_variant_color(mut self, variant: impl Into<String>, color: RGBColor) -> Self {
        self.variant_colors.insert(variant.into(), color);
        self
    }

    /// Figure size in pixels for a width fraction and height ratio.
    pub fn figure_size(&self, width: f64, ratio: f64) -> (u32, u32) {
        let width_px = self.text_width_pt * width * self.pixels_per_pt;
        let height_px = width_px * ratio;
        (width_px.round().max(1.0) as u32, height_px.round().max(1.0) as u32)
    }

    /// Converts a size in TeX points to output pixels.
    pub fn px(&self, points: f64) -> u32 {
        (points * self.pixels_per_pt).round().max(1.0) as u32
    }

    /// Colour of a series.
    ///
    /// Variants without a fixed assignment fall back to a palette entry
    /// derived from the variant name, so it matches across charts.
    pub fn color(&self, key: &ColorKey) -> RGBColor {
        match key {
            ColorKey::Sampling => self.colors.sampling,
            ColorKey::Instrumentation => self.colors.instrumentation,
            ColorKey::Unwinding => self.colors.unwinding,
            ColorKey::Driver => self.colors.driver,
            ColorKey::Profiled => self.colors.profiled,
            ColorKey::Compensated => self.colors.compensated,
            ColorKey::Reference => self.colors.reference,
            ColorKey::Variant(name) => self
                .variant_colors
                .get(name)
                .copied()
                .unwrap_or_else(|| palette_color(name)),
        }
    }
}

/// Palette entry of a name, stable across runs and platforms (FNV-1a).
fn palette_color(name: &str) -> RGBColor {
    let hash = name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    VARIANT_PALETTE[(hash % VARIANT_PALETTE.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_size() {
        let config = RenderConfig::default().with_pixels_per_pt(1.0);
        let (w, h) = config.figure_size(1.0, 0.5);
        assert_eq!(w, 498);
        assert_eq!(h, 249);

        let (w, _) = config.figure_size(0.5, GOLDEN_RATIO);
        assert_eq!(w, 249);
    }

    #[test]
    fn test_ignores_non_positive_resolution() {
        let config = RenderConfig::default().with_pixels_per_pt(0.0);
        assert_eq!(config.pixels_per_pt, 2.0);
        assert_eq!(config.px(8.0), 16);
    }

    #[test]
    fn test_variant_colors_are_fixed() {
        let config = RenderConfig::default();
        let key = ColorKey::Variant("unw-min".to_string());
        assert_eq!(config.color(&key), RGBColor(255, 152, 150));

        let unknown = ColorKey::Variant("custom".to_string());
        assert_eq!(config.color(&unknown), palette_color("custom"));
        assert!(VARIANT_PALETTE.contains(&config.color(&unknown)));

        let config = config.with_variant_color("custom", RGBColor(1, 2, 3));
        assert_eq!(config.color(&unknown), RGBColor(1, 2, 3));
    }
}
