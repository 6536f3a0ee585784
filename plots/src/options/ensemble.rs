use std::time::Duration;

use derive_builder::Builder;
use rustc_hash::FxHashMap;

use crate::colormap::ColorMaps;
use crate::options::{AxisOptions, BasePlotOptions, PlotOptions};
use crate::render::drawloop::Orientation;
use crate::style::SeriesStyle;

/// Options for ensemble plots
///
/// Configuration for plotting many realization curves with observation and
/// reference-case overlays, including the progressive-rendering knobs.
///
/// # Example
///
/// ```rust,no_run
/// use ensemble_plots::options::EnsemblePlotOptions;
/// use ensemble_plots::colormap::ColorMaps;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = EnsemblePlotOptions::new()
///     .width(800u32)
///     .height(600u32)
///     .colormap(ColorMaps::Plasma)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct EnsemblePlotOptions {
    /// Base plot options (layout, dimensions, etc.)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// X-axis configuration
    #[builder(default)]
    pub x_axis: AxisOptions,

    /// Y-axis configuration
    #[builder(default)]
    pub y_axis: AxisOptions,

    /// Primary iteration axis; fixed before a render pass starts
    #[builder(default)]
    pub orientation: Orientation,

    /// Color map realization curves are sampled from
    #[builder(default = "ColorMaps::Viridis")]
    pub colormap: ColorMaps,

    /// Stroke width of realization curves, in pixels
    #[builder(default = "1")]
    pub curve_width: u32,

    /// Per-series style overrides, keyed by series name; series without an
    /// entry use the colormap-derived default
    #[builder(default)]
    pub style_overrides: FxHashMap<String, SeriesStyle>,

    /// How long one scheduling turn may keep drawing before yielding
    #[builder(default = "Duration::from_millis(500)")]
    pub turn_budget: Duration,

    /// Delay before the host resumes a suspended pass
    #[builder(default = "Duration::from_millis(15)")]
    pub resume_delay: Duration,
}

impl Default for EnsemblePlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            orientation: Orientation::Horizontal,
            colormap: ColorMaps::Viridis,
            curve_width: 1,
            style_overrides: FxHashMap::default(),
            turn_budget: Duration::from_millis(500),
            resume_delay: Duration::from_millis(15),
        }
    }
}

impl PlotOptions for EnsemblePlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl EnsemblePlotOptions {
    /// Create a new builder for EnsemblePlotOptions
    pub fn new() -> EnsemblePlotOptionsBuilder {
        EnsemblePlotOptionsBuilder::default()
    }
}

impl EnsemblePlotOptionsBuilder {
    /// Set the plot width without building the base options separately
    pub fn width(&mut self, width: u32) -> &mut Self {
        self.base.get_or_insert_with(BasePlotOptions::default).width = width;
        self
    }

    /// Set the plot height without building the base options separately
    pub fn height(&mut self, height: u32) -> &mut Self {
        self.base.get_or_insert_with(BasePlotOptions::default).height = height;
        self
    }

    /// Set the plot title without building the base options separately
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.base.get_or_insert_with(BasePlotOptions::default).title = title.into();
        self
    }
}
