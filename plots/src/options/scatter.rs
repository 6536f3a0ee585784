use derive_builder::Builder;

use crate::options::{AxisOptions, BasePlotOptions, PlotOptions};
use crate::style::{MarkerStyle, Rgb};

/// Options for cross plots
///
/// A cross plot scatters precomputed value pairs, e.g. principal-component
/// scores or one response against another across realizations.
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct CrossPlotOptions {
    /// Base plot options (layout, dimensions, etc.)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// X-axis configuration
    #[builder(default)]
    pub x_axis: AxisOptions,

    /// Y-axis configuration
    #[builder(default)]
    pub y_axis: AxisOptions,

    /// Marker drawn at every pair
    #[builder(default = "MarkerStyle::new(Rgb::new(31, 119, 180))")]
    pub marker: MarkerStyle,
}

impl Default for CrossPlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            marker: MarkerStyle::new(Rgb::new(31, 119, 180)),
        }
    }
}

impl PlotOptions for CrossPlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl CrossPlotOptions {
    /// Create a new builder for CrossPlotOptions
    pub fn new() -> CrossPlotOptionsBuilder {
        CrossPlotOptionsBuilder::default()
    }
}

impl CrossPlotOptionsBuilder {
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
}
