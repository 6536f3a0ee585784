use derive_builder::Builder;

use crate::options::{AxisOptions, BasePlotOptions, PlotOptions};
use crate::style::{LineStyle, Rgb};

/// Options for histogram plots
///
/// Histograms draw caller-supplied, pre-binned bars; this crate does not do
/// the binning itself.
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct HistogramPlotOptions {
    /// Base plot options (layout, dimensions, etc.)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// X-axis configuration
    #[builder(default)]
    pub x_axis: AxisOptions,

    /// Y-axis configuration
    #[builder(default)]
    pub y_axis: AxisOptions,

    /// Bar fill color
    #[builder(default = "Rgb::new(70, 130, 180)")]
    pub fill: Rgb,

    /// Optional bar outline
    pub outline: Option<LineStyle>,
}

impl Default for HistogramPlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            fill: Rgb::new(70, 130, 180),
            outline: Some(LineStyle::new(Rgb::BLACK)),
        }
    }
}

impl PlotOptions for HistogramPlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl HistogramPlotOptions {
    /// Create a new builder for HistogramPlotOptions
    pub fn new() -> HistogramPlotOptionsBuilder {
        HistogramPlotOptionsBuilder::default()
    }
}

impl HistogramPlotOptionsBuilder {
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
