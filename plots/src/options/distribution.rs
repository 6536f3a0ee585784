use derive_builder::Builder;

use crate::options::{AxisOptions, BasePlotOptions, PlotOptions};
use crate::style::{LineStyle, Rgb};

/// Options for distribution plots
///
/// A distribution plot condenses an ensemble into a statistical fan:
/// a min/max envelope, an inner percentile band, and the median curve.
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct DistributionPlotOptions {
    /// Base plot options (layout, dimensions, etc.)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// X-axis configuration
    #[builder(default)]
    pub x_axis: AxisOptions,

    /// Y-axis configuration
    #[builder(default)]
    pub y_axis: AxisOptions,

    /// Fill color of the min/max envelope
    #[builder(default = "Rgb::new(222, 235, 247)")]
    pub envelope_fill: Rgb,

    /// Fill color of the inner percentile band
    #[builder(default = "Rgb::new(158, 202, 225)")]
    pub band_fill: Rgb,

    /// Lower percentile of the inner band, in `(0.0, 0.5)`
    #[builder(default = "0.10")]
    pub band_low: f64,

    /// Upper percentile of the inner band, in `(0.5, 1.0)`
    #[builder(default = "0.90")]
    pub band_high: f64,

    /// Median curve style
    #[builder(default = "LineStyle::new(Rgb::new(8, 81, 156)).with_width(2)")]
    pub median_style: LineStyle,
}

impl Default for DistributionPlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            envelope_fill: Rgb::new(222, 235, 247),
            band_fill: Rgb::new(158, 202, 225),
            band_low: 0.10,
            band_high: 0.90,
            median_style: LineStyle::new(Rgb::new(8, 81, 156)).with_width(2),
        }
    }
}

impl PlotOptions for DistributionPlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl DistributionPlotOptions {
    /// Create a new builder for DistributionPlotOptions
    pub fn new() -> DistributionPlotOptionsBuilder {
        DistributionPlotOptionsBuilder::default()
    }
}

impl DistributionPlotOptionsBuilder {
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
