//! # ensemble-plots
//!
//! A library for visualizing ensemble simulation results.
//!
//! ## Overview
//!
//! This library provides plot types for ensemble data — realization curves,
//! statistical fans, histograms, cross plots — plus an incremental render
//! scheduler that time-slices the drawing of large ensembles across
//! scheduling turns, so a host event loop stays responsive while thousands
//! of curves are painted.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use ensemble_data::{EnsembleData, SeriesData};
//! use ensemble_plots::{EnsemblePlot, Plot};
//! use ensemble_plots::options::EnsemblePlotOptions;
//! use ensemble_plots::render::RenderConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut data = EnsembleData::new();
//! data.push_series(SeriesData::new("real-0", vec![0.0, 1.0], vec![1.0, 2.0]))?;
//!
//! let plot = EnsemblePlot::new();
//! let options = EnsemblePlotOptions::new()
//!     .width(800u32)
//!     .height(600u32)
//!     .build()?;
//! let mut render_config = RenderConfig::default();
//! let bytes = plot.render(data, &options, &mut render_config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Progressive rendering
//!
//! Hosts that must not block build a
//! [`RenderDriver`](render::driver::RenderDriver) instead of calling
//! [`Plot::render`]: the driver draws a bounded amount of work per turn,
//! asks the host to call back after a short delay, and coalesces redraw
//! requests that arrive while a pass is in flight.
//!
//! ## Architecture
//!
//! - `options`: Plot configuration types using the builder pattern
//! - `plots`: Plot implementations
//! - `render`: The render scheduler (tracker, draw loop, driver), the
//!   drawing-surface abstraction, and the bitmap backend
//! - `style`: Line/marker/area styles
//! - `colormap`: Color map presets for realization coloring
//! - `legend`: Legend entry model and registration callback

pub mod colormap;
pub mod error;
pub mod legend;
pub mod options;
pub mod plots;
pub mod render;
pub mod style;

// Re-export commonly used types
pub use colormap::ColorMaps;
pub use error::PlotError;
pub use legend::LegendEntry;
pub use options::{
    AxisOptions, BasePlotOptions, CrossPlotOptions, DistributionPlotOptions, EnsemblePlotOptions,
    HistogramPlotOptions, PlotOptions,
};
pub use plots::{
    CrossPlot, DistributionPlot, EnsemblePlot, HistogramBin, HistogramPlot, Plot, PlotType,
};
pub use render::driver::RenderDriver;
pub use render::drawloop::{Orientation, RenderRequest, RequestSeries};
pub use render::tracker::{RenderTracker, TrackerState};
pub use render::{ProgressCallback, ProgressInfo, RenderConfig};
pub use style::{AreaStyle, DashPattern, LineStyle, MarkerShape, MarkerStyle, Rgb, SeriesStyle};

// Type aliases
pub type PlotBytes = Vec<u8>;
pub type PlotRange = std::ops::RangeInclusive<f64>;

use std::ops::Range;

/// Resolve both axis ranges for a plot.
///
/// An explicitly configured range wins; otherwise the data extent is rounded
/// out to nice bounds. With neither, a unit range keeps the chart frame
/// drawable.
pub fn create_axis_specs(
    x_axis: &AxisOptions,
    y_axis: &AxisOptions,
    extent: Option<([f64; 2], [f64; 2])>,
) -> (Range<f64>, Range<f64>) {
    let (x_extent, y_extent) = match extent {
        Some((x, y)) => (Some(x), Some(y)),
        None => (None, None),
    };
    (
        resolve_axis_spec(x_axis, x_extent),
        resolve_axis_spec(y_axis, y_extent),
    )
}

fn resolve_axis_spec(axis: &AxisOptions, extent: Option<[f64; 2]>) -> Range<f64> {
    if let Some(range) = &axis.range {
        return *range.start()..*range.end();
    }
    match extent {
        Some([min, max]) => {
            let (nice_min, nice_max) = nice_bounds(min, max);
            nice_min..nice_max
        }
        None => 0.0..1.0,
    }
}

/// Round a data range out to bounds that read well on an axis.
pub fn nice_bounds(min: f64, max: f64) -> (f64, f64) {
    if min.is_infinite() || max.is_infinite() || min.is_nan() || max.is_nan() {
        return (0.0, 1.0); // Fallback for invalid ranges
    }

    let range = max - min;
    if range == 0.0 {
        return (min - 0.5, min + 0.5); // Handle single-point case
    }

    // Find nice step size
    let step_size = 10_f64.powf(range.log10().floor());
    let nice_min = (min / step_size).floor() * step_size;
    let nice_max = (max / step_size).ceil() * step_size;

    (nice_min, nice_max)
}
