pub mod axis;
pub mod base;
pub mod distribution;
pub mod ensemble;
pub mod histogram;
pub mod scatter;

pub use axis::{AxisOptions, AxisOptionsBuilder};
pub use base::{BasePlotOptions, BasePlotOptionsBuilder};
pub use distribution::{DistributionPlotOptions, DistributionPlotOptionsBuilder};
pub use ensemble::{EnsemblePlotOptions, EnsemblePlotOptionsBuilder};
pub use histogram::{HistogramPlotOptions, HistogramPlotOptionsBuilder};
pub use scatter::{CrossPlotOptions, CrossPlotOptionsBuilder};

/// Trait for plot options types
///
/// All plot-specific options structs should implement this trait to provide
/// access to the base options.
pub trait PlotOptions {
    /// Get a reference to the base plot options
    fn base(&self) -> &BasePlotOptions;
}
