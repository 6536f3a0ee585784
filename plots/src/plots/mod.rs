pub mod distribution;
pub mod ensemble;
pub mod histogram;
pub mod scatter;
pub mod traits;

pub use distribution::DistributionPlot;
pub use ensemble::EnsemblePlot;
pub use histogram::{HistogramBin, HistogramPlot};
pub use scatter::CrossPlot;
pub use traits::Plot;

/// Plot type enumeration
///
/// This enum can be used to dispatch to different plot implementations.
/// However, for better type safety and extensibility, prefer using the
/// `Plot` trait directly with specific plot types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotType {
    /// Ensemble plot (one curve per realization, overlays on top)
    Ensemble,
    /// Distribution plot (statistical fan across realizations)
    Distribution,
    /// Histogram plot (pre-binned bars)
    Histogram,
    /// Cross plot (scatter of precomputed value pairs)
    Cross,
}
