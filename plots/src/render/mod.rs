pub mod bitmap;
pub mod drawloop;
pub mod driver;
pub mod progress;
pub mod surface;
pub mod tracker;

pub use progress::{ProgressCallback, ProgressInfo};

use tracing::warn;

use crate::legend::{LegendCallback, LegendEntry};

/// Configuration for plot rendering
///
/// This struct allows applications to inject their own progress reporting,
/// legend registration, and completion handling without the library
/// depending on specific frameworks.
#[derive(Default)]
pub struct RenderConfig {
    /// Optional progress callback for reporting rendering progress
    ///
    /// Applications can provide a callback to receive progress updates after
    /// each turn of a progressive render pass.
    pub progress: Option<ProgressCallback>,

    /// Optional legend registration callback
    ///
    /// Invoked once per series at the start of every render pass, for the
    /// full series list of the pass.
    pub legend: Option<LegendCallback>,

    /// Optional completion callback
    ///
    /// Fires exactly once per pass that runs to completion; abandoned
    /// passes never fire it. Callers use it to refresh auxiliary UI.
    pub finished: Option<Box<dyn FnMut()>>,
}

impl RenderConfig {
    /// Create a new RenderConfig with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Call the progress callback if present
    pub fn report_progress(&mut self, info: ProgressInfo) {
        if let Some(callback) = &mut self.progress {
            if let Err(e) = callback(info) {
                warn!("failed to report progress: {e}");
            }
        }
    }

    /// Call the legend callback if present
    pub fn register_legend(&mut self, entry: &LegendEntry) {
        if let Some(callback) = &mut self.legend {
            callback(entry);
        }
    }

    /// Call the completion callback if present
    pub fn notify_finished(&mut self) {
        if let Some(callback) = &mut self.finished {
            callback();
        }
    }
}
