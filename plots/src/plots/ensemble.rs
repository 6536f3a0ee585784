use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::debug;

use ensemble_data::{EnsembleData, EnsembleSource};

use crate::PlotBytes;
use crate::create_axis_specs;
use crate::options::{EnsemblePlotOptions, PlotOptions};
use crate::plots::traits::Plot;
use crate::render::RenderConfig;
use crate::render::bitmap::BitmapSurface;
use crate::render::driver::RenderDriver;
use crate::render::drawloop::{Orientation, RenderRequest, RequestSeries};
use crate::render::surface::DrawSurface;
use crate::render::tracker::RenderTracker;
use crate::style::{LineStyle, MarkerShape, MarkerStyle, Rgb, SeriesStyle};

/// The reference case is drawn over the realizations, so it stays readable
/// against any colormap.
static REFCASE_STYLE: Lazy<SeriesStyle> =
    Lazy::new(|| SeriesStyle::default().with_line(LineStyle::new(Rgb::BLACK).with_width(2)));

static OBSERVATION_STYLE: Lazy<SeriesStyle> = Lazy::new(|| {
    let color = Rgb::new(200, 30, 30);
    SeriesStyle::default()
        .with_marker(
            MarkerStyle::new(color)
                .with_size(4)
                .with_shape(MarkerShape::Circle),
        )
        .with_line(LineStyle::new(color))
});

/// Ensemble plot implementation
///
/// Draws one curve per realization in display order, colored from the
/// configured colormap, then the reference case, then observations — so
/// overlays always layer on top of the ensemble.
///
/// [`Plot::render`] draws the whole ensemble on the caller's turn. Hosts
/// with large ensembles should instead build a request with
/// [`build_request`](Self::build_request) and feed it to a driver from
/// [`driver`](Self::driver), which time-slices the work across scheduling
/// turns.
///
/// # Example
///
/// ```rust,no_run
/// use ensemble_data::{EnsembleData, SeriesData};
/// use ensemble_plots::plots::EnsemblePlot;
/// use ensemble_plots::plots::Plot;
/// use ensemble_plots::options::EnsemblePlotOptions;
/// use ensemble_plots::render::RenderConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut data = EnsembleData::new();
/// data.push_series(SeriesData::new("real-0", vec![0.0, 1.0], vec![1.0, 2.0]))?;
///
/// let plot = EnsemblePlot::new();
/// let options = EnsemblePlotOptions::new().width(800u32).height(600u32).build()?;
/// let mut render_config = RenderConfig::default();
/// let bytes = plot.render(data, &options, &mut render_config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct EnsemblePlot;

impl EnsemblePlot {
    /// Create a new EnsemblePlot instance
    pub fn new() -> Self {
        Self
    }

    /// Assemble the drawing workload for one render pass.
    ///
    /// Realization curves come first in source display order, then the
    /// reference case, then one observation series, fixing the z-order.
    pub fn build_request(
        source: &dyn EnsembleSource,
        options: &EnsemblePlotOptions,
    ) -> RenderRequest {
        let mut request = RenderRequest::new(options.orientation);

        let names = source.series_names();
        let count = names.len();
        for (i, name) in names.iter().enumerate() {
            let Some((xs, ys)) = source.samples(name) else {
                continue;
            };
            let style = options.style_overrides.get(name).copied().unwrap_or_else(|| {
                let color = options.colormap.map_index(i, count);
                SeriesStyle::default()
                    .with_line(LineStyle::new(color).with_width(options.curve_width))
            });
            request.push(RequestSeries::curve(
                name.clone(),
                xs.to_vec(),
                ys.to_vec(),
                style,
            ));
        }

        if let Some(refcase) = source.refcase() {
            let style = options
                .style_overrides
                .get(&refcase.name)
                .copied()
                .unwrap_or(*REFCASE_STYLE);
            request.push(RequestSeries::curve(
                refcase.name.clone(),
                refcase.xs.clone(),
                refcase.ys.clone(),
                style,
            ));
        }

        let observations = source.observations();
        if !observations.is_empty() {
            let mut xs = Vec::with_capacity(observations.len());
            let mut ys = Vec::with_capacity(observations.len());
            let mut errors = Vec::with_capacity(observations.len());
            for obs in observations {
                // The anchor sits on the primary axis, the value on the other.
                let [px, py] = match options.orientation {
                    Orientation::Horizontal => [obs.x, obs.value],
                    Orientation::Vertical => [obs.value, obs.x],
                };
                xs.push(px);
                ys.push(py);
                errors.push(obs.error);
            }
            request.push(RequestSeries::observations(
                "Observations",
                xs,
                ys,
                errors,
                *OBSERVATION_STYLE,
            ));
        }

        request
    }

    /// Build a progressive render driver over an arbitrary surface.
    ///
    /// The driver starts with the options' turn budget; hosts install their
    /// deferred-callback hook with
    /// [`with_resume_hook`](RenderDriver::with_resume_hook) using
    /// `options.resume_delay`.
    pub fn driver<S: DrawSurface>(
        surface: S,
        config: RenderConfig,
        options: &EnsemblePlotOptions,
    ) -> RenderDriver<S> {
        RenderDriver::new(surface, config).with_tracker(RenderTracker::new(options.turn_budget))
    }
}

impl Plot for EnsemblePlot {
    type Options = EnsemblePlotOptions;
    type Data = EnsembleData;

    fn render(
        &self,
        data: Self::Data,
        options: &Self::Options,
        render_config: &mut RenderConfig,
    ) -> Result<PlotBytes> {
        let start = std::time::Instant::now();

        let (x_spec, y_spec) = create_axis_specs(&options.x_axis, &options.y_axis, data.extent());
        let surface = BitmapSurface::new(
            options.base(),
            &options.x_axis,
            &options.y_axis,
            x_spec,
            y_spec,
        )?;

        let request = Self::build_request(&data, options);
        debug!(
            series = request.series().len(),
            samples = request.total_samples(),
            "rendering ensemble plot"
        );

        // Hand the caller's callbacks to the driver for the duration of the
        // pass, then give them back.
        let config = std::mem::take(render_config);
        let mut driver = Self::driver(surface, config, options);
        driver.set_data(request);
        driver.render_now();
        let (surface, config) = driver.into_parts();
        *render_config = config;

        let bytes = surface.finish();
        debug!(elapsed = ?start.elapsed(), "ensemble plot rendered");
        bytes
    }
}
