use anyhow::Result;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use ensemble_data::{EnsembleData, EnsembleSource};

use crate::PlotBytes;
use crate::create_axis_specs;
use crate::legend::LegendEntry;
use crate::options::{DistributionPlotOptions, PlotOptions};
use crate::plots::traits::Plot;
use crate::render::bitmap::BitmapSurface;
use crate::render::surface::DrawSurface;
use crate::render::{ProgressInfo, RenderConfig};
use crate::style::{AreaStyle, LineStyle, MarkerStyle, Rgb, SeriesStyle};

/// Per-index statistics across all realizations.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fan {
    pub xs: Vec<f64>,
    pub min: Vec<f64>,
    pub low: Vec<f64>,
    pub median: Vec<f64>,
    pub high: Vec<f64>,
    pub max: Vec<f64>,
}

/// Distribution plot implementation
///
/// Condenses an ensemble into a statistical fan: the min/max envelope, an
/// inner percentile band, and the median curve. Sample positions are taken
/// from the first non-empty series; realizations that are shorter than an
/// index simply drop out of that index's statistics.
#[derive(Debug, Default)]
pub struct DistributionPlot;

impl DistributionPlot {
    /// Create a new DistributionPlot instance
    pub fn new() -> Self {
        Self
    }
}

/// Value at quantile `q` of sorted `values` (nearest-rank).
fn quantile(values: &[f64], q: f64) -> f64 {
    let idx = ((values.len() - 1) as f64 * q).round() as usize;
    values[idx]
}

pub(crate) fn compute_fan(data: &EnsembleData, low: f64, high: f64) -> Option<Fan> {
    let xs: Vec<f64> = data
        .series()
        .iter()
        .find(|s| !s.is_empty())
        .map(|s| s.xs[..s.sample_count()].to_vec())?;

    let columns: Vec<[f64; 5]> = (0..xs.len())
        .into_par_iter()
        .map(|i| {
            let mut values: Vec<f64> = data
                .series()
                .iter()
                .filter(|s| s.sample_count() > i)
                .map(|s| s.ys[i])
                .filter(|v| v.is_finite())
                .collect();
            if values.is_empty() {
                return [f64::NAN; 5];
            }
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            [
                values[0],
                quantile(&values, low),
                quantile(&values, 0.5),
                quantile(&values, high),
                values[values.len() - 1],
            ]
        })
        .collect();

    let (min, low, median, high, max): (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) =
        columns
            .into_iter()
            .map(|[min, low, median, high, max]| (min, low, median, high, max))
            .multiunzip();
    Some(Fan {
        xs,
        min,
        low,
        median,
        high,
        max,
    })
}

/// Fill the strip between an upper and a lower curve, one quad per span.
fn fill_band(
    surface: &mut BitmapSurface,
    xs: &[f64],
    upper: &[f64],
    lower: &[f64],
    style: &AreaStyle,
) {
    for i in 1..xs.len() {
        if ![upper[i - 1], upper[i], lower[i - 1], lower[i]]
            .iter()
            .all(|v| v.is_finite())
        {
            continue;
        }
        surface.fill_quad(
            [
                [xs[i - 1], upper[i - 1]],
                [xs[i], upper[i]],
                [xs[i], lower[i]],
                [xs[i - 1], lower[i - 1]],
            ],
            style,
        );
    }
}

impl Plot for DistributionPlot {
    type Options = DistributionPlotOptions;
    type Data = EnsembleData;

    fn render(
        &self,
        data: Self::Data,
        options: &Self::Options,
        render_config: &mut RenderConfig,
    ) -> Result<PlotBytes> {
        let (x_spec, y_spec) = create_axis_specs(&options.x_axis, &options.y_axis, data.extent());
        let mut surface = BitmapSurface::new(
            options.base(),
            &options.x_axis,
            &options.y_axis,
            x_spec,
            y_spec,
        )?;

        let Some(fan) = compute_fan(&data, options.band_low, options.band_high) else {
            debug!("distribution plot rendered without series data");
            render_config.notify_finished();
            return surface.finish();
        };

        let envelope = AreaStyle::new(options.envelope_fill);
        let band = AreaStyle::new(options.band_fill);
        render_config.register_legend(&LegendEntry::new(
            "Min/max",
            SeriesStyle::default().with_area(envelope),
        ));
        render_config.register_legend(&LegendEntry::new(
            format!(
                "P{:.0}-P{:.0}",
                options.band_low * 100.0,
                options.band_high * 100.0
            ),
            SeriesStyle::default().with_area(band),
        ));
        render_config.register_legend(&LegendEntry::new(
            "Median",
            SeriesStyle::default().with_line(options.median_style),
        ));

        fill_band(&mut surface, &fan.xs, &fan.max, &fan.min, &envelope);
        fill_band(&mut surface, &fan.xs, &fan.high, &fan.low, &band);
        for i in 1..fan.xs.len() {
            if fan.median[i - 1].is_finite() && fan.median[i].is_finite() {
                surface.draw_segment(
                    [fan.xs[i - 1], fan.median[i - 1]],
                    [fan.xs[i], fan.median[i]],
                    &options.median_style,
                );
            }
        }

        // Observations layer on top of the fan, as in the ensemble plot.
        let obs_color = Rgb::new(200, 30, 30);
        for obs in data.observations() {
            if obs.error > 0.0 {
                surface.draw_segment(
                    [obs.x, obs.value - obs.error],
                    [obs.x, obs.value + obs.error],
                    &LineStyle::new(obs_color),
                );
            }
            surface.draw_marker([obs.x, obs.value], &MarkerStyle::new(obs_color).with_size(4));
        }

        let total = fan.xs.len();
        render_config.report_progress(ProgressInfo::new(total, total));
        render_config.notify_finished();
        surface.finish()
    }
}
