use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use ensemble_data::{EnsembleData, EnsembleSource, Observation, SeriesData};
use ensemble_plots::colormap::ColorMaps;
use ensemble_plots::options::{
    AxisOptions, DistributionPlotOptions, EnsemblePlotOptions,
};
use ensemble_plots::plots::{DistributionPlot, EnsemblePlot, Plot};
use ensemble_plots::render::RenderConfig;

/// ensplot - Render ensemble simulation results to plot images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "ensplot")]
#[command(about = "Render ensemble simulation results to plot images", long_about = None)]
struct Cli {
    /// Path to a JSON dataset; see --demo to generate a synthetic one instead
    #[arg(value_name = "DATASET")]
    input: Option<PathBuf>,

    /// Output image path (JPEG)
    #[arg(short, long, default_value = "plot.jpg")]
    output: PathBuf,

    /// Plot type to render
    #[arg(short = 't', long, value_enum, default_value = "ensemble")]
    plot_type: PlotTypeArg,

    /// Plot width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Plot height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Plot title
    #[arg(long)]
    title: Option<String>,

    /// X-axis label
    #[arg(long)]
    x_label: Option<String>,

    /// Y-axis label
    #[arg(long)]
    y_label: Option<String>,

    /// Colormap for realization curves
    #[arg(long, value_enum, default_value = "viridis")]
    colormap: ColorMapArg,

    /// Per-turn time budget of the render scheduler, in milliseconds
    #[arg(long, default_value = "500")]
    turn_budget_ms: u64,

    /// Generate a synthetic demo ensemble instead of reading a dataset
    #[arg(long)]
    demo: bool,

    /// Number of realizations for --demo
    #[arg(long, default_value = "50")]
    demo_realizations: usize,

    /// Samples per realization for --demo
    #[arg(long, default_value = "200")]
    demo_samples: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum PlotTypeArg {
    /// One curve per realization with observation/refcase overlays
    Ensemble,
    /// Statistical fan (min/max envelope, percentile band, median)
    Distribution,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum ColorMapArg {
    Viridis,
    Plasma,
    Inferno,
    Turbo,
    Cividis,
    Warm,
    Cool,
    Rainbow,
    Spectral,
}

impl From<ColorMapArg> for ColorMaps {
    fn from(arg: ColorMapArg) -> Self {
        match arg {
            ColorMapArg::Viridis => ColorMaps::Viridis,
            ColorMapArg::Plasma => ColorMaps::Plasma,
            ColorMapArg::Inferno => ColorMaps::Inferno,
            ColorMapArg::Turbo => ColorMaps::Turbo,
            ColorMapArg::Cividis => ColorMaps::Cividis,
            ColorMapArg::Warm => ColorMaps::Warm,
            ColorMapArg::Cool => ColorMaps::Cool,
            ColorMapArg::Rainbow => ColorMaps::Rainbow,
            ColorMapArg::Spectral => ColorMaps::Spectral,
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing subscriber with environment filter
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let start_time = Instant::now();

    let data = load_dataset(&args)?;
    info!(
        series = data.series_count(),
        observations = data.observations().len(),
        "dataset loaded"
    );
    if !data.has_series_data() {
        bail!("dataset contains no drawable series");
    }

    let bytes = render(&args, data)?;

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        bytes = bytes.len(),
        elapsed = ?start_time.elapsed(),
        "plot written"
    );
    Ok(())
}

fn load_dataset(args: &Cli) -> Result<EnsembleData> {
    if args.demo {
        debug!(
            realizations = args.demo_realizations,
            samples = args.demo_samples,
            "generating demo ensemble"
        );
        return Ok(demo_ensemble(args.demo_realizations, args.demo_samples));
    }
    let Some(path) = &args.input else {
        bail!("either a DATASET path or --demo is required");
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    EnsembleData::from_json_str(&json)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn render(args: &Cli, data: EnsembleData) -> Result<Vec<u8>> {
    let total_units: u64 = data
        .series()
        .iter()
        .map(|s| s.sample_count() as u64)
        .sum();
    let bar = ProgressBar::new(total_units.max(1));
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} units {msg}")
            .expect("valid progress template"),
    );

    let progress_bar = bar.clone();
    let finished_bar = bar.clone();
    let mut render_config = RenderConfig {
        progress: Some(Box::new(move |info| {
            progress_bar.set_position(info.units_drawn as u64);
            Ok(())
        })),
        finished: Some(Box::new(move || finished_bar.finish_with_message("done"))),
        ..Default::default()
    };

    let x_axis = axis_options(args.x_label.clone())?;
    let y_axis = axis_options(args.y_label.clone())?;
    let mut base_builder = ensemble_plots::options::BasePlotOptions::new();
    base_builder.width(args.width).height(args.height);
    if let Some(title) = &args.title {
        base_builder.title(title.clone());
    }
    let base = base_builder.build()?;

    let bytes = match args.plot_type {
        PlotTypeArg::Ensemble => {
            let options = EnsemblePlotOptions::new()
                .base(base)
                .x_axis(x_axis)
                .y_axis(y_axis)
                .colormap(ColorMaps::from(args.colormap.clone()))
                .turn_budget(Duration::from_millis(args.turn_budget_ms))
                .build()?;
            EnsemblePlot::new().render(data, &options, &mut render_config)?
        }
        PlotTypeArg::Distribution => {
            let options = DistributionPlotOptions::new()
                .base(base)
                .x_axis(x_axis)
                .y_axis(y_axis)
                .build()?;
            DistributionPlot::new().render(data, &options, &mut render_config)?
        }
    };
    Ok(bytes)
}

fn axis_options(label: Option<String>) -> Result<AxisOptions> {
    let mut builder = AxisOptions::new();
    if let Some(label) = label {
        builder.label(label);
    }
    Ok(builder.build()?)
}

/// Random-walk realizations around a shared trend, with a refcase and a few
/// noisy observations of it.
fn demo_ensemble(realizations: usize, samples: usize) -> EnsembleData {
    let mut rng = rand::rng();
    let mut data = EnsembleData::new();

    let xs: Vec<f64> = (0..samples).map(|i| i as f64).collect();
    let trend: Vec<f64> = (0..samples)
        .map(|i| 100.0 + 20.0 * (i as f64 * 0.05).sin() + i as f64 * 0.1)
        .collect();

    for r in 0..realizations {
        let mut offset = rng.random_range(-10.0..10.0);
        let ys: Vec<f64> = trend
            .iter()
            .map(|t| {
                offset += rng.random_range(-0.8..0.8);
                t + offset
            })
            .collect();
        data.push_series(SeriesData::new(format!("real-{r}"), xs.clone(), ys))
            .expect("demo series names are unique");
    }

    data.set_refcase(SeriesData::new("refcase", xs.clone(), trend.clone()))
        .expect("refcase name is valid");

    for i in (0..samples).step_by((samples / 5).max(1)) {
        let noise: f64 = rng.random_range(-5.0..5.0);
        data.push_observation(Observation::new(
            format!("obs-{i}"),
            xs[i],
            trend[i] + noise,
            rng.random_range(2.0..8.0),
        ));
    }

    data
}
