use thiserror::Error;

/// Custom error type for plot construction and rendering.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Invalid axis range: {start}..{end}")]
    InvalidAxisRange { start: f64, end: f64 },

    #[error("Plot area is empty: {width}x{height} with margin {margin} leaves no room to draw")]
    EmptyPlotArea {
        width: u32,
        height: u32,
        margin: u32,
    },

    #[error("Dataset error: {0}")]
    Data(#[from] ensemble_data::DataError),

    #[error("Failed to encode plot image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PlotError>;
