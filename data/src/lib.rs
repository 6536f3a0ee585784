//! # ensemble-data
//!
//! In-memory dataset model for ensemble simulation results.
//!
//! An [`EnsembleData`] holds a set of named sample series in a fixed display
//! order, optional observed values with measurement uncertainty, and an
//! optional reference-case series. Plotting crates consume it through the
//! [`EnsembleSource`] trait so they work with any data structure that can
//! answer the same questions.
//!
//! ```rust
//! use ensemble_data::{EnsembleData, EnsembleSource, SeriesData};
//!
//! let mut data = EnsembleData::new();
//! data.push_series(SeriesData::new(
//!     "real-0",
//!     vec![0.0, 1.0, 2.0],
//!     vec![10.0, 11.5, 11.0],
//! ))?;
//! assert!(data.has_series_data());
//! # Ok::<(), ensemble_data::DataError>(())
//! ```

pub use ensemble::{EnsembleData, EnsembleSource};
pub use error::{DataError, Result};
pub use observation::Observation;
pub use series::SeriesData;

pub mod ensemble;
pub mod error;
pub mod observation;
pub mod series;
mod tests;

pub type SeriesName = String;
pub type SampleCount = usize;
