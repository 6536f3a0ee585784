use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};
use crate::observation::Observation;
use crate::series::SeriesData;

/// Interface plots use to read ensemble results.
///
/// Implement this for application-specific storage to plot it without
/// converting into [`EnsembleData`] first. Series names are returned in
/// display order; that order decides drawing order and therefore the visual
/// stacking of curves.
pub trait EnsembleSource {
    /// Series names in display order.
    fn series_names(&self) -> Vec<String>;

    /// Both axis slices for a series, or `None` if the name is unknown.
    fn samples(&self, name: &str) -> Option<(&[f64], &[f64])>;

    /// True when at least one series has a drawable sample.
    fn has_series_data(&self) -> bool;

    /// Observed values to overlay, in display order.
    fn observations(&self) -> &[Observation] {
        &[]
    }

    /// Optional reference-case series drawn on top of the ensemble.
    fn refcase(&self) -> Option<&SeriesData> {
        None
    }
}

/// A set of named sample series plus overlay data.
///
/// Series keep their insertion order; lookups by name go through an internal
/// index so repeated queries stay cheap even for large ensembles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnsembleData {
    series: Vec<SeriesData>,
    #[serde(default)]
    observations: Vec<Observation>,
    #[serde(default)]
    refcase: Option<SeriesData>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl EnsembleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a series. Names must be unique and non-empty.
    pub fn push_series(&mut self, series: SeriesData) -> Result<()> {
        series.validate()?;
        if self.index.len() != self.series.len() {
            self.rebuild_index();
        }
        if self.index.contains_key(&series.name) {
            return Err(DataError::DuplicateSeries(series.name));
        }
        self.index.insert(series.name.clone(), self.series.len());
        self.series.push(series);
        Ok(())
    }

    pub fn push_observation(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn set_refcase(&mut self, refcase: SeriesData) -> Result<()> {
        refcase.validate()?;
        self.refcase = Some(refcase);
        Ok(())
    }

    pub fn series(&self) -> &[SeriesData] {
        &self.series
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn find_series(&self, name: &str) -> Option<&SeriesData> {
        if self.index.len() != self.series.len() {
            // Deserialized instances arrive without the index; fall back to a scan.
            return self.series.iter().find(|s| s.name == name);
        }
        self.index.get(name).map(|&i| &self.series[i])
    }

    /// Smallest enclosing `[min, max]` per axis over all series, the
    /// refcase, and the observation intervals. `None` when there is nothing
    /// drawable at all.
    pub fn extent(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut x: Option<[f64; 2]> = None;
        let mut y: Option<[f64; 2]> = None;
        let grow = |axis: &mut Option<[f64; 2]>, v: f64| {
            if !v.is_finite() {
                return;
            }
            *axis = Some(match *axis {
                Some([lo, hi]) => [lo.min(v), hi.max(v)],
                None => [v, v],
            });
        };

        for series in self.series.iter().chain(self.refcase.iter()) {
            for [px, py] in series.points() {
                grow(&mut x, px);
                grow(&mut y, py);
            }
        }
        for obs in &self.observations {
            let (lo, hi) = obs.bounds();
            grow(&mut x, obs.x);
            grow(&mut y, lo);
            grow(&mut y, hi);
        }
        Some((x?, y?))
    }

    /// Parse an ensemble from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut data: Self = serde_json::from_str(json)?;
        data.rebuild_index();
        Ok(data)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
    }
}

impl EnsembleSource for EnsembleData {
    fn series_names(&self) -> Vec<String> {
        self.series.iter().map(|s| s.name.clone()).collect()
    }

    fn samples(&self, name: &str) -> Option<(&[f64], &[f64])> {
        self.find_series(name)
            .map(|s| (s.xs.as_slice(), s.ys.as_slice()))
    }

    fn has_series_data(&self) -> bool {
        self.series.iter().any(|s| !s.is_empty())
    }

    fn observations(&self) -> &[Observation] {
        &self.observations
    }

    fn refcase(&self) -> Option<&SeriesData> {
        self.refcase.as_ref()
    }
}
