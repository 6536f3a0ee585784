use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// A named, ordered run of sample pairs on two axes.
///
/// The two axis vectors are stored independently. A well-formed series has
/// `xs.len() == ys.len()`, but mismatched lengths are tolerated: all
/// consumers go through [`SeriesData::sample_count`], which truncates to the
/// shorter axis instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    /// Display name; also the lookup key within an ensemble.
    pub name: String,
    /// Samples along the first axis.
    pub xs: Vec<f64>,
    /// Samples along the second axis.
    pub ys: Vec<f64>,
}

impl SeriesData {
    pub fn new(name: impl Into<String>, xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            xs,
            ys,
        }
    }

    /// Number of drawable samples: the shorter of the two axis vectors.
    pub fn sample_count(&self) -> usize {
        self.xs.len().min(self.ys.len())
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Sample pair at `index`, or `None` past the drawable range.
    pub fn point(&self, index: usize) -> Option<[f64; 2]> {
        if index < self.sample_count() {
            Some([self.xs[index], self.ys[index]])
        } else {
            None
        }
    }

    /// Iterate over the drawable sample pairs in order.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| [x, y])
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(DataError::EmptyName);
        }
        Ok(())
    }
}
