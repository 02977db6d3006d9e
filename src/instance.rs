//! TSP instance files.
//!
//! Instances are JSON objects with `n` (number of customers, so `n + 1`
//! nodes including the depot at index 0) and either a `dist` matrix of
//! size `(n+1) × (n+1)` or `xCord`/`yCord` coordinate lists of length
//! `n + 1`. Without `dist`, costs are rounded Euclidean distances.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::distance::CostMatrix;
use crate::error::InstanceError;

/// A TSP instance as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspInstance {
    /// Number of customers.
    pub n: usize,
    /// Cost matrix rows, depot first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<Vec<Vec<f64>>>,
    #[serde(rename = "xCord", alias = "xCoord", default, skip_serializing_if = "Option::is_none")]
    pub x_cord: Option<Vec<f64>>,
    #[serde(rename = "yCord", alias = "yCoord", default, skip_serializing_if = "Option::is_none")]
    pub y_cord: Option<Vec<f64>>,
}

impl TspInstance {
    /// Parses an instance from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, InstanceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses an instance from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InstanceError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads an instance file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serializes the instance as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, InstanceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of nodes, depot included, or `None` if `n + 1` overflows.
    pub fn num_nodes(&self) -> Option<usize> {
        self.n.checked_add(1)
    }

    /// Coordinates of every node, if both lists are present.
    pub fn coordinates(&self) -> Option<Vec<(f64, f64)>> {
        let xs = self.x_cord.as_ref()?;
        let ys = self.y_cord.as_ref()?;
        Some(xs.iter().copied().zip(ys.iter().copied()).collect())
    }

    /// Builds and validates the cost matrix.
    ///
    /// Uses `dist` when present, otherwise rounded Euclidean distances
    /// between the coordinates.
    ///
    /// # Errors
    ///
    /// [`InstanceError::Invalid`] on a shape mismatch with `n`, or when
    /// neither a matrix nor coordinates are given; the matrix's own
    /// validation errors otherwise.
    pub fn to_cost_matrix(&self) -> Result<CostMatrix, InstanceError> {
        let nodes = self
            .num_nodes()
            .ok_or_else(|| InstanceError::invalid(format!("node count n = {} is too large", self.n)))?;
        let matrix = match &self.dist {
            Some(rows) => {
                if rows.len() != nodes {
                    return Err(InstanceError::invalid(format!(
                        "dist has {} rows, expected {nodes}",
                        rows.len()
                    )));
                }
                CostMatrix::from_rows(rows.clone())?
            }
            None => {
                let points = self.coordinates().ok_or_else(|| {
                    InstanceError::invalid("instance needs either dist or xCord/yCord")
                })?;
                let (xs, ys) = (self.x_cord.as_deref(), self.y_cord.as_deref());
                if xs.map(<[f64]>::len) != Some(nodes) || ys.map(<[f64]>::len) != Some(nodes) {
                    return Err(InstanceError::invalid(format!(
                        "coordinate lists must both have {nodes} entries"
                    )));
                }
                let mut matrix = CostMatrix::from_points(&points);
                for i in 0..nodes {
                    for j in 0..nodes {
                        matrix.set(i, j, matrix.get(i, j).round());
                    }
                }
                matrix
            }
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Reproducible random Euclidean instance with `n` customers.
    ///
    /// Coordinates are uniform in `[0, 100)`; `dist` is filled with the
    /// exact (unrounded) distances.
    pub fn random_euclidean(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (xs, ys): (Vec<f64>, Vec<f64>) = (0..=n)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .unzip();
        let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        let matrix = CostMatrix::from_points(&points);
        let dist = (0..=n)
            .map(|i| (0..=n).map(|j| matrix.get(i, j)).collect())
            .collect();

        Self {
            n,
            dist: Some(dist),
            x_cord: Some(xs),
            y_cord: Some(ys),
        }
    }
}
