//! Dense travel-cost matrix.

use crate::error::CostMatrixError;

/// A dense `(n+1) × (n+1)` travel-cost matrix stored in row-major order.
///
/// Node 0 is the depot. Diagonal entries are never read. An off-diagonal
/// entry of `f64::INFINITY` marks a forbidden arc: no decision variable is
/// created for it.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::CostMatrix;
///
/// let cm = CostMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// assert!((cm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(cm.size(), 3);
/// assert_eq!(cm.num_customers(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean cost matrix from `(x, y)` coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut cm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                cm.set(i, j, d);
                cm.set(j, i, d);
            }
        }
        cm
    }

    /// Creates a cost matrix from an explicit n×n grid in row-major order.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, CostMatrixError> {
        if data.len() != size * size {
            return Err(CostMatrixError::DataLength {
                len: data.len(),
                expected: size * size,
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a cost matrix from nested rows.
    ///
    /// Fails with the first row whose length differs from the row count.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CostMatrixError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(CostMatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Ok(Self { data, size })
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost of travelling from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Marks the arc `from → to` as unusable.
    pub fn forbid(&mut self, from: usize, to: usize) {
        self.set(from, to, f64::INFINITY);
    }

    /// Number of nodes, depot included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of customers `n` (nodes other than the depot).
    pub fn num_customers(&self) -> usize {
        self.size.saturating_sub(1)
    }

    /// Returns `true` if the arc `from → to` may appear in a tour.
    pub fn is_arc_allowed(&self, from: usize, to: usize) -> bool {
        from != to && self.get(from, to).is_finite()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Checks the matrix before any solver call.
    ///
    /// Rejects fewer than three nodes, NaN and negative off-diagonal
    /// entries. `+∞` is accepted as a forbidden arc.
    pub fn validate(&self) -> Result<(), CostMatrixError> {
        if self.size < 3 {
            return Err(CostMatrixError::TooFewNodes { size: self.size });
        }
        for from in 0..self.size {
            for to in 0..self.size {
                if from == to {
                    continue;
                }
                let value = self.get(from, to);
                if value.is_nan() {
                    return Err(CostMatrixError::NotANumber { from, to });
                }
                if value < 0.0 {
                    return Err(CostMatrixError::NegativeCost { from, to, value });
                }
            }
        }
        Ok(())
    }

    /// Total cost of the closed tour `nodes[0] → … → nodes[last] → nodes[0]`.
    pub fn tour_cost(&self, nodes: &[usize]) -> f64 {
        if nodes.len() < 2 {
            return 0.0;
        }
        let inner: f64 = nodes.windows(2).map(|w| self.get(w[0], w[1])).sum();
        inner + self.get(nodes[nodes.len() - 1], nodes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]
    }

    #[test]
    fn test_from_points() {
        let cm = CostMatrix::from_points(&sample_points());
        assert_eq!(cm.size(), 3);
        assert!((cm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((cm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!(cm.get(0, 0).abs() < 1e-10);
        assert!(cm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let cm = CostMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(cm.get(0, 1), 5.0);
        assert_eq!(cm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert_eq!(
            CostMatrix::from_data(2, vec![0.0, 1.0, 2.0]),
            Err(CostMatrixError::DataLength {
                len: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn test_from_rows_not_square() {
        let err = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0],
            vec![2.0, 1.0, 0.0],
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CostMatrixError::NotSquare {
                row: 1,
                len: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn test_validate_too_few_nodes() {
        let cm = CostMatrix::new(2);
        assert_eq!(
            cm.validate(),
            Err(CostMatrixError::TooFewNodes { size: 2 })
        );
    }

    #[test]
    fn test_validate_negative_and_nan() {
        let mut cm = CostMatrix::new(3);
        cm.set(2, 1, -1.0);
        assert_eq!(
            cm.validate(),
            Err(CostMatrixError::NegativeCost {
                from: 2,
                to: 1,
                value: -1.0
            })
        );

        let mut cm = CostMatrix::new(3);
        cm.set(0, 2, f64::NAN);
        assert_eq!(
            cm.validate(),
            Err(CostMatrixError::NotANumber { from: 0, to: 2 })
        );
    }

    #[test]
    fn test_validate_ignores_diagonal() {
        let mut cm = CostMatrix::new(3);
        cm.set(1, 1, f64::NAN);
        cm.set(2, 2, -4.0);
        assert!(cm.validate().is_ok());
    }

    #[test]
    fn test_forbidden_arc() {
        let mut cm = CostMatrix::from_points(&sample_points());
        cm.forbid(1, 2);
        assert!(cm.validate().is_ok());
        assert!(!cm.is_arc_allowed(1, 2));
        assert!(cm.is_arc_allowed(2, 1));
        assert!(!cm.is_arc_allowed(0, 0));
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut cm = CostMatrix::new(2);
        cm.set(0, 1, 10.0);
        cm.set(1, 0, 15.0);
        assert!(!cm.is_symmetric(1e-10));
    }

    #[test]
    fn test_tour_cost() {
        let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!((cm.tour_cost(&[0, 1, 2, 3]) - 6.0).abs() < 1e-10);
        assert_eq!(cm.tour_cost(&[0]), 0.0);
    }
}
