//! Dense cost matrix.

/// A dense n×n cost matrix stored in row-major order.
///
/// `get(from, to)` is the cost of leaving `from` towards `to`; the matrix
/// does not need to be symmetric. [`f64::INFINITY`] marks an unreachable
/// pair.
///
/// # Examples
///
/// ```
/// use u_tour::problem::CostMatrix;
///
/// let m = CostMatrix::from_rows(&[
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 3.0],
///     vec![8.0, 3.0, 0.0],
/// ]).unwrap();
/// assert_eq!(m.size(), 3);
/// assert_eq!(m.get(1, 2), 3.0);
/// assert!(m.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix where every off-diagonal entry equals `cost`.
    pub fn uniform(size: usize, cost: f64) -> Self {
        let mut m = Self::new(size);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    m.set(i, j, cost);
                }
            }
        }
        m
    }

    /// Creates a matrix from row-major data.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from explicit rows.
    ///
    /// Returns `None` if any row length differs from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major view of the raw data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a.is_infinite() && b.is_infinite() {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the cheapest target from `from` among `candidates`.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }

    /// First entry that is negative or NaN, as `(from, to, value)`.
    pub(crate) fn first_invalid(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|c| c.is_nan() || *c < 0.0)
            .map(|idx| (idx / self.size, idx % self.size, self.data[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let m = CostMatrix::from_data(2, vec![0.0, 5.0, 7.0, 0.0]).expect("valid");
        assert_eq!(m.get(0, 1), 5.0);
        assert_eq!(m.get(1, 0), 7.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(CostMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(CostMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).is_none());
    }

    #[test]
    fn test_uniform() {
        let m = CostMatrix::uniform(3, 2.0);
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(2, 1), 2.0);
        assert!(m.is_symmetric(1e-10));
    }

    #[test]
    fn test_asymmetric() {
        let mut m = CostMatrix::new(2);
        m.set(0, 1, 10.0);
        m.set(1, 0, 15.0);
        assert!(!m.is_symmetric(1e-10));
    }

    #[test]
    fn test_infinite_pairs_are_symmetric() {
        let mut m = CostMatrix::new(2);
        m.set(0, 1, f64::INFINITY);
        m.set(1, 0, f64::INFINITY);
        assert!(m.is_symmetric(1e-10));
    }

    #[test]
    fn test_nearest() {
        let m = CostMatrix::from_rows(&[
            vec![0.0, 5.0, 8.0],
            vec![5.0, 0.0, 3.0],
            vec![8.0, 3.0, 0.0],
        ])
        .expect("valid");
        assert_eq!(m.nearest(0, &[1, 2]), Some(1));
        assert_eq!(m.nearest(0, &[2]), Some(2));
        assert_eq!(m.nearest(0, &[]), None);
    }

    #[test]
    fn test_first_invalid() {
        let mut m = CostMatrix::uniform(3, 1.0);
        assert!(m.first_invalid().is_none());
        m.set(2, 1, -1.0);
        assert_eq!(m.first_invalid(), Some((2, 1, -1.0)));
    }
}
