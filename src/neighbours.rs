//! Nearest-neighbour candidate lists.
//!
//! Bounds the O(n²) edge-pair searches of 2-opt and the EAX repair step to
//! O(n·k) by only considering each visit's cheapest partners.

use crate::problem::TourProblem;

/// How candidate costs are measured from a visit `v` to another visit `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighbourDirection {
    /// `cost(v, x)`: cheapest visits to go to.
    Forward,
    /// `cost(x, v)`: cheapest visits to come from.
    Backward,
    /// `cost(v, x) + cost(x, v)`.
    Both,
}

impl NeighbourDirection {
    fn cost(self, problem: &TourProblem, v: usize, x: usize) -> f64 {
        match self {
            NeighbourDirection::Forward => problem.cost(v, x),
            NeighbourDirection::Backward => problem.cost(x, v),
            NeighbourDirection::Both => problem.cost(v, x) + problem.cost(x, v),
        }
    }
}

/// Per-visit list of the cheapest other visits, sorted ascending.
///
/// Built once per problem in O(n² log n) and read-only afterwards.
///
/// # Examples
///
/// ```
/// use u_tour::neighbours::{NearestNeighbours, NeighbourDirection};
/// use u_tour::problem::{CostMatrix, TourProblem};
///
/// let costs = CostMatrix::from_rows(&[
///     vec![0.0, 4.0, 1.0, 9.0],
///     vec![4.0, 0.0, 2.0, 3.0],
///     vec![1.0, 2.0, 0.0, 7.0],
///     vec![9.0, 3.0, 7.0, 0.0],
/// ]).unwrap();
/// let problem = TourProblem::closed(costs, 0).unwrap();
/// let nn = NearestNeighbours::build(&problem, 2, NeighbourDirection::Forward);
/// assert_eq!(nn.get(0), &[2, 1]);
/// assert!(nn.contains(1, 3));
/// ```
#[derive(Debug, Clone)]
pub struct NearestNeighbours {
    lists: Vec<Vec<usize>>,
    direction: NeighbourDirection,
    k: usize,
}

impl NearestNeighbours {
    /// Keeps the `k` cheapest partners of every visit.
    pub fn build(problem: &TourProblem, k: usize, direction: NeighbourDirection) -> Self {
        let lists = (0..problem.size())
            .map(|v| {
                let mut list = sorted_partners(problem, v, direction);
                list.truncate(k);
                list
            })
            .collect();
        Self {
            lists,
            direction,
            k,
        }
    }

    /// Keeps every partner whose cost is at most `threshold`.
    pub fn within(problem: &TourProblem, threshold: f64, direction: NeighbourDirection) -> Self {
        let lists: Vec<Vec<usize>> = (0..problem.size())
            .map(|v| {
                sorted_partners(problem, v, direction)
                    .into_iter()
                    .take_while(|&x| direction.cost(problem, v, x) <= threshold)
                    .collect()
            })
            .collect();
        let k = lists.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            lists,
            direction,
            k,
        }
    }

    /// Candidate partners of `visit`, cheapest first.
    #[inline]
    pub fn get(&self, visit: usize) -> &[usize] {
        &self.lists[visit]
    }

    /// Returns `true` if `other` is a candidate partner of `visit`.
    pub fn contains(&self, visit: usize, other: usize) -> bool {
        self.lists[visit].contains(&other)
    }

    /// Cost direction the lists were built with.
    pub fn direction(&self) -> NeighbourDirection {
        self.direction
    }

    /// Maximum list length.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of visits indexed.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if no visit is indexed.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

fn sorted_partners(problem: &TourProblem, v: usize, direction: NeighbourDirection) -> Vec<usize> {
    let mut partners: Vec<usize> = (0..problem.size()).filter(|&x| x != v).collect();
    partners.sort_by(|&a, &b| {
        direction
            .cost(problem, v, a)
            .total_cmp(&direction.cost(problem, v, b))
            .then(a.cmp(&b))
    });
    partners
}
