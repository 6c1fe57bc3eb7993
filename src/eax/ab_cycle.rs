//! AB-cycle decomposition, E-set construction and sub-cycle repair.
//!
//! All functions work on closed successor arrays: `next[u]` is the
//! successor of `u` and every array is a permutation of `0..n`.
//!
//! For parents `A` and `B`, walking an A-edge `u → next_A[u]` and then the
//! B-edge entering the same vertex backwards lands on
//! `σ(u) = prev_B[next_A[u]]`. The cycles of `σ` over the vertices whose A
//! and B out-edges differ are exactly the AB-cycles of the directed
//! symmetric difference: each holds the A-edges leaving its vertices and
//! the B-edges leaving its vertices.

use crate::neighbours::NearestNeighbours;
use crate::problem::TourProblem;

/// Inverse permutation: `prev[next[u]] == u`.
pub(crate) fn inverse(next: &[usize]) -> Vec<usize> {
    let mut prev = vec![0; next.len()];
    for (u, &v) in next.iter().enumerate() {
        prev[v] = u;
    }
    prev
}

/// Decomposes the symmetric difference of two tours into AB-cycles.
///
/// Each cycle lists the vertices whose out-edge it swaps, in walk order.
/// Every vertex with differing out-edges appears in exactly one cycle.
pub(crate) fn ab_cycles(next_a: &[usize], next_b: &[usize]) -> Vec<Vec<usize>> {
    let n = next_a.len();
    let prev_b = inverse(next_b);
    let mut seen = vec![false; n];
    let mut cycles = Vec::new();
    for start in 0..n {
        if seen[start] || next_a[start] == next_b[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut u = start;
        while !seen[u] {
            seen[u] = true;
            cycle.push(u);
            u = prev_b[next_a[u]];
        }
        debug_assert_eq!(u, start);
        cycles.push(cycle);
    }
    cycles
}

/// Replaces the A-edges of `cycle` with its B-edges.
pub(crate) fn apply(next: &mut [usize], cycle: &[usize], next_b: &[usize]) {
    for &u in cycle {
        next[u] = next_b[u];
    }
}

/// Cycles of a successor permutation, each starting at its smallest vertex.
pub(crate) fn sub_cycles(next: &[usize]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; next.len()];
    let mut cycles = Vec::new();
    for start in 0..next.len() {
        if seen[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut u = start;
        while !seen[u] {
            seen[u] = true;
            cycle.push(u);
            u = next[u];
        }
        cycles.push(cycle);
    }
    cycles
}

#[derive(Debug, Clone, Copy)]
struct Merge {
    delta: f64,
    a: usize,
    c: usize,
}

/// Merges sub-cycles until a single Hamiltonian cycle remains.
///
/// The smallest sub-cycle is joined to the rest by exchanging one of its
/// edges `a → a'` with an outside edge `c → c'` into `a → c'` and `c → a'`,
/// at the cheapest cost under [`TourProblem::closed_cost`]. With a
/// neighbour index only `c'` among the forward neighbours of `a` are
/// tried, falling back to a full scan when none lies outside the
/// sub-cycle.
pub(crate) fn repair(
    next: &mut [usize],
    problem: &TourProblem,
    neighbours: Option<&NearestNeighbours>,
) {
    loop {
        let cycles = sub_cycles(next);
        let Some(smallest) = cycles.iter().min_by_key(|c| c.len()) else {
            return;
        };
        if cycles.len() == 1 {
            return;
        }

        let mut inside = vec![false; next.len()];
        for &u in smallest {
            inside[u] = true;
        }
        let prev = inverse(next);

        let mut best: Option<Merge> = None;
        if let Some(nn) = neighbours {
            for &a in smallest {
                for &c_next in nn.get(a) {
                    if !inside[c_next] {
                        consider(&mut best, problem, next, a, prev[c_next]);
                    }
                }
            }
        }
        if best.is_none() {
            for &a in smallest {
                for c in (0..next.len()).filter(|&c| !inside[c]) {
                    consider(&mut best, problem, next, a, c);
                }
            }
        }

        match best {
            Some(Merge { a, c, .. }) => {
                let a_next = next[a];
                next[a] = next[c];
                next[c] = a_next;
            }
            None => return,
        }
    }
}

fn consider(best: &mut Option<Merge>, problem: &TourProblem, next: &[usize], a: usize, c: usize) {
    let (a_next, c_next) = (next[a], next[c]);
    let delta = problem.closed_cost(a, c_next) + problem.closed_cost(c, a_next)
        - problem.closed_cost(a, a_next)
        - problem.closed_cost(c, c_next);
    let delta = if delta.is_nan() { f64::INFINITY } else { delta };
    if best.is_none_or(|b| delta < b.delta) {
        *best = Some(Merge { delta, a, c });
    }
}
