//! Lazy enumerations over a [`Tour`].

use super::{Tour, END};

/// Visits in order, starting at `first`.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    tour: &'a Tour,
    current: Option<usize>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(tour: &'a Tour) -> Self {
        Self {
            tour,
            current: Some(tour.first),
            remaining: tour.count,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let visit = self.current?;
        self.remaining -= 1;
        let n = self.tour.next[visit];
        self.current = if n == END || n == self.tour.first {
            None
        } else {
            Some(n)
        };
        Some(visit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Consecutive edges `(from, to)`.
///
/// A closed tour yields `len()` edges including `(tail, first)`; any other
/// tour yields `len() - 1`.
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    inner: Iter<'a>,
}

impl<'a> Pairs<'a> {
    pub(super) fn new(tour: &'a Tour) -> Self {
        Self { inner: tour.iter() }
    }
}

impl Iterator for Pairs<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        loop {
            let from = self.inner.next()?;
            let to = self.inner.tour.next[from];
            if to != END {
                return Some((from, to));
            }
        }
    }
}

/// Windows of `k` consecutive visits.
///
/// Closed tours wrap around and yield one window per visit; other tours
/// yield `len() - k + 1` windows. Nothing is yielded when `k` is zero or
/// exceeds `len()`.
#[derive(Debug, Clone)]
pub struct Sequences {
    visits: Vec<usize>,
    k: usize,
    start: usize,
    windows: usize,
}

impl Sequences {
    pub(super) fn new(tour: &Tour, k: usize) -> Self {
        let visits = tour.to_vec();
        let n = visits.len();
        let windows = if k == 0 || k > n {
            0
        } else if tour.is_closed() {
            n
        } else {
            n - k + 1
        };
        Self {
            visits,
            k,
            start: 0,
            windows,
        }
    }

    /// Restarts the enumeration from the first window.
    pub fn reset(&mut self) {
        self.start = 0;
    }
}

impl Iterator for Sequences {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.start >= self.windows {
            return None;
        }
        let n = self.visits.len();
        let window = (0..self.k)
            .map(|offset| self.visits[(self.start + offset) % n])
            .collect();
        self.start += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.windows - self.start;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Sequences {}

/// Windows of four consecutive visits `[a, b, c, d]`: the edge `b → c`
/// together with the turns at both of its ends.
#[derive(Debug, Clone)]
pub struct Quadruplets {
    inner: Sequences,
}

impl Quadruplets {
    pub(super) fn new(tour: &Tour) -> Self {
        Self {
            inner: Sequences::new(tour, 4),
        }
    }
}

impl Iterator for Quadruplets {
    type Item = [usize; 4];

    fn next(&mut self) -> Option<[usize; 4]> {
        self.inner.next().map(|s| [s[0], s[1], s[2], s[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_closed_and_open() {
        let closed = Tour::from_visits(&[0, 2, 1, 3], Some(0));
        assert_eq!(closed.iter().collect::<Vec<_>>(), vec![0, 2, 1, 3]);
        let open = Tour::from_visits(&[1, 0, 2], None);
        assert_eq!(open.iter().collect::<Vec<_>>(), vec![1, 0, 2]);
    }

    #[test]
    fn test_iter_stops_on_broken_map() {
        let mut tour = Tour::from_visits(&[0, 1, 2, 3], Some(0));
        tour.replace_edge_from(3, 1);
        assert_eq!(tour.iter().count(), 4);
    }

    #[test]
    fn test_pairs() {
        let closed = Tour::from_visits(&[0, 1, 2], Some(0));
        assert_eq!(
            closed.pairs().collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (2, 0)]
        );
        let open = Tour::from_visits(&[0, 1, 2], None);
        assert_eq!(open.pairs().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_sequences() {
        let open = Tour::from_visits(&[0, 1, 2, 3], None);
        let seqs: Vec<_> = open.sequences(3).collect();
        assert_eq!(seqs, vec![vec![0, 1, 2], vec![1, 2, 3]]);

        let closed = Tour::from_visits(&[0, 1, 2, 3], Some(0));
        let seqs: Vec<_> = closed.sequences(3).collect();
        assert_eq!(seqs.len(), 4);
        assert_eq!(seqs[3], vec![3, 0, 1]);

        assert_eq!(closed.sequences(5).count(), 0);
        assert_eq!(closed.sequences(0).count(), 0);
    }

    #[test]
    fn test_sequences_reset() {
        let tour = Tour::from_visits(&[0, 1, 2], None);
        let mut seqs = tour.sequences(2);
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs.by_ref().count(), 2);
        seqs.reset();
        assert_eq!(seqs.next(), Some(vec![0, 1]));
    }

    #[test]
    fn test_quadruplets() {
        let closed = Tour::from_visits(&[0, 1, 2, 3, 4], Some(0));
        let quads: Vec<_> = closed.quadruplets().collect();
        assert_eq!(quads.len(), 5);
        assert_eq!(quads[0], [0, 1, 2, 3]);
        assert_eq!(quads[4], [4, 0, 1, 2]);

        let open = Tour::from_visits(&[0, 1, 2, 3, 4], None);
        assert_eq!(open.quadruplets().count(), 2);
    }
}
