//! Tour representation.
//!
//! A [`Tour`] stores the visiting order as a successor map: `next[v]` is the
//! visit following `v`. Replacing an edge is a single write, which is what
//! 2-opt and EAX need; positional access costs O(n).

mod iter;

pub use iter::{Iter, Pairs, Quadruplets, Sequences};

/// Successor of the last visit of a tour that does not return to `first`.
pub const END: usize = usize::MAX;

/// Marker for a visit that is not part of the tour.
const ABSENT: usize = usize::MAX - 1;

/// An ordering of visits starting at a fixed `first`.
///
/// `last` follows the same convention as
/// [`TourProblem::last`](crate::problem::TourProblem::last): `None` for an
/// open tour, `Some(first)` for a closed tour and `Some(x)` for a tour that
/// must end at `x`. `first` and a fixed `last` never move.
///
/// # Examples
///
/// ```
/// use u_tour::tour::Tour;
///
/// let mut tour = Tour::from_visits(&[0, 2, 1, 3], Some(0));
/// assert!(tour.is_closed());
/// assert_eq!(tour.next(3), Some(0));
///
/// tour.shift_after(1, 0);
/// assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);
/// assert!(tour.is_permutation_of(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    next: Vec<usize>,
    first: usize,
    last: Option<usize>,
    count: usize,
}

impl Tour {
    /// Creates a tour over visit ids `0..capacity` containing only `first`
    /// (and a fixed `last` when it differs from `first`).
    ///
    /// # Panics
    ///
    /// Panics if `first` or `last` is not below `capacity`.
    pub fn new(capacity: usize, first: usize, last: Option<usize>) -> Self {
        assert!(first < capacity, "first {first} out of range {capacity}");
        let mut next = vec![ABSENT; capacity];
        let mut count = 1;
        match last {
            None => next[first] = END,
            Some(l) if l == first => next[first] = first,
            Some(l) => {
                assert!(l < capacity, "last {l} out of range {capacity}");
                next[first] = l;
                next[l] = END;
                count = 2;
            }
        }
        Self {
            next,
            first,
            last,
            count,
        }
    }

    /// Creates a tour from an explicit visiting order.
    ///
    /// `visits[0]` becomes `first`; the capacity is the largest id plus one.
    ///
    /// # Panics
    ///
    /// Panics if `visits` is empty, contains a duplicate, or a fixed `last`
    /// other than `first` is not the final element.
    pub fn from_visits(visits: &[usize], last: Option<usize>) -> Self {
        let capacity = visits.iter().max().expect("tour needs at least one visit") + 1;
        Self::from_visits_with_capacity(capacity, visits, last)
    }

    /// Same as [`from_visits`](Self::from_visits) with an explicit capacity.
    pub fn from_visits_with_capacity(capacity: usize, visits: &[usize], last: Option<usize>) -> Self {
        assert!(!visits.is_empty(), "tour needs at least one visit");
        let first = visits[0];
        if let Some(l) = last {
            if l != first {
                assert_eq!(
                    visits.last(),
                    Some(&l),
                    "fixed last {l} must end the visit sequence"
                );
            }
        }
        let mut next = vec![ABSENT; capacity];
        for pair in visits.windows(2) {
            assert!(next[pair[0]] == ABSENT, "duplicate visit {}", pair[0]);
            next[pair[0]] = pair[1];
        }
        let tail = visits[visits.len() - 1];
        assert!(next[tail] == ABSENT, "duplicate visit {tail}");
        next[tail] = if last == Some(first) { first } else { END };
        Self {
            next,
            first,
            last,
            count: visits.len(),
        }
    }

    /// Rebuilds a tour from a raw successor map.
    ///
    /// # Panics
    ///
    /// Panics if the map does not describe a single valid tour.
    pub(crate) fn from_successors(next: Vec<usize>, first: usize, last: Option<usize>) -> Self {
        let count = next.iter().filter(|&&n| n != ABSENT).count();
        let tour = Self {
            next,
            first,
            last,
            count,
        };
        assert!(tour.is_valid(), "successor map does not form a single tour");
        tour
    }

    /// The fixed start.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The fixed end: `None` (open), `Some(first)` (closed) or another visit.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Returns `true` if the tour returns to `first`.
    pub fn is_closed(&self) -> bool {
        self.last == Some(self.first)
    }

    /// Number of visits in the tour.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the tour has no visits (never, `first` is always in).
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of visit ids this tour can hold.
    pub fn capacity(&self) -> usize {
        self.next.len()
    }

    /// Returns `true` if `visit` is in the tour.
    #[inline]
    pub fn contains(&self, visit: usize) -> bool {
        visit < self.next.len() && self.next[visit] != ABSENT
    }

    /// Visit after `visit`, or `None` at the end of a non-closed tour.
    ///
    /// # Panics
    ///
    /// Panics if `visit` is not in the tour.
    #[inline]
    pub fn next(&self, visit: usize) -> Option<usize> {
        assert!(self.contains(visit), "visit {visit} is not in the tour");
        match self.next[visit] {
            END => None,
            n => Some(n),
        }
    }

    /// Raw successor map; absent visits and the open end hold sentinels.
    pub(crate) fn successors(&self) -> &[usize] {
        &self.next
    }

    /// The last visit in order (the predecessor of `first` when closed). O(n).
    pub fn tail(&self) -> usize {
        self.iter().last().unwrap_or(self.first)
    }

    /// Visit at position `index` counting from `first`. O(n).
    pub fn visit_at(&self, index: usize) -> Option<usize> {
        self.iter().nth(index)
    }

    /// Position of `visit` counting from `first`. O(n).
    pub fn position(&self, visit: usize) -> Option<usize> {
        self.iter().position(|v| v == visit)
    }

    /// Inserts `visit` between `after` and its successor. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `after` is not in the tour, `visit` already is, or `after`
    /// is a fixed `last`.
    pub fn insert_after(&mut self, after: usize, visit: usize) {
        assert!(self.contains(after), "visit {after} is not in the tour");
        assert!(visit < self.next.len(), "visit {visit} out of range");
        assert!(!self.contains(visit), "visit {visit} is already in the tour");
        assert!(
            !self.is_fixed_last(after),
            "cannot insert after fixed last {after}"
        );
        self.next[visit] = self.next[after];
        self.next[after] = visit;
        self.count += 1;
    }

    /// Removes `visit`, looking up its predecessor. O(n).
    ///
    /// # Panics
    ///
    /// Panics if `visit` is not in the tour or is a fixed endpoint.
    pub fn remove(&mut self, visit: usize) {
        assert!(self.contains(visit), "visit {visit} is not in the tour");
        let pred = self
            .predecessor(visit)
            .unwrap_or_else(|| panic!("visit {visit} is the fixed first"));
        self.remove_after(pred);
    }

    /// Removes the successor of `pred` and returns it. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `pred` has no removable successor.
    pub fn remove_after(&mut self, pred: usize) -> usize {
        assert!(self.contains(pred), "visit {pred} is not in the tour");
        let visit = self.next[pred];
        assert!(
            visit != END && visit != self.first,
            "visit {pred} has no removable successor"
        );
        assert!(!self.is_fixed_last(visit), "cannot remove fixed last {visit}");
        self.next[pred] = self.next[visit];
        self.next[visit] = ABSENT;
        self.count -= 1;
        visit
    }

    /// Moves `visit` directly after `after`.
    ///
    /// A no-op when `visit == after` or `visit` already follows `after`.
    pub fn shift_after(&mut self, visit: usize, after: usize) {
        if visit == after || self.next(after) == Some(visit) {
            return;
        }
        self.remove(visit);
        self.insert_after(after, visit);
    }

    /// Sets the successor of `from` to `to` ([`END`] marks the open end).
    ///
    /// This is the raw edge rewrite used by 2-opt and EAX. The caller is
    /// responsible for restoring a single valid tour once all rewrites of a
    /// move are done.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not in the tour.
    #[inline]
    pub fn replace_edge_from(&mut self, from: usize, to: usize) {
        assert!(self.contains(from), "visit {from} is not in the tour");
        assert!(to == END || self.contains(to), "visit {to} is not in the tour");
        self.next[from] = to;
    }

    /// Visits in order, starting at `first`.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Consecutive edges `(from, to)`, including the return edge when closed.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs::new(self)
    }

    /// Windows of `k` consecutive visits, wrapping around when closed.
    pub fn sequences(&self, k: usize) -> Sequences {
        Sequences::new(self, k)
    }

    /// Windows of four consecutive visits, wrapping around when closed.
    pub fn quadruplets(&self) -> Quadruplets {
        Quadruplets::new(self)
    }

    /// Visits in order as a vector.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Returns `true` if the successor map forms exactly one tour of
    /// `len()` visits with the expected ending.
    pub fn is_valid(&self) -> bool {
        if !self.contains(self.first) {
            return false;
        }
        let mut seen = vec![false; self.next.len()];
        let mut current = self.first;
        for step in 0..self.count {
            if current >= self.next.len() || seen[current] || self.next[current] == ABSENT {
                return false;
            }
            seen[current] = true;
            let n = self.next[current];
            if step + 1 == self.count {
                return match self.last {
                    Some(l) if l == self.first => n == self.first,
                    Some(l) => n == END && current == l,
                    None => n == END,
                };
            }
            current = n;
        }
        false
    }

    /// Returns `true` if the tour holds exactly the visits `0..n`, once each.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        self.count == n && self.is_valid() && self.iter().all(|v| v < n)
    }

    fn is_fixed_last(&self, visit: usize) -> bool {
        matches!(self.last, Some(l) if l == visit && l != self.first)
    }

    fn predecessor(&self, visit: usize) -> Option<usize> {
        if visit == self.first {
            return None;
        }
        self.pairs().find(|&(_, to)| to == visit).map(|(from, _)| from)
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
