//! Arrival time windows.

/// Allowed arrival interval `[min, max]` at a visit.
///
/// Arriving before `min` forces a wait until `min`; arriving after `max`
/// is a violation whose size is the lateness `arrival - max`.
///
/// # Examples
///
/// ```
/// use u_tour::problem::TimeWindow;
///
/// let tw = TimeWindow::new(10.0, 20.0).unwrap();
/// assert!(tw.contains(15.0));
/// assert_eq!(tw.waiting_time(4.0), 6.0);
/// assert_eq!(tw.violation(23.0), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    min: f64,
    max: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `min > max` or either bound is NaN. `max` may be
    /// `f64::INFINITY`.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return None;
        }
        Some(Self { min, max })
    }

    /// A window that never forces waiting and is never violated.
    pub fn unlimited() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// Earliest arrival without waiting.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Latest arrival without violation.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns `true` if this window constrains nothing.
    pub fn is_unlimited(&self) -> bool {
        self.min <= 0.0 && self.max == f64::INFINITY
    }

    /// Returns `true` if `time` falls within the window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.min && time <= self.max
    }

    /// Waiting time when arriving at `arrival`.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.min {
            self.min - arrival
        } else {
            0.0
        }
    }

    /// Lateness when arriving at `arrival`, zero if on time.
    pub fn violation(&self, arrival: f64) -> f64 {
        if arrival > self.max {
            arrival - self.max
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at `arrival` violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.max
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(0.0, f64::INFINITY).is_some());
    }

    #[test]
    fn test_time_window_contains() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(tw.contains(10.0));
        assert!(tw.contains(20.0));
        assert!(!tw.contains(9.9));
        assert!(!tw.contains(20.1));
    }

    #[test]
    fn test_waiting_and_violation() {
        let tw = TimeWindow::new(1.0, 3.0).expect("valid");
        assert_eq!(tw.waiting_time(0.5), 0.5);
        assert_eq!(tw.waiting_time(2.0), 0.0);
        assert_eq!(tw.violation(3.0), 0.0);
        assert_eq!(tw.violation(6.0), 3.0);
        assert!(tw.is_violated(3.5));
        assert!(!tw.is_violated(3.0));
    }

    #[test]
    fn test_unlimited() {
        let tw = TimeWindow::unlimited();
        assert!(tw.is_unlimited());
        assert_eq!(tw.waiting_time(0.0), 0.0);
        assert_eq!(tw.violation(1e12), 0.0);
        assert!(!TimeWindow::new(1.0, 3.0).expect("valid").is_unlimited());
    }
}
