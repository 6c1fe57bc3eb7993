//! EAX configuration.

/// Probability of including each AB-cycle under
/// [`EaxStrategy::MultipleRandom`].
pub const MULTIPLE_RANDOM_PROBABILITY: f64 = 0.75;

/// How AB-cycles are chosen for one offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EaxStrategy {
    /// Exactly one AB-cycle, uniformly at random.
    ///
    /// Children stay close to the first parent (local EAX).
    #[default]
    SingleRandom,

    /// Each AB-cycle independently with probability
    /// [`MULTIPLE_RANDOM_PROBABILITY`]; one uniformly if none was drawn.
    MultipleRandom,
}

/// Configuration for [`EaxOperator`](super::EaxOperator).
///
/// # Examples
///
/// ```
/// use u_tour::eax::{EaxConfig, EaxStrategy};
///
/// let config = EaxConfig::default()
///     .with_strategy(EaxStrategy::MultipleRandom)
///     .with_max_offspring(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaxConfig {
    /// AB-cycle selection strategy.
    pub strategy: EaxStrategy,

    /// Offspring built per crossover; the fittest is returned.
    pub max_offspring: usize,
}

impl Default for EaxConfig {
    fn default() -> Self {
        Self {
            strategy: EaxStrategy::default(),
            max_offspring: 10,
        }
    }
}

impl EaxConfig {
    /// Sets the selection strategy.
    pub fn with_strategy(mut self, strategy: EaxStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of offspring per crossover.
    pub fn with_max_offspring(mut self, n: usize) -> Self {
        self.max_offspring = n;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_offspring == 0 {
            return Err("max_offspring must be at least 1".into());
        }
        Ok(())
    }
}
