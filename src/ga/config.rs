//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// Configuration for the tour Genetic Algorithm.
///
/// Ratios (`elitism`, `crossover`, `mutation`, `tournament_size`,
/// `tournament_probability`) are fractions in `[0, 1]`; the builders clamp
/// them.
///
/// # Defaults
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_elitism(0.1)
///     .with_mutation(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of candidates in the population.
    ///
    /// Typical range: 30–300.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Consecutive generations without a strictly better best candidate
    /// before stopping. `0` disables stagnation-based termination.
    pub stagnation_count: usize,

    /// Fraction of the population carried over unmodified (the best ones).
    pub elitism: f64,

    /// Fraction of the population selected into the crossover pool.
    pub crossover: f64,

    /// Probability of mutating each non-elite candidate.
    pub mutation: f64,

    /// Tournament sample size as a fraction of the population.
    pub tournament_size: f64,

    /// Probability of accepting each walked tournament member.
    pub tournament_probability: f64,

    /// Whether to produce offspring in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            stagnation_count: 50,
            elitism: 0.1,
            crossover: 0.5,
            mutation: 0.1,
            tournament_size: 0.1,
            tournament_probability: 0.9,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation count (0 to disable).
    pub fn with_stagnation_count(mut self, n: usize) -> Self {
        self.stagnation_count = n;
        self
    }

    /// Sets the elite fraction.
    pub fn with_elitism(mut self, ratio: f64) -> Self {
        self.elitism = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover pool fraction.
    pub fn with_crossover(mut self, ratio: f64) -> Self {
        self.crossover = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-candidate mutation probability.
    pub fn with_mutation(mut self, rate: f64) -> Self {
        self.mutation = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament sample fraction.
    pub fn with_tournament_size(mut self, ratio: f64) -> Self {
        self.tournament_size = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament acceptance probability.
    pub fn with_tournament_probability(mut self, p: f64) -> Self {
        self.tournament_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel offspring production.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elite slots.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elitism) as usize
    }

    /// Size of the crossover pool (at least 2).
    pub fn pool_size(&self) -> usize {
        ((self.population_size as f64 * self.crossover).ceil() as usize)
            .max(2)
            .min(self.population_size)
    }

    /// Preset for fast optimization: small population, few generations.
    ///
    /// - Population: 30, Generations: 100, Stagnation: 20
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            max_generations: 100,
            stagnation_count: 20,
            ..Self::default()
        }
    }

    /// Preset for balanced optimization.
    ///
    /// - Population: 100, Generations: 300, Stagnation: 50
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 300,
            stagnation_count: 50,
            ..Self::default()
        }
    }

    /// Preset for quality optimization: large population, many generations.
    ///
    /// - Population: 200, Generations: 1000, Stagnation: 100
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 1000,
            stagnation_count: 100,
            ..Self::default()
        }
    }

    /// Selects a preset from the number of visits.
    ///
    /// - `visits < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ visits < 200` → [`balanced()`](Self::balanced)
    /// - `visits ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(visits: usize) -> Self {
        if visits < 50 {
            Self::fast()
        } else if visits < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.elite_count() >= self.population_size {
            return Err("elitism too high: elites fill entire population".into());
        }
        for (name, value) in [
            ("elitism", self.elitism),
            ("crossover", self.crossover),
            ("mutation", self.mutation),
            ("tournament_size", self.tournament_size),
            ("tournament_probability", self.tournament_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be within [0, 1]"));
            }
        }
        if self.tournament_probability == 0.0 {
            return Err("tournament_probability must be positive".into());
        }
        Ok(())
    }
}
