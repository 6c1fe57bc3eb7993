//! GA evolutionary loop execution.
//!
//! [`GaSolver`] orchestrates the complete evolutionary process:
//! population generation → tournament pool → EAX offspring → mutation →
//! repeat, with elitism and stagnation-based termination.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::brute_force::BruteForceSolver;
use super::config::GaConfig;
use super::selection::TournamentSelector;
use super::types::{Candidate, Crossover, Generator, Mutation};
use crate::objective::{Fitness, Objective};
use crate::problem::TourProblem;
use crate::random::create_rng;

/// Problems with fewer visits are solved exhaustively.
pub const BRUTE_FORCE_LIMIT: usize = 5;

/// Consecutive empty tournaments before the pool falls back to the best
/// unselected candidate.
const MAX_SELECTION_RETRIES: usize = 100;

/// Solver lifecycle.
///
/// `Init → GeneratingPopulation → Evolving → {StagnationTerminated |
/// MaxGenerationTerminated | Cancelled} → Done`. Tiny problems go straight
/// from `Init` to `Exhaustive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverState {
    /// Nothing has run yet.
    Init,
    /// Building the initial population.
    GeneratingPopulation,
    /// Running generations.
    Evolving,
    /// Stopped after `stagnation_count` generations without improvement.
    StagnationTerminated,
    /// Stopped at `max_generations`.
    MaxGenerationTerminated,
    /// Stopped by the cancellation flag.
    Cancelled,
    /// Solved by brute force.
    Exhaustive,
    /// Result returned.
    Done,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<F> {
    /// The best candidate found during the entire run.
    pub best: Candidate<F>,

    /// Total number of generations executed.
    pub generations: usize,

    /// The terminal state that ended the run.
    pub termination: SolverState,

    /// Best fitness after population generation and after each generation.
    ///
    /// Never gets worse from one entry to the next under
    /// [`Fitness::compare`].
    pub fitness_history: Vec<F>,
}

impl<F: Fitness> GaResult<F> {
    /// Best fitness (same as `best.fitness`).
    pub fn best_fitness(&self) -> F {
        self.best.fitness
    }
}

/// Executes the tour GA with a fixed set of operators.
///
/// # Usage
///
/// ```
/// use u_tour::eax::EaxOperator;
/// use u_tour::ga::{GaConfig, GaSolver, GreedyGenerator, ShiftMutation};
/// use u_tour::objective::WeightObjective;
/// use u_tour::problem::{CostMatrix, TourProblem};
///
/// let mut costs = CostMatrix::uniform(8, 10.0);
/// for i in 0..8 {
///     costs.set(i, (i + 1) % 8, 1.0);
/// }
/// let problem = TourProblem::closed(costs, 0).unwrap();
/// let config = GaConfig::fast().with_seed(42);
/// let solver = GaSolver::new(config, GreedyGenerator::new(), EaxOperator::default(), ShiftMutation::default());
///
/// let result = solver.run(&problem, &WeightObjective::default());
/// assert!(result.best.tour.is_permutation_of(8));
/// ```
#[derive(Debug)]
pub struct GaSolver<G, C, M> {
    config: GaConfig,
    selector: TournamentSelector,
    generator: G,
    crossover: C,
    mutation: M,
}

impl<G, C, M> GaSolver<G, C, M> {
    /// Creates a solver.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (call [`GaConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(config: GaConfig, generator: G, crossover: C, mutation: M) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid GaConfig: {e}");
        }
        let selector = TournamentSelector::new(config.tournament_size, config.tournament_probability);
        Self {
            config,
            selector,
            generator,
            crossover,
            mutation,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA to termination.
    pub fn run<O>(&self, problem: &TourProblem, objective: &O) -> GaResult<O::Fitness>
    where
        O: Objective,
        G: Generator<O>,
        C: Crossover<O>,
        M: Mutation<O>,
    {
        self.run_with_cancel(problem, objective, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best candidate found so
    /// far. A generation that has started always completes.
    pub fn run_with_cancel<O>(
        &self,
        problem: &TourProblem,
        objective: &O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult<O::Fitness>
    where
        O: Objective,
        G: Generator<O>,
        C: Crossover<O>,
        M: Mutation<O>,
    {
        let config = &self.config;
        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));
        let mut state = SolverState::Init;
        info!(
            "GA start: {} visits, population {}, objective {}",
            problem.size(),
            config.population_size,
            objective.name()
        );

        if problem.size() < BRUTE_FORCE_LIMIT {
            transition(&mut state, SolverState::Exhaustive);
            let best = BruteForceSolver::solve(problem, objective);
            info!("GA done: exhaustive search, best {:.3}", best.fitness.to_f64());
            return GaResult {
                fitness_history: vec![best.fitness],
                best,
                generations: 0,
                termination: state,
            };
        }

        // 1. Initial population
        transition(&mut state, SolverState::GeneratingPopulation);
        let mut population: Vec<Candidate<O::Fitness>> = (0..config.population_size)
            .map(|_| self.generator.generate(problem, objective, &mut rng))
            .collect();
        sort_population(&mut population);

        // 2. Track best
        let mut best = population[0].clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness);

        // 3. Evolutionary loop
        transition(&mut state, SolverState::Evolving);
        let mut generation = 0;
        let mut stagnation = 0;
        let termination = loop {
            if generation >= config.max_generations {
                break SolverState::MaxGenerationTerminated;
            }
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break SolverState::Cancelled;
            }
            generation += 1;

            self.evolve(problem, objective, &mut population, &mut rng);

            if population[0].is_better_than(&best) {
                best = population[0].clone();
                stagnation = 0;
            } else {
                stagnation += 1;
            }
            fitness_history.push(best.fitness);
            debug!(
                "generation {generation}: best {:.3}, stagnation {stagnation}",
                best.fitness.to_f64()
            );

            if config.stagnation_count > 0 && stagnation >= config.stagnation_count {
                break SolverState::StagnationTerminated;
            }
        };
        transition(&mut state, termination);

        info!(
            "GA done: {:?} after {generation} generations, best {:.3}",
            termination,
            best.fitness.to_f64()
        );
        transition(&mut state, SolverState::Done);
        GaResult {
            best,
            generations: generation,
            termination,
            fitness_history,
        }
    }

    /// One generation: pool, offspring, sort, mutation, sort.
    fn evolve<O>(
        &self,
        problem: &TourProblem,
        objective: &O,
        population: &mut Vec<Candidate<O::Fitness>>,
        rng: &mut StdRng,
    ) where
        O: Objective,
        C: Crossover<O>,
        M: Mutation<O>,
    {
        let size = population.len();
        let elites = self.config.elite_count();

        // (a) crossover pool
        let pool = self.select_pool(population, rng);

        // (b) one child per non-elite slot, from the previous population
        let parents: Vec<(usize, usize)> = (elites..size)
            .map(|_| {
                let i = rng.random_range(0..pool.len());
                let mut j = rng.random_range(0..pool.len() - 1);
                if j >= i {
                    j += 1;
                }
                (pool[i], pool[j])
            })
            .collect();
        let seeds: Vec<u64> = parents.iter().map(|_| rng.random()).collect();
        let crossover = &self.crossover;
        let current: &[Candidate<O::Fitness>] = population;
        let children = produce(self.config.parallel, &seeds, |slot, slot_rng| {
            let (a, b) = parents[slot];
            crossover.crossover(problem, objective, &current[a], &current[b], slot_rng)
        });
        population.truncate(elites);
        population.extend(children);

        // (c) sort
        sort_population(population);

        // (d) mutation
        let plan: Vec<Option<u64>> = (elites..size)
            .map(|_| {
                rng.random_bool(self.config.mutation)
                    .then(|| rng.random())
            })
            .collect();
        let mutation = &self.mutation;
        mutate_slots(
            self.config.parallel,
            &mut population[elites..],
            &plan,
            |candidate, slot_rng| mutation.mutate(problem, objective, candidate, slot_rng),
        );

        // (e) sort
        sort_population(population);
    }

    /// Distinct population indices chosen by repeated tournaments.
    fn select_pool<F: Fitness>(&self, population: &[Candidate<F>], rng: &mut StdRng) -> Vec<usize> {
        let wanted = self.config.pool_size();
        let mut excluded = HashSet::with_capacity(wanted);
        let mut pool = Vec::with_capacity(wanted);
        let mut retries = 0;
        while pool.len() < wanted {
            let picked = match self.selector.select(population, &excluded, rng) {
                Some(index) => index,
                None if retries < MAX_SELECTION_RETRIES => {
                    retries += 1;
                    continue;
                }
                // population is sorted: the first unselected index is the best
                None => (0..population.len())
                    .find(|i| !excluded.contains(i))
                    .unwrap_or_else(|| unreachable!("pool never exceeds the population")),
            };
            retries = 0;
            excluded.insert(picked);
            pool.push(picked);
        }
        pool
    }
}

fn transition(state: &mut SolverState, next: SolverState) {
    debug!("GA state {:?} -> {:?}", state, next);
    *state = next;
}

fn sort_population<F: Fitness>(population: &mut [Candidate<F>]) {
    population.sort_by(|a, b| a.fitness.compare(&b.fitness));
}

/// Runs `f` once per seed, each call with its own generator.
///
/// Results come back in seed order whether or not they were produced in
/// parallel, so both paths give identical populations.
#[cfg(feature = "parallel")]
fn produce<T, F>(parallel: bool, seeds: &[u64], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &mut StdRng) -> T + Sync,
{
    if !parallel {
        return produce_sequential(seeds, f);
    }
    seeds
        .par_iter()
        .enumerate()
        .map(|(slot, &seed)| f(slot, &mut create_rng(seed)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn produce<T, F>(_parallel: bool, seeds: &[u64], f: F) -> Vec<T>
where
    F: Fn(usize, &mut StdRng) -> T,
{
    produce_sequential(seeds, f)
}

fn produce_sequential<T, F>(seeds: &[u64], f: F) -> Vec<T>
where
    F: Fn(usize, &mut StdRng) -> T,
{
    seeds
        .iter()
        .enumerate()
        .map(|(slot, &seed)| f(slot, &mut create_rng(seed)))
        .collect()
}

/// Applies `f` to every slot with a planned seed.
#[cfg(feature = "parallel")]
fn mutate_slots<T, F>(parallel: bool, slots: &mut [T], plan: &[Option<u64>], f: F)
where
    T: Send,
    F: Fn(&mut T, &mut StdRng) + Sync,
{
    if !parallel {
        return mutate_sequential(slots, plan, f);
    }
    slots
        .par_iter_mut()
        .zip(plan.par_iter())
        .for_each(|(slot, seed)| {
            if let Some(seed) = seed {
                f(slot, &mut create_rng(*seed));
            }
        });
}

#[cfg(not(feature = "parallel"))]
fn mutate_slots<T, F>(_parallel: bool, slots: &mut [T], plan: &[Option<u64>], f: F)
where
    F: Fn(&mut T, &mut StdRng),
{
    mutate_sequential(slots, plan, f);
}

fn mutate_sequential<T, F>(slots: &mut [T], plan: &[Option<u64>], f: F)
where
    F: Fn(&mut T, &mut StdRng),
{
    for (slot, seed) in slots.iter_mut().zip(plan) {
        if let Some(seed) = seed {
            f(slot, &mut create_rng(*seed));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
