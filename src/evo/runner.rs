//! Evolution loop execution.
//!
//! [`Evo`] owns the registries and the population and runs the loop:
//! pick an agent → sample its inputs → apply it → score and insert the
//! result → prune on schedule → repeat until the budget is spent.

use super::config::EvoConfig;
use super::population::{DuplicatePolicy, Evaluation, Member, Population};
use super::registry::{AgentEntry, AgentRegistry, FitnessRegistry};
use crate::EvoError;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A progress observation emitted every `status_interval` iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReport {
    /// Zero-based iteration index.
    pub iteration: usize,

    /// Population size after the iteration's insertion and pruning.
    pub population_size: usize,
}

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvoResult<S> {
    /// The non-dominated members left after the final prune.
    pub frontier: Population<S>,

    /// Iterations started before the budget, time limit, or cancellation
    /// stopped the loop.
    pub iterations: usize,

    /// Iterations whose agent produced a solution.
    pub invocations: usize,

    /// Iterations that could not invoke an agent (no agents registered).
    pub skipped: usize,

    /// Number of prunes, including the final one.
    pub prunes: usize,

    /// Invocation count per agent, in registration order.
    pub agent_calls: Vec<(String, usize)>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Whether the time limit ended the run.
    pub timed_out: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Status reports in emission order.
    pub status_history: Vec<StatusReport>,
}

/// Multi-objective evolution engine.
///
/// # Usage
///
/// ```ignore
/// let mut evo = Evo::new(objectives, agents)?;
/// evo.add_solution(initial)?;
/// let result = evo.evolve(&EvoConfig::default().with_max_iterations(10_000))?;
/// for member in &result.frontier {
///     println!("{}", member.evaluation);
/// }
/// ```
pub struct Evo<S> {
    fitness: FitnessRegistry<S>,
    agents: AgentRegistry<S>,
    population: Population<S>,
}

impl<S> Evo<S> {
    /// Creates an engine with an empty population.
    ///
    /// The registries are fixed from here on, so every population key
    /// stays consistent with its solution. Fails if no objective is
    /// registered.
    pub fn new(fitness: FitnessRegistry<S>, agents: AgentRegistry<S>) -> Result<Self, EvoError> {
        if fitness.is_empty() {
            return Err(EvoError::NoObjectives);
        }
        Ok(Self {
            fitness,
            agents,
            population: Population::new(),
        })
    }

    /// Switches how equal evaluations are stored. Existing members are
    /// re-inserted under the new policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        let members = std::mem::replace(&mut self.population, Population::with_policy(policy))
            .into_members();
        for member in members {
            self.population.insert(member.evaluation, member.solution);
        }
        self
    }

    /// Scores `solution` and adds it to the population.
    pub fn add_solution(&mut self, solution: S) -> Result<Evaluation, EvoError> {
        self.population.add(solution, &self.fitness)
    }

    pub fn population(&self) -> &Population<S> {
        &self.population
    }

    pub fn fitness(&self) -> &FitnessRegistry<S> {
        &self.fitness
    }

    pub fn agents(&self) -> &AgentRegistry<S> {
        &self.agents
    }

    /// Current frontier, without modifying the population.
    pub fn non_dominated(&self) -> Vec<&Member<S>> {
        self.population.non_dominated()
    }

    /// Removes dominated members. Returns the number removed.
    pub fn prune(&mut self) -> usize {
        self.population.prune()
    }
}

impl<S: Clone> Evo<S> {
    /// Invokes the named agent once on freshly sampled inputs.
    ///
    /// Returns `Ok(None)` if no such agent exists or the population is
    /// empty.
    pub fn run_agent(
        &mut self,
        name: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Evaluation>, EvoError> {
        match self.agents.get(name) {
            Some(agent) => invoke(agent, &mut self.population, &self.fitness, rng),
            None => Ok(None),
        }
    }

    /// Runs the evolution loop.
    pub fn evolve(&mut self, config: &EvoConfig) -> Result<EvoResult<S>, EvoError> {
        self.evolve_with_cancel(config, None)
    }

    /// Runs the evolution loop with an optional cancellation token.
    ///
    /// The time limit and the token are both checked at the top of each
    /// iteration; an agent call in flight is never interrupted. The first
    /// agent or objective fault aborts the run, leaving the population as
    /// it was before the failing call.
    pub fn evolve_with_cancel(
        &mut self,
        config: &EvoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvoResult<S>, EvoError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let start = Instant::now();

        let mut iterations = 0usize;
        let mut invocations = 0usize;
        let mut skipped = 0usize;
        let mut prunes = 0usize;
        let mut timed_out = false;
        let mut cancelled = false;
        let mut agent_calls = vec![0usize; self.agents.len()];
        let mut status_history = Vec::new();

        if self.population.is_empty() {
            warn!("Population is empty; nothing to evolve");
            return Ok(EvoResult {
                frontier: Population::with_policy(self.population.policy()),
                iterations,
                invocations,
                skipped,
                prunes,
                agent_calls: self.agent_calls(agent_calls),
                elapsed: start.elapsed(),
                timed_out,
                cancelled,
                status_history,
            });
        }

        for iteration in 0..config.max_iterations {
            if let Some(limit) = config.time_limit {
                if start.elapsed() > limit {
                    info!("Time limit of {limit:?} reached after {iteration} iterations");
                    timed_out = true;
                    break;
                }
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    info!("Evolution cancelled after {iteration} iterations");
                    cancelled = true;
                    break;
                }
            }
            iterations += 1;

            match self.agents.choose(&mut rng) {
                Some((idx, agent)) => {
                    debug!("Iteration {iteration}: running agent '{}'", agent.name());
                    match invoke(agent, &mut self.population, &self.fitness, &mut rng)? {
                        Some(_) => {
                            invocations += 1;
                            agent_calls[idx] += 1;
                        }
                        None => skipped += 1,
                    }
                }
                None => skipped += 1,
            }

            if iteration % config.prune_interval == 0 {
                self.population.prune();
                prunes += 1;
            } else if let Some(cap) = config.max_population {
                if self.population.len() > cap {
                    debug!("Population size {} exceeds {cap}; pruning early", self.population.len());
                    self.population.prune();
                    prunes += 1;
                }
            }

            if iteration % config.status_interval == 0 {
                let report = StatusReport {
                    iteration,
                    population_size: self.population.len(),
                };
                info!(
                    "Iteration {}: population size {}",
                    report.iteration, report.population_size
                );
                status_history.push(report);
            }
        }

        self.population.prune();
        prunes += 1;
        // Pruning never empties a non-empty population.
        debug_assert!(!self.population.is_empty());

        let elapsed = start.elapsed();
        info!(
            "Evolution completed: {iterations} iterations, {} non-dominated solutions, {elapsed:.3?}",
            self.population.len()
        );

        Ok(EvoResult {
            frontier: self.population.clone(),
            iterations,
            invocations,
            skipped,
            prunes,
            agent_calls: self.agent_calls(agent_calls),
            elapsed,
            timed_out,
            cancelled,
            status_history,
        })
    }

    fn agent_calls(&self, counts: Vec<usize>) -> Vec<(String, usize)> {
        self.agents.names().map(String::from).zip(counts).collect()
    }
}

/// Samples the agent's inputs, applies it, and inserts the scored result.
fn invoke<S: Clone>(
    agent: &AgentEntry<S>,
    population: &mut Population<S>,
    fitness: &FitnessRegistry<S>,
    rng: &mut dyn RngCore,
) -> Result<Option<Evaluation>, EvoError> {
    let parents = population.sample(agent.arity(), rng);
    if parents.is_empty() {
        return Ok(None);
    }
    let child = agent.apply(parents, rng)?;
    population.add(child, fitness).map(Some)
}

// ============================================================================
// Tests
// ============================================================================
