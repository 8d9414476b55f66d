//! Domain-agnostic multi-objective stochastic search.
//!
//! Maintains a population of candidate solutions, scores each one against a
//! set of named objectives, and repeatedly applies randomly chosen operators
//! ("agents") to explore the search space. Dominated candidates are pruned
//! periodically; the run returns the Pareto frontier it found once its
//! iteration or wall-clock budget is spent.
//!
//! - [`pareto`]: Pareto dominance over plain score vectors (minimization).
//! - [`evo`]: Objective and agent registries, the population store, and the
//!   time-bounded evolution loop.
//!
//! # Example
//!
//! ```
//! use rand::Rng;
//! use u_pareto::evo::{AgentRegistry, Evo, EvoConfig, FitnessRegistry};
//!
//! // Two conflicting objectives over a single number.
//! let mut objectives = FitnessRegistry::new();
//! objectives.register("distance_to_0", |x: &f64| x.abs()).unwrap();
//! objectives.register("distance_to_10", |x: &f64| (x - 10.0).abs()).unwrap();
//!
//! let mut agents = AgentRegistry::new();
//! agents
//!     .register("nudge", 1, |mut parents: Vec<f64>, rng| {
//!         Ok(parents.remove(0) + rng.random_range(-1.0..1.0))
//!     })
//!     .unwrap();
//!
//! let mut evo = Evo::new(objectives, agents).unwrap();
//! evo.add_solution(-5.0).unwrap();
//!
//! let config = EvoConfig::default()
//!     .with_max_iterations(500)
//!     .with_prune_interval(10)
//!     .with_seed(7);
//! let result = evo.evolve(&config).unwrap();
//!
//! assert!(!result.frontier.is_empty());
//! ```
//!
//! # Architecture
//!
//! The core never inspects a solution. It only hands solutions to
//! user-supplied objectives and agents, clones them when they are sampled
//! as agent inputs, and keys the population by their evaluation vectors.

pub mod error;
pub mod evo;
pub mod pareto;

pub use error::EvoError;
