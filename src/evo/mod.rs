//! Agent-driven multi-objective evolution.
//!
//! The engine keeps a population keyed by evaluation vectors, applies
//! randomly chosen agents to randomly sampled members, and prunes dominated
//! members on a fixed cadence until an iteration or wall-clock budget runs
//! out. What remains is the Pareto frontier.
//!
//! # Core Traits
//!
//! - [`Objective`]: Scores a solution (lower is better)
//! - [`Agent`]: Builds one new solution from `k` sampled ones
//!
//! # Key Types
//!
//! - [`FitnessRegistry`] / [`AgentRegistry`]: Named objectives and agents,
//!   fixed once handed to the engine
//! - [`Population`]: Evaluation vector → solution store
//! - [`EvoConfig`]: Iteration budget, pruning and status cadence, time limit
//! - [`Evo`]: The engine; [`Evo::evolve`] runs the loop
//! - [`EvoResult`]: Final frontier and run statistics

mod config;
mod population;
mod registry;
mod runner;
mod types;

pub use config::EvoConfig;
pub use population::{DuplicatePolicy, Evaluation, Member, Population};
pub use registry::{AgentEntry, AgentRegistry, FitnessRegistry};
pub use runner::{Evo, EvoResult, StatusReport};
pub use types::{Agent, BoxError, Objective};
