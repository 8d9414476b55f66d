//! Named objective and agent registries.
//!
//! Both registries are append-only and reject duplicate names. They are
//! moved into [`Evo`](super::Evo) at construction, after which they can no
//! longer change.

use super::population::Evaluation;
use super::types::{Agent, BoxError, FnAgent, FnObjective, Objective};
use crate::EvoError;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Objectives in registration order.
///
/// The registration order fixes the order of scores in every
/// [`Evaluation`] produced by [`evaluate`](Self::evaluate).
pub struct FitnessRegistry<S> {
    names: Arc<[String]>,
    objectives: Vec<Box<dyn Objective<S>>>,
}

impl<S> Default for FitnessRegistry<S> {
    fn default() -> Self {
        Self {
            names: Arc::from(Vec::new()),
            objectives: Vec::new(),
        }
    }
}

impl<S> FitnessRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an infallible scoring closure under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> Result<(), EvoError>
    where
        F: Fn(&S) -> f64 + 'static,
    {
        self.register_objective(name, FnObjective(f))
    }

    /// Registers an [`Objective`] implementation under `name`.
    pub fn register_objective<O>(
        &mut self,
        name: impl Into<String>,
        objective: O,
    ) -> Result<(), EvoError>
    where
        O: Objective<S> + 'static,
    {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(EvoError::DuplicateObjective(name));
        }
        let mut names = self.names.to_vec();
        names.push(name);
        self.names = names.into();
        self.objectives.push(Box::new(objective));
        Ok(())
    }

    /// Objective names in registration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Scores `solution` against every objective in registration order.
    ///
    /// The first failing objective aborts scoring.
    pub fn evaluate(&self, solution: &S) -> Result<Evaluation, EvoError> {
        let scores = self
            .objectives
            .iter()
            .zip(self.names.iter())
            .map(|(objective, name)| {
                objective
                    .score(solution)
                    .map_err(|source| EvoError::ObjectiveFault {
                        objective: name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<f64>, EvoError>>()?;
        Ok(Evaluation::new(Arc::clone(&self.names), scores))
    }
}

/// A registered agent: its name, arity, and operator.
pub struct AgentEntry<S> {
    name: String,
    arity: usize,
    agent: Box<dyn Agent<S>>,
}

impl<S> AgentEntry<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of solutions the agent consumes per invocation.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn apply(&self, parents: Vec<S>, rng: &mut dyn RngCore) -> Result<S, EvoError> {
        self.agent
            .apply(parents, rng)
            .map_err(|source| EvoError::AgentFault {
                agent: self.name.clone(),
                source,
            })
    }
}

/// Agents in registration order.
pub struct AgentRegistry<S> {
    entries: Vec<AgentEntry<S>>,
}

impl<S> Default for AgentRegistry<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> AgentRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an agent closure consuming `arity` solutions.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        op: F,
    ) -> Result<(), EvoError>
    where
        F: Fn(Vec<S>, &mut dyn RngCore) -> Result<S, BoxError> + 'static,
    {
        self.register_agent(name, arity, FnAgent(op))
    }

    /// Registers an [`Agent`] implementation consuming `arity` solutions.
    ///
    /// Fails on a duplicate name or a zero arity.
    pub fn register_agent<A>(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        agent: A,
    ) -> Result<(), EvoError>
    where
        A: Agent<S> + 'static,
    {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(EvoError::DuplicateAgent(name));
        }
        if arity == 0 {
            return Err(EvoError::ZeroArity(name));
        }
        self.entries.push(AgentEntry {
            name,
            arity,
            agent: Box::new(agent),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&AgentEntry<S>> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Picks an agent uniformly at random, or `None` if none are registered.
    pub(crate) fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, &AgentEntry<S>)> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.entries.len());
        Some((idx, &self.entries[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fmt;

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "broken")
        }
    }

    impl std::error::Error for Broken {}

    struct AlwaysFails;

    impl Objective<i32> for AlwaysFails {
        fn score(&self, _solution: &i32) -> Result<f64, BoxError> {
            Err(Box::new(Broken))
        }
    }

    #[test]
    fn test_evaluate_in_registration_order() {
        let mut fitness = FitnessRegistry::new();
        fitness.register("double", |x: &i32| f64::from(*x * 2)).unwrap();
        fitness.register("negate", |x: &i32| f64::from(-*x)).unwrap();

        let eval = fitness.evaluate(&3).unwrap();
        assert_eq!(fitness.names(), ["double", "negate"]);
        assert_eq!(eval.scores(), &[6.0, -3.0]);
        let pairs: Vec<(&str, f64)> = eval.iter().collect();
        assert_eq!(pairs, vec![("double", 6.0), ("negate", -3.0)]);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let mut fitness = FitnessRegistry::new();
        fitness.register("sq", |x: &i32| f64::from(x * x)).unwrap();
        fitness.register("abs", |x: &i32| f64::from(x.abs())).unwrap();

        assert_eq!(fitness.evaluate(&-4).unwrap(), fitness.evaluate(&-4).unwrap());
    }

    #[test]
    fn test_duplicate_objective_rejected() {
        let mut fitness = FitnessRegistry::new();
        fitness.register("a", |x: &i32| f64::from(*x)).unwrap();
        let err = fitness.register("a", |_: &i32| 0.0).unwrap_err();
        assert!(matches!(err, EvoError::DuplicateObjective(ref n) if n == "a"));
        assert_eq!(fitness.len(), 1);
    }

    #[test]
    fn test_objective_fault_names_objective() {
        let mut fitness = FitnessRegistry::new();
        fitness.register("ok", |x: &i32| f64::from(*x)).unwrap();
        fitness.register_objective("bad", AlwaysFails).unwrap();

        let err = fitness.evaluate(&1).unwrap_err();
        assert!(matches!(err, EvoError::ObjectiveFault { ref objective, .. } if objective == "bad"));
        assert_eq!(err.to_string(), "Objective 'bad' failed: broken");
    }

    #[test]
    fn test_duplicate_agent_rejected() {
        let mut agents = AgentRegistry::<i32>::new();
        agents.register("inc", 1, |p, _| Ok(p[0] + 1)).unwrap();
        let err = agents.register("inc", 2, |p, _| Ok(p[1])).unwrap_err();
        assert!(matches!(err, EvoError::DuplicateAgent(ref n) if n == "inc"));
        assert_eq!(agents.get("inc").unwrap().arity(), 1);
    }

    #[test]
    fn test_zero_arity_rejected() {
        let mut agents = AgentRegistry::<i32>::new();
        let err = agents.register("nothing", 0, |_, _| Ok(0)).unwrap_err();
        assert!(matches!(err, EvoError::ZeroArity(ref n) if n == "nothing"));
        assert!(agents.is_empty());
    }

    #[test]
    fn test_agent_fault_names_agent() {
        let mut agents = AgentRegistry::<i32>::new();
        agents
            .register("explode", 1, |_, _| Err(Box::new(Broken) as BoxError))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = agents.get("explode").unwrap().apply(vec![1], &mut rng).unwrap_err();
        assert!(matches!(err, EvoError::AgentFault { ref agent, .. } if agent == "explode"));
    }

    #[test]
    fn test_choose_covers_all_agents() {
        let mut agents = AgentRegistry::<i32>::new();
        agents.register("a", 1, |p, _| Ok(p[0])).unwrap();
        agents.register("b", 2, |p, _| Ok(p[1])).unwrap();
        assert_eq!(agents.names().collect::<Vec<_>>(), vec!["a", "b"]);

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 2];
        for _ in 0..100 {
            let (idx, _) = agents.choose(&mut rng).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_choose_empty() {
        let agents = AgentRegistry::<i32>::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(agents.choose(&mut rng).is_none());
    }
}
