//! Core traits for objectives and agents.

use rand::RngCore;

/// Error type returned by user-supplied objectives and agents.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A named objective scores a solution. Lower is better.
///
/// Scoring must be pure: the same solution must always produce the same
/// score, because scores are used as population keys.
///
/// Plain closures `Fn(&S) -> f64` can be registered directly through
/// [`FitnessRegistry::register`](super::FitnessRegistry::register); implement
/// this trait when scoring can fail.
pub trait Objective<S> {
    /// Scores `solution`.
    fn score(&self, solution: &S) -> Result<f64, BoxError>;
}

/// An agent produces one new solution from `k` existing ones.
///
/// The engine samples the inputs from the population and clones them, so
/// the agent owns its inputs and may consume or modify them freely.
///
/// # Examples
///
/// ```ignore
/// struct FlipOne;
///
/// impl Agent<Vec<bool>> for FlipOne {
///     fn apply(&self, mut parents: Vec<Vec<bool>>, rng: &mut dyn RngCore) -> Result<Vec<bool>, BoxError> {
///         let mut child = parents.swap_remove(0);
///         let i = rng.random_range(0..child.len());
///         child[i] = !child[i];
///         Ok(child)
///     }
/// }
/// ```
pub trait Agent<S> {
    /// Builds a new solution from `parents`, which holds exactly as many
    /// solutions as the agent's registered arity.
    fn apply(&self, parents: Vec<S>, rng: &mut dyn RngCore) -> Result<S, BoxError>;
}

/// Adapter for infallible scoring closures.
pub(crate) struct FnObjective<F>(pub(crate) F);

impl<S, F> Objective<S> for FnObjective<F>
where
    F: Fn(&S) -> f64,
{
    fn score(&self, solution: &S) -> Result<f64, BoxError> {
        Ok((self.0)(solution))
    }
}

/// Adapter for agent closures.
pub(crate) struct FnAgent<F>(pub(crate) F);

impl<S, F> Agent<S> for FnAgent<F>
where
    F: Fn(Vec<S>, &mut dyn RngCore) -> Result<S, BoxError>,
{
    fn apply(&self, parents: Vec<S>, rng: &mut dyn RngCore) -> Result<S, BoxError> {
        (self.0)(parents, rng)
    }
}
