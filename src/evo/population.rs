//! Population store keyed by evaluation vectors.

use super::registry::FitnessRegistry;
use crate::pareto;
use crate::EvoError;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Ordered `(objective name, score)` pairs for one solution.
///
/// The order is the registration order of the [`FitnessRegistry`] that
/// produced it. Two evaluations are equal when every score is bitwise
/// identical, with `-0.0` folded into `0.0`; this makes evaluations usable
/// as population keys.
#[derive(Debug, Clone)]
pub struct Evaluation {
    names: Arc<[String]>,
    scores: Vec<f64>,
}

impl Evaluation {
    pub(crate) fn new(names: Arc<[String]>, scores: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), scores.len());
        Self { names, scores }
    }

    /// Scores in objective order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Objective names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Score of the named objective.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.scores[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns `true` if `self` Pareto-dominates `other`.
    pub fn dominates(&self, other: &Evaluation) -> bool {
        pareto::dominates(&self.scores, &other.scores)
    }

    fn key_bits(&self) -> impl Iterator<Item = u64> + '_ {
        self.scores
            .iter()
            .map(|&s| if s == 0.0 { 0 } else { s.to_bits() })
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && self.key_bits().eq(other.key_bits())
    }
}

impl Eq for Evaluation {}

impl Hash for Evaluation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for bits in self.key_bits() {
            bits.hash(state);
        }
    }
}

impl AsRef<[f64]> for Evaluation {
    fn as_ref(&self) -> &[f64] {
        &self.scores
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (name, score)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={score}")?;
        }
        write!(f, ")")
    }
}

/// How the population treats a new solution whose evaluation equals an
/// existing member's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// The evaluation is the key: the new solution replaces the old one.
    #[default]
    Replace,
    /// Every solution is kept, even when evaluations collide.
    Keep,
}

/// A population member.
#[derive(Debug, Clone)]
pub struct Member<S> {
    pub evaluation: Evaluation,
    pub solution: S,
}

/// Mapping from evaluation vector to solution.
///
/// Members are kept in insertion order; a replacement under
/// [`DuplicatePolicy::Replace`] keeps the original position. Every key is
/// exactly the evaluation of its solution under the registry that scored it.
///
/// The first insertion binds the population to that registry's objective
/// names; later additions scored under different objectives are rejected.
#[derive(Debug, Clone)]
pub struct Population<S> {
    members: Vec<Member<S>>,
    index: HashMap<Evaluation, usize>,
    policy: DuplicatePolicy,
    objectives: Option<Arc<[String]>>,
}

impl<S> Default for Population<S> {
    fn default() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }
}

impl<S> Population<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            members: Vec::new(),
            index: HashMap::new(),
            policy,
            objectives: None,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Objective names this population is bound to, once anything has
    /// been inserted.
    pub fn objectives(&self) -> Option<&[String]> {
        self.objectives.as_deref()
    }

    /// Scores `solution` with `fitness` and inserts it.
    ///
    /// Returns the evaluation under which the solution was stored. Fails
    /// with [`EvoError::ObjectiveMismatch`] if `fitness` does not have the
    /// same objectives, in the same order, as the registry that scored the
    /// existing members.
    pub fn add(&mut self, solution: S, fitness: &FitnessRegistry<S>) -> Result<Evaluation, EvoError> {
        if let Some(bound) = &self.objectives {
            if **bound != *fitness.names() {
                return Err(EvoError::ObjectiveMismatch {
                    expected: bound.to_vec(),
                    found: fitness.names().to_vec(),
                });
            }
        }
        let evaluation = fitness.evaluate(&solution)?;
        self.insert(evaluation.clone(), solution);
        Ok(evaluation)
    }

    /// Inserts an already scored solution.
    pub(crate) fn insert(&mut self, evaluation: Evaluation, solution: S) {
        if self.objectives.is_none() {
            self.objectives = Some(Arc::clone(&evaluation.names));
        }
        if self.policy == DuplicatePolicy::Replace {
            if let Some(&i) = self.index.get(&evaluation) {
                self.members[i].solution = solution;
                return;
            }
            self.index.insert(evaluation.clone(), self.members.len());
        }
        self.members.push(Member {
            evaluation,
            solution,
        });
    }

    /// Draws `k` members uniformly at random, with replacement, and returns
    /// clones of their solutions.
    ///
    /// Returns an empty vector when the population is empty.
    pub fn sample<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Vec<S>
    where
        S: Clone,
    {
        if self.members.is_empty() {
            return Vec::new();
        }
        (0..k)
            .map(|_| {
                let i = rng.random_range(0..self.members.len());
                self.members[i].solution.clone()
            })
            .collect()
    }

    /// Members that no other member dominates, in population order.
    pub fn non_dominated(&self) -> Vec<&Member<S>> {
        let evaluations: Vec<&Evaluation> = self.members.iter().map(|m| &m.evaluation).collect();
        pareto::non_dominated_indices(&evaluations)
            .into_iter()
            .map(|i| &self.members[i])
            .collect()
    }

    /// Drops every dominated member. Returns the number removed.
    pub fn prune(&mut self) -> usize {
        let before = self.members.len();
        let keep = pareto::non_dominated_indices(
            &self.members.iter().map(|m| &m.evaluation).collect::<Vec<_>>(),
        );
        if keep.len() == before {
            return 0;
        }

        let mut keep = keep.into_iter().peekable();
        let mut i = 0;
        self.members.retain(|_| {
            let kept = keep.peek() == Some(&i);
            if kept {
                keep.next();
            }
            i += 1;
            kept
        });
        self.reindex();
        before - self.members.len()
    }

    fn reindex(&mut self) {
        self.index.clear();
        if self.policy == DuplicatePolicy::Replace {
            for (i, member) in self.members.iter().enumerate() {
                self.index.insert(member.evaluation.clone(), i);
            }
        }
    }

    pub fn get(&self, evaluation: &Evaluation) -> Option<&S> {
        match self.policy {
            DuplicatePolicy::Replace => self
                .index
                .get(evaluation)
                .map(|&i| &self.members[i].solution),
            DuplicatePolicy::Keep => self
                .members
                .iter()
                .find(|m| &m.evaluation == evaluation)
                .map(|m| &m.solution),
        }
    }

    pub fn members(&self) -> &[Member<S>] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member<S>> {
        self.members.iter()
    }

    pub fn evaluations(&self) -> impl Iterator<Item = &Evaluation> {
        self.members.iter().map(|m| &m.evaluation)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_members(self) -> Vec<Member<S>> {
        self.members
    }
}

impl<'a, S> IntoIterator for &'a Population<S> {
    type Item = &'a Member<S>;
    type IntoIter = std::slice::Iter<'a, Member<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// One `evaluation:\tsolution` line per member.
impl<S: fmt::Debug> fmt::Display for Population<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for member in &self.members {
            writeln!(f, "{}:\t{:?}", member.evaluation, member.solution)?;
        }
        Ok(())
    }
}
