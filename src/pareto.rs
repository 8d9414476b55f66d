//! Pareto dominance over score vectors.
//!
//! All objectives are **minimized**: a score is a penalty and lower values
//! are better. Vectors compared against each other must have the same
//! length and the same objective order.
//!
//! # Algorithms
//!
//! - [`dominates`]: Strict Pareto dominance test
//! - [`dominance`]: Three-way dominance comparison
//! - [`non_dominated_indices`]: Exhaustive O(m * n²) frontier extraction
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other (equal or incomparable).
    Neither,
}

/// Returns `true` if `p` Pareto-dominates `q`.
///
/// `p` dominates `q` when it is no worse on every objective and strictly
/// better on at least one. A vector never dominates itself, and a NaN
/// score on either side blocks dominance for that pair.
///
/// # Example
///
/// ```
/// use u_pareto::pareto::dominates;
///
/// assert!(dominates(&[2.0, 5.0], &[4.0, 5.0]));
/// assert!(!dominates(&[2.0, 5.0], &[3.0, 1.0]));
/// assert!(!dominates(&[2.0, 5.0], &[2.0, 5.0]));
/// ```
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn dominates(p: &[f64], q: &[f64]) -> bool {
    debug_assert_eq!(p.len(), q.len(), "score vectors must have equal length");

    let mut strictly_better = false;
    for (&vp, &vq) in p.iter().zip(q.iter()) {
        // Negated so that NaN fails the test.
        if !(vp <= vq) {
            return false;
        }
        if vp < vq {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Compare two score vectors for Pareto dominance (minimization).
pub fn dominance(a: &[f64], b: &[f64]) -> Dominance {
    if dominates(a, b) {
        Dominance::Left
    } else if dominates(b, a) {
        Dominance::Right
    } else {
        Dominance::Neither
    }
}

/// Indices of the vectors that no other vector dominates.
///
/// Every pair is compared, so the cost is O(m * n²) for `n` vectors of `m`
/// objectives. Incomparable vectors are all retained, as are exact
/// duplicates. The returned indices are in ascending order.
///
/// # Example
///
/// ```
/// use u_pareto::pareto::non_dominated_indices;
///
/// let scores = vec![
///     vec![2.0, 5.0], // A
///     vec![3.0, 1.0], // B
///     vec![4.0, 4.0], // C, dominated by B
/// ];
///
/// assert_eq!(non_dominated_indices(&scores), vec![0, 1]);
/// ```
pub fn non_dominated_indices<V: AsRef<[f64]>>(vectors: &[V]) -> Vec<usize> {
    let n = vectors.len();
    let mut dominated = vec![false; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance(vectors[i].as_ref(), vectors[j].as_ref()) {
                Dominance::Left => dominated[j] = true,
                Dominance::Right => dominated[i] = true,
                Dominance::Neither => {}
            }
        }
    }

    (0..n).filter(|&i| !dominated[i]).collect()
}

// ============================================================================
// Tests
// ============================================================================
