//! Latent semantic analysis sentence ranking.
//!
//! Sentences are columns of a term-frequency matrix `A`. The right singular
//! vectors and singular values of `A` come from the eigen-decomposition of
//! the Gram matrix `AᵀA` (eigenvalues are the squared singular values), which
//! keeps the decomposition sized by sentence count rather than vocabulary.
//! Each sentence is scored by the length of its vector in the reduced
//! concept space: `sqrt(Σ_k σ_k² · v_kj²)`.

use crate::error::StageError;
use std::collections::HashMap;

/// Never rank with fewer concept dimensions than this.
pub const MIN_DIMENSIONS: usize = 3;
/// Fraction of singular values kept.
pub const REDUCTION_RATIO: f64 = 1.0;
/// Term frequency smoothing: `SMOOTHING + (1 - SMOOTHING) * tf / max_tf`.
const SMOOTHING: f64 = 0.4;

const MAX_SWEEPS: usize = 100;
const TOLERANCE: f64 = 1e-24;

/// Score every sentence; `sentences[j]` holds the content words of sentence `j`.
pub fn rank_sentences(sentences: &[Vec<String>]) -> Result<Vec<f64>, StageError> {
    let matrix = term_matrix(sentences)?;
    let gram = gram(&matrix, sentences.len());
    let (values, vectors) = jacobi_eigen(gram)?;

    let n = sentences.len();
    let rank = matrix.len().min(n);
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let dimensions = MIN_DIMENSIONS.max((rank as f64 * REDUCTION_RATIO) as usize);
    let kept: Vec<usize> = order.into_iter().take(rank.min(dimensions)).collect();

    let ranks: Vec<f64> = (0..n)
        .map(|j| {
            kept.iter()
                .map(|&k| values[k].max(0.0) * vectors[j][k].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect();

    if ranks.iter().any(|r| !r.is_finite()) {
        return Err(StageError::SummarizationFailure("non-finite sentence rank".into()));
    }
    Ok(ranks)
}

/// Smoothed term-frequency matrix, one row per term, one column per sentence.
fn term_matrix(sentences: &[Vec<String>]) -> Result<Vec<Vec<f64>>, StageError> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for word in sentences.iter().flatten() {
        let next = index.len();
        index.entry(word.as_str()).or_insert(next);
    }
    if index.is_empty() {
        return Err(StageError::SummarizationFailure("no rankable terms".into()));
    }

    let mut matrix = vec![vec![0.0; sentences.len()]; index.len()];
    for (col, words) in sentences.iter().enumerate() {
        for word in words {
            matrix[index[word.as_str()]][col] += 1.0;
        }
    }

    for col in 0..sentences.len() {
        let max = matrix.iter().map(|row| row[col]).fold(0.0, f64::max);
        if max == 0.0 {
            continue;
        }
        for row in matrix.iter_mut() {
            row[col] = SMOOTHING + (1.0 - SMOOTHING) * row[col] / max;
        }
    }
    Ok(matrix)
}

fn gram(matrix: &[Vec<f64>], n: usize) -> Vec<Vec<f64>> {
    let mut g = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let dot: f64 = matrix.iter().map(|row| row[i] * row[j]).sum();
            g[i][j] = dot;
            g[j][i] = dot;
        }
    }
    g
}

/// Cyclic Jacobi eigen-decomposition of a symmetric matrix.
///
/// Returns the eigenvalues and a matrix whose column `k` is the unit
/// eigenvector of eigenvalue `k`.
fn jacobi_eigen(mut a: Vec<Vec<f64>>) -> Result<(Vec<f64>, Vec<Vec<f64>>), StageError> {
    let n = a.len();
    let mut v: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();
    let total: f64 = a.iter().flatten().map(|x| x * x).sum();

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| (p + 1..n).map(move |q| (p, q)))
            .map(|(p, q)| a[p][q] * a[p][q])
            .sum();
        if off <= TOLERANCE * total {
            let values = (0..n).map(|i| a[i][i]).collect();
            return Ok((values, v));
        }

        for p in 0..n {
            for q in p + 1..n {
                if a[p][q] == 0.0 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for row in a.iter_mut() {
                    let (kp, kq) = (row[p], row[q]);
                    row[p] = c * kp - s * kq;
                    row[q] = s * kp + c * kq;
                }
                for k in 0..n {
                    let (pk, qk) = (a[p][k], a[q][k]);
                    a[p][k] = c * pk - s * qk;
                    a[q][k] = s * pk + c * qk;
                }
                for row in v.iter_mut() {
                    let (kp, kq) = (row[p], row[q]);
                    row[p] = c * kp - s * kq;
                    row[q] = s * kp + c * kq;
                }
            }
        }
    }

    Err(StageError::SummarizationFailure(format!(
        "eigen-decomposition did not converge after {MAX_SWEEPS} sweeps"
    )))
}
