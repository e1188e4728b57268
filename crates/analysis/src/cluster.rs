//! Loss clustering.
//!
//! Per-move losses are z-score normalized and split into at most two groups
//! with one-dimensional k-means, separating steady play from blunders. The
//! mean of the resulting centroids is the representative score.
//!
//! Initialization is deterministic: centroids start at evenly spaced order
//! statistics (for two clusters, the smallest and largest value), so the same
//! losses always produce the same score regardless of their order.

use serde::Serialize;
use thiserror::Error;

/// Upper bound on the number of groups used for losses.
pub const MAX_CLUSTERS: usize = 2;
const MAX_ITERATIONS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("no scored moves for the analyzed side")]
    NoMoves,
    #[error("all {count} scored moves have the same loss, so they cannot be normalized")]
    ZeroVariance { count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Centroids in normalized units, ascending.
    pub centroids: Vec<f64>,
    /// Arithmetic mean of `centroids`.
    pub representative: f64,
    /// How many losses fell into each centroid's cluster.
    pub sizes: Vec<usize>,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Rescales to zero mean and unit standard deviation.
pub fn normalize(values: &[f64]) -> Result<Vec<f64>, ClusterError> {
    let (Some(m), Some(sd)) = (mean(values), std_dev(values)) else {
        return Err(ClusterError::NoMoves);
    };
    if !sd.is_finite() || sd <= f64::EPSILON * m.abs().max(1.0) {
        return Err(ClusterError::ZeroVariance {
            count: values.len(),
        });
    }
    Ok(values.iter().map(|v| (v - m) / sd).collect())
}

fn nearest(centroids: &[f64], value: f64) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (value - **a).abs().total_cmp(&(value - **b).abs()))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Lloyd's algorithm on a line. Returns `(centroids, cluster sizes)` with
/// centroids ascending; `k` is clamped to the number of values.
pub fn kmeans_1d(values: &[f64], k: usize) -> (Vec<f64>, Vec<usize>) {
    let k = k.min(values.len());
    if k == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut centroids: Vec<f64> = (0..k)
        .map(|i| {
            let idx = if k == 1 {
                0
            } else {
                i * (sorted.len() - 1) / (k - 1)
            };
            sorted[idx]
        })
        .collect();
    let mut assignment = vec![usize::MAX; sorted.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (slot, &value) in assignment.iter_mut().zip(&sorted) {
            let cluster = nearest(&centroids, value);
            if *slot != cluster {
                *slot = cluster;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (&cluster, &value) in assignment.iter().zip(&sorted) {
            sums[cluster] += value;
            counts[cluster] += 1;
        }
        for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(&counts) {
            // An emptied cluster keeps its previous centroid.
            if *count > 0 {
                *centroid = sum / *count as f64;
            }
        }
    }

    let mut sizes = vec![0usize; k];
    for &cluster in &assignment {
        sizes[cluster] += 1;
    }
    (centroids, sizes)
}

/// Normalizes `losses`, clusters them into `min(len, 2)` groups and reduces
/// the centroids to their mean.
pub fn cluster_losses(losses: &[f64]) -> Result<ClusterSummary, ClusterError> {
    if losses.is_empty() {
        return Err(ClusterError::NoMoves);
    }
    let normalized = normalize(losses)?;
    let (centroids, sizes) = kmeans_1d(&normalized, losses.len().min(MAX_CLUSTERS));
    let representative = mean(&centroids).ok_or(ClusterError::NoMoves)?;

    tracing::debug!(
        losses = losses.len(),
        ?centroids,
        ?sizes,
        representative,
        "clustered move losses"
    );

    Ok(ClusterSummary {
        centroids,
        representative,
        sizes,
    })
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod cluster_tests;
