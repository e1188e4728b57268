use super::*;
use crate::classifier::{classify, SkillCategory};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_mean_and_population_std_dev() {
    assert_eq!(mean(&[]), None);
    assert_close(mean(&[1.0, 2.0, 3.0, 6.0]).unwrap(), 3.0);
    assert_close(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap(), 2.0);
}

#[test]
fn test_normalize_guards_degenerate_input() {
    assert_eq!(normalize(&[]), Err(ClusterError::NoMoves));
    assert_eq!(
        normalize(&[35.0, 35.0, 35.0]),
        Err(ClusterError::ZeroVariance { count: 3 })
    );
    let z = normalize(&[1.0, 3.0]).unwrap();
    assert_close(z[0], -1.0);
    assert_close(z[1], 1.0);
}

#[test]
fn test_outlier_is_isolated() {
    let summary = cluster_losses(&[10.0, 12.0, 11.0, 400.0]).unwrap();

    assert_eq!(summary.sizes, [3, 1]);
    assert_eq!(summary.centroids.len(), 2);
    // The three small losses are nearly equal, so the centroids sit close to
    // the -1/sqrt(3) and sqrt(3) of a perfectly flat group.
    let sqrt3 = 3f64.sqrt();
    assert!((summary.centroids[0] + 1.0 / sqrt3).abs() < 1e-4);
    assert!((summary.centroids[1] - sqrt3).abs() < 1e-4);

    // A flat mean of normalized values would be 0; two regimes pull it up.
    assert!((summary.representative - 1.0 / sqrt3).abs() < 1e-4);
    assert_eq!(classify(summary.representative), SkillCategory::Professional);
}

#[test]
fn test_single_or_constant_losses_are_insufficient() {
    assert_eq!(cluster_losses(&[]), Err(ClusterError::NoMoves));
    assert_eq!(
        cluster_losses(&[120.0]),
        Err(ClusterError::ZeroVariance { count: 1 })
    );
    assert_eq!(
        cluster_losses(&[0.0, 0.0]),
        Err(ClusterError::ZeroVariance { count: 2 })
    );
}

#[test]
fn test_two_losses_form_two_singletons() {
    let summary = cluster_losses(&[20.0, 80.0]).unwrap();
    assert_eq!(summary.sizes, [1, 1]);
    assert_close(summary.representative, 0.0);
}

#[test]
fn test_result_is_invariant_to_order() {
    let losses: Vec<f64> = (0..60)
        .map(|i| match i % 7 {
            0 => 350.0 + f64::from(i),
            _ => 15.0 + f64::from(i % 11) * 3.0,
        })
        .collect();
    let baseline = cluster_losses(&losses).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut shuffled = losses.clone();
        shuffled.shuffle(&mut rng);
        let summary = cluster_losses(&shuffled).unwrap();
        assert_close(summary.representative, baseline.representative);
        assert_eq!(summary.sizes, baseline.sizes);
    }
}

#[test]
fn test_kmeans_clamps_cluster_count() {
    let (centroids, sizes) = kmeans_1d(&[4.0], 2);
    assert_eq!(centroids, [4.0]);
    assert_eq!(sizes, [1]);

    let (centroids, sizes) = kmeans_1d(&[], 2);
    assert!(centroids.is_empty());
    assert!(sizes.is_empty());

    let (centroids, sizes) = kmeans_1d(&[1.0, 2.0, 9.0, 10.0, 11.0], 2);
    assert_eq!(sizes, [2, 3]);
    assert_close(centroids[0], 1.5);
    assert_close(centroids[1], 10.0);
}
