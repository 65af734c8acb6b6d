// src/clusters.rs
//
// Clustered embedding generator: the default implementation of the
// external embedding-generator interface used once at construction to
// produce the initial item embeddings.
//
// Samples are distributed as evenly as possible across the given centers
// (remainder to the earliest centers), each point drawn as
// `center + cluster_std * N(0, I)`, and the whole set is shuffled at the
// end. The generator owns a private seeded stream and never touches the
// session stream.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::sampling::standard_normal;
use crate::types::Embedding;

/// Generate `n_samples` points of dimension `n_features` clustered around
/// `centers` with per-component standard deviation `cluster_std`.
///
/// Deterministic given `seed`. Each center's embedding must have
/// `n_features` components.
pub fn generate_clustered_points(
    n_samples: usize,
    n_features: usize,
    centers: &[Embedding],
    cluster_std: f64,
    seed: u64,
) -> Vec<Embedding> {
    debug_assert!(!centers.is_empty(), "at least one cluster center required");
    debug_assert!(centers.iter().all(|c| c.len() == n_features));

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let k = centers.len();
    let base = n_samples / k;
    let remainder = n_samples % k;

    let mut points = Vec::with_capacity(n_samples);
    for (i, center) in centers.iter().enumerate() {
        let count = base + usize::from(i < remainder);
        for _ in 0..count {
            let point: Embedding = center
                .iter()
                .map(|&c| c + cluster_std * standard_normal(&mut rng))
                .collect();
            points.push(point);
        }
    }

    points.shuffle(&mut rng);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centers_2d() -> Vec<Embedding> {
        vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![-10.0, 5.0]]
    }

    #[test]
    fn generates_requested_count_and_dimension() {
        let points = generate_clustered_points(10, 2, &centers_2d(), 0.5, 1);
        assert_eq!(points.len(), 10);
        assert!(points.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn deterministic_given_seed() {
        let a = generate_clustered_points(25, 2, &centers_2d(), 0.5, 99);
        let b = generate_clustered_points(25, 2, &centers_2d(), 0.5, 99);
        assert_eq!(a, b);

        let c = generate_clustered_points(25, 2, &centers_2d(), 0.5, 100);
        assert_ne!(a, c, "different seeds should produce different point sets");
    }

    #[test]
    fn points_stay_near_their_centers_for_small_std() {
        let centers = centers_2d();
        let points = generate_clustered_points(30, 2, &centers, 0.01, 5);
        for p in &points {
            let nearest = centers
                .iter()
                .map(|c| {
                    c.iter()
                        .zip(p)
                        .map(|(a, b)| (a - b).powi(2))
                        .sum::<f64>()
                        .sqrt()
                })
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 1.0, "point {p:?} is far from every center");
        }
    }

    #[test]
    fn uneven_split_assigns_remainder() {
        // 7 samples over 3 centers: 3 + 2 + 2.
        let points = generate_clustered_points(7, 2, &centers_2d(), 0.01, 5);
        assert_eq!(points.len(), 7);
        let near_first = points
            .iter()
            .filter(|p| p.iter().map(|x| x * x).sum::<f64>().sqrt() < 1.0)
            .count();
        assert_eq!(near_first, 3, "first center should receive the remainder");
    }
}
