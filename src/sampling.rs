// src/sampling.rs
//
// Standard-normal sampling on top of the uniform random stream.

use rand::Rng;

use crate::types::Embedding;

/// Draw one standard-normal sample via the Box-Muller transform.
///
/// Consumes exactly two uniform draws from `rng`. The first uniform is
/// mapped into (0, 1] so the logarithm stays finite.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Draw a vector of `dim` independent standard-normal samples, in
/// component order.
pub fn normal_vector<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Embedding {
    (0..dim).map(|_| standard_normal(rng)).collect()
}
