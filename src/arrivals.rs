// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Poisson Arrival Generator

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Highest expected arrivals per tick; larger rates are clamped to it.
pub const MAX_ARRIVAL_RATE: f64 = 1_000.0;

/// Seeded source of new riders: how many arrive this tick, and where from/to.
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    rng: ChaCha8Rng,
}

impl ArrivalGenerator {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Number of arrivals this tick for an expected `lambda` per tick.
    /// Zero, negative and non-finite rates produce no arrivals; rates above
    /// `MAX_ARRIVAL_RATE` draw as if at the cap.
    pub fn arrival_count(&mut self, lambda: f64) -> u32 {
        if !lambda.is_finite() || lambda <= 0.0 {
            return 0;
        }
        poisson_sample(&mut self.rng, lambda.min(MAX_ARRIVAL_RATE))
    }

    /// Two distinct floor indices drawn uniformly from `0..floors`.
    /// `floors` must be at least 2; the building config guarantees it.
    pub fn distinct_pair(&mut self, floors: usize) -> (usize, usize) {
        debug_assert!(floors >= 2, "distinct pair needs two floors");
        let origin = self.rng.gen_range(0..floors);
        let mut destination = self.rng.gen_range(0..floors - 1);
        if destination >= origin {
            destination += 1;
        }
        (origin, destination)
    }

    /// Origin/destination pairs for every rider arriving this tick.
    pub fn generate_tick(&mut self, lambda: f64, floors: usize) -> Vec<(usize, usize)> {
        let n = self.arrival_count(lambda);
        (0..n).map(|_| self.distinct_pair(floors)).collect()
    }
}

/// Poisson sampling via Knuth algorithm.
/// For λ < 30, uses direct method. For larger λ, uses normal approximation.
fn poisson_sample<R: Rng>(rng: &mut R, lambda: f64) -> u32 {
    if lambda < 30.0 {
        let l = (-lambda).exp();
        let mut k: u32 = 0;
        let mut p: f64 = 1.0;
        loop {
            k += 1;
            p *= rng.gen::<f64>();
            if p <= l {
                return k - 1;
            }
        }
    } else {
        let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
        let u2: f64 = rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        let result = lambda + lambda.sqrt() * z;
        result.round().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisson_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let lambda = 2.5;
        let n = 10000;
        let sum: u64 = (0..n).map(|_| poisson_sample(&mut rng, lambda) as u64).sum();
        let mean = sum as f64 / n as f64;
        assert!((mean - lambda).abs() < 0.1, "Poisson mean {} far from λ={}", mean, lambda);
    }

    #[test]
    fn test_zero_rate_never_arrives() {
        let mut gen = ArrivalGenerator::from_seed(7);
        for _ in 0..1000 {
            assert_eq!(gen.arrival_count(0.0), 0);
        }
        assert_eq!(gen.arrival_count(-1.0), 0);
        assert_eq!(gen.arrival_count(f64::NAN), 0);
    }

    #[test]
    fn test_huge_rate_is_clamped() {
        let mut gen = ArrivalGenerator::from_seed(11);
        for _ in 0..100 {
            let n = gen.arrival_count(1e12);
            assert!(n > 0 && n < 2 * MAX_ARRIVAL_RATE as u32, "count {} not clamped", n);
        }
        assert!(gen.generate_tick(f64::MAX, 5).len() < 2 * MAX_ARRIVAL_RATE as usize);
    }

    #[test]
    fn test_distinct_pair_covers_all_floors() {
        let mut gen = ArrivalGenerator::from_seed(3);
        let mut seen_origin = [false; 5];
        let mut seen_dest = [false; 5];
        for _ in 0..2000 {
            let (a, b) = gen.distinct_pair(5);
            assert_ne!(a, b);
            assert!(a < 5 && b < 5);
            seen_origin[a] = true;
            seen_dest[b] = true;
        }
        assert!(seen_origin.iter().all(|&s| s));
        assert!(seen_dest.iter().all(|&s| s));
    }

    #[test]
    fn test_same_seed_same_traffic() {
        let mut a = ArrivalGenerator::from_seed(99);
        let mut b = ArrivalGenerator::from_seed(99);
        for _ in 0..50 {
            assert_eq!(a.generate_tick(1.5, 5), b.generate_tick(1.5, 5));
        }
    }
}
