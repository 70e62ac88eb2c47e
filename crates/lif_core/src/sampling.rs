//! Random draws used by the transition rule.
//!
//! All helpers take the generator explicitly so every caller controls its own
//! stream; nothing here touches thread-local randomness.

use lif_data::{StasisSet, STASIS_DOMAIN};
use rand::Rng;

/// True with probability `p`. `p >= 1` always succeeds, `p <= 0` never does.
#[inline]
pub fn chance<R: Rng>(p: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < p
}

/// Samples a set by including each of the nine members independently with
/// probability `p`, drawing in ascending member order.
pub fn iid_set<R: Rng>(p: f64, rng: &mut R) -> StasisSet {
    let mut set = StasisSet::EMPTY;
    for k in 0..STASIS_DOMAIN {
        if chance(p, rng) {
            set = set.with_bit_set(k);
        }
    }
    set
}

/// Uniform index into a non-empty slice of length `len`.
#[inline]
pub fn uniform_index<R: Rng>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}

/// Picks an index with probability proportional to its weight.
///
/// Draws `r ~ uniform(0, Σw)` and walks the weights subtracting each one,
/// returning the first index where the remainder goes negative. Rounding can
/// leave the remainder at exactly zero after the last weight; the last index
/// is returned then. If no weight is positive the choice is uniform.
///
/// Returns `None` only for an empty slice.
pub fn weighted_choice<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return uniform_index(weights.len(), rng);
    }
    let mut remainder = rng.gen::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        remainder -= w;
        if remainder < 0.0 {
            return Some(i);
        }
    }
    Some(weights.len() - 1)
}

/// Settlement weights `exp(-fit_cost * size)` for every possible stasis size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessCosts([f64; STASIS_DOMAIN + 1]);

impl FitnessCosts {
    pub fn new(fit_cost: f64) -> Self {
        let mut table = [0.0; STASIS_DOMAIN + 1];
        for (size, w) in table.iter_mut().enumerate() {
            *w = (-fit_cost * size as f64).exp();
        }
        Self(table)
    }

    #[inline]
    pub fn weight(&self, stasis: StasisSet) -> f64 {
        self.0[stasis.count()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_iid_set_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(iid_set(0.0, &mut rng), StasisSet::EMPTY);
        assert_eq!(iid_set(1.0, &mut rng), StasisSet::FULL);
    }

    #[test]
    fn test_iid_set_density() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let total: usize = (0..2000).map(|_| iid_set(0.25, &mut rng).count()).sum();
        let mean = total as f64 / 2000.0;
        assert!((mean - 2.25).abs() < 0.15, "mean size {mean}");
    }

    #[test]
    fn test_weighted_choice_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(weighted_choice(&[], &mut rng), None);
    }

    #[test]
    fn test_weighted_choice_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            assert_eq!(weighted_choice(&[0.0, 2.0, 0.0], &mut rng), Some(1));
        }
    }

    #[test]
    fn test_weighted_choice_all_zero_is_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut hits = [0usize; 2];
        for _ in 0..2000 {
            hits[weighted_choice(&[0.0, 0.0], &mut rng).unwrap()] += 1;
        }
        assert!(hits[0] > 800 && hits[1] > 800, "{hits:?}");
    }

    #[test]
    fn test_weighted_choice_proportions() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut hits = [0usize; 2];
        for _ in 0..10_000 {
            hits[weighted_choice(&[1.0, 3.0], &mut rng).unwrap()] += 1;
        }
        let ratio = hits[1] as f64 / 10_000.0;
        assert!((ratio - 0.75).abs() < 0.03, "ratio {ratio}");
    }

    #[test]
    fn test_fitness_costs_favor_sparse_sets() {
        let costs = FitnessCosts::new(5.0);
        let sparse = StasisSet::from_members([3]).unwrap();
        let dense = StasisSet::from_members([0, 1, 2, 3, 4]).unwrap();
        assert!((costs.weight(sparse) - (-5.0f64).exp()).abs() < 1e-12);
        assert!(costs.weight(sparse) / costs.weight(dense) > 4.0e8);
        assert_eq!(FitnessCosts::new(0.0).weight(StasisSet::FULL), 1.0);
    }
}
