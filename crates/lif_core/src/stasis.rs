use crate::sampling::{chance, iid_set, uniform_index};
use lif_data::{HabitabilityPolicy, StasisSet};
use rand::Rng;

/// Randomized genetics on stasis sets.
pub trait StasisLogic: Sized {
    /// Drops one uniformly chosen member. No-op on the empty set.
    fn lose_random<R: Rng>(self, rng: &mut R) -> Self;
    /// Drops one member as the policy dictates.
    fn lose_by<R: Rng>(self, policy: HabitabilityPolicy, rng: &mut R) -> Self;
    /// Flips each of the nine bits independently with probability `mut_p`.
    fn mutate<R: Rng>(self, mut_p: f64, rng: &mut R) -> Self;
    /// Keeps the shared members and each differing member with probability 1/2.
    fn recombine<R: Rng>(self, other: Self, rng: &mut R) -> Self;
}

impl StasisLogic for StasisSet {
    fn lose_random<R: Rng>(self, rng: &mut R) -> Self {
        let members = self.members();
        match uniform_index(members.len(), rng) {
            Some(i) => self.with_bit_cleared(members[i] as usize),
            None => self,
        }
    }

    fn lose_by<R: Rng>(self, policy: HabitabilityPolicy, rng: &mut R) -> Self {
        match policy {
            HabitabilityPolicy::Max => self.lose_max(),
            HabitabilityPolicy::Min => self.lose_min(),
            HabitabilityPolicy::Random => self.lose_random(rng),
        }
    }

    fn mutate<R: Rng>(self, mut_p: f64, rng: &mut R) -> Self {
        self ^ iid_set(mut_p, rng)
    }

    fn recombine<R: Rng>(self, other: Self, rng: &mut R) -> Self {
        let mut child = self & other;
        for m in (self ^ other).iter() {
            if chance(0.5, rng) {
                child = child.with_bit_set(m as usize);
            }
        }
        child
    }
}
