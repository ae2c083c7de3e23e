use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{decay::Decay, util::argmax};

/// Epsilon greedy exploration policy with an in-place decaying epsilon
///
/// Every action is given probability ε/n, and the greedy action receives an
/// extra 1 - ε, for a total of 1 - ε + ε/n. The greedy action is the lowest
/// index among the maximal values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Current exploration probability
    pub fn epsilon(&self) -> f32 {
        self.epsilon.value()
    }

    /// Probability of choosing each action given its value
    pub fn probabilities(&self, q_values: &[f32]) -> Vec<f32> {
        let epsilon = self.epsilon();
        let n = q_values.len() as f32;
        let mut probs = vec![epsilon / n; q_values.len()];
        if let Some(p) = probs.get_mut(argmax(q_values)) {
            *p += 1.0 - epsilon;
        }
        probs
    }

    /// Sample an action index given the action values
    ///
    /// **Panics** if `q_values` is empty
    pub fn choose<R: Rng + ?Sized>(&self, q_values: &[f32], rng: &mut R) -> usize {
        let dist = WeightedIndex::new(self.probabilities(q_values))
            .expect("`q_values` is not empty and epsilon is in [0,1]");
        dist.sample(rng)
    }

    /// Advance epsilon by one update
    pub fn decay(&mut self) {
        self.epsilon.step();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay::{Constant, Multiplicative};

    #[test]
    fn probabilities_boost_greedy_action() {
        let policy = EpsilonGreedy::new(Constant::new(0.5));
        let probs = policy.probabilities(&[2.0, 4.0]);
        assert_relative_eq!(probs[0], 0.25);
        assert_relative_eq!(probs[1], 0.75);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let policy = EpsilonGreedy::new(Constant::new(0.3));
        let probs = policy.probabilities(&[0.1, -1.0, 7.0, 7.0, 3.0, 0.0]);
        assert_relative_eq!(probs.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(probs[2], 0.7 + 0.05, epsilon = 1e-6);
        assert_relative_eq!(probs[3], 0.05, epsilon = 1e-6);
    }

    #[test]
    fn full_exploration_is_uniform() {
        let policy = EpsilonGreedy::new(Constant::new(1.0));
        let probs = policy.probabilities(&[0.0, 9.0, 0.0, 0.0]);
        for p in probs {
            assert_relative_eq!(p, 0.25);
        }
    }

    #[test]
    fn zero_epsilon_is_greedy() {
        let policy = EpsilonGreedy::new(Constant::new(0.0));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(policy.choose(&[1.0, 3.0, 3.0, -2.0], &mut rng), 1);
        }
    }

    #[test]
    fn choose_stays_in_range() {
        let policy = EpsilonGreedy::new(Constant::new(0.9));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            assert!(policy.choose(&[0.0; 6], &mut rng) < 6);
        }
    }

    #[test]
    fn decay_advances_schedule() {
        let mut policy = EpsilonGreedy::new(Multiplicative::new(1.0, 0.1, 0.5).unwrap());
        policy.decay();
        assert_eq!(policy.epsilon(), 0.5);
    }
}
