use std::collections::HashMap;

use log::{debug, trace};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    check_interval,
    decay::Multiplicative,
    env::{Environment, Episode},
    error::{ConfigError, Result},
    exploration::EpsilonGreedy,
    memory::Exp,
    util::{argmax, check_half_open},
};

use super::{q_table::QTable, Hashable};

/// The bootstrap estimate of the next state's value used in the TD target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TdTarget {
    /// Expectation of the next state's values under the current epsilon greedy policy (Expected SARSA)
    #[default]
    Expected,
    /// Maximum of the next state's values (SARSAMAX / Q-learning)
    Max,
}

/// Configuration for the [`ExpectedSarsaAgent`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpectedSarsaAgentConfig {
    /// Initial exploration probability, in `[0,1]`
    ///
    /// **Default**: `1.0`
    pub eps_start: f32,
    /// Floor for the exploration probability, in `[0, eps_start]`
    ///
    /// **Default**: `1e-8`
    pub eps_min: f32,
    /// Multiplicative decay applied to epsilon after every update, in `(0,1]`
    ///
    /// **Default**: `0.9995`
    pub eps_decay: f32,
    /// Learning rate, in `(0,1]`
    ///
    /// **Default**: `0.6`
    pub alpha: f32,
    /// Discount factor, non-negative
    ///
    /// **Default**: `1.0`
    pub gamma: f32,
    /// Number of discrete actions, at least one
    ///
    /// **Default**: `6`, the size of the taxi action space
    pub n_actions: usize,
    /// Estimate of the next state's value
    ///
    /// **Default**: [`TdTarget::Expected`]
    pub target: TdTarget,
    /// Drop the bootstrap term on terminal transitions, so the target is just the reward
    ///
    /// **Default**: `false`, the bootstrap term is kept even when `done` is set
    pub mask_terminal: bool,
}

impl Default for ExpectedSarsaAgentConfig {
    fn default() -> Self {
        Self {
            eps_start: 1.0,
            eps_min: 1e-8,
            eps_decay: 0.9995,
            alpha: 0.6,
            gamma: 1.0,
            n_actions: 6,
            target: TdTarget::Expected,
            mask_terminal: false,
        }
    }
}

/// Checks the learning rate is in `(0,1]` and the discount factor is finite and non-negative
fn check_step_sizes(alpha: f32, gamma: f32) -> Result<()> {
    check_half_open("alpha", alpha, 0.0, 1.0)?;
    if !(gamma >= 0.0 && gamma.is_finite()) {
        return Err(ConfigError::Negative {
            name: "gamma",
            value: gamma,
        });
    }
    Ok(())
}

/// A tabular agent that learns with the Expected SARSA update rule and acts
/// with an epsilon greedy policy whose epsilon decays after every update
///
/// For a transition (s, a, r, s') the update is
///
/// Q(s,a) ← Q(s,a) + α(r + γ Σ<sub>a'</sub> π(a'|s') Q(s',a') - Q(s,a))
///
/// where π is the epsilon greedy policy derived from the current table, and
/// afterwards ε ← max(ε * decay, ε<sub>min</sub>).
///
/// ### Generics
/// - `S` - The state type, used as a key in the [`QTable`]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawAgent<S>",
        bound(
            serialize = "S: Serialize + Hashable",
            deserialize = "S: Deserialize<'de> + Hashable"
        )
    )
)]
pub struct ExpectedSarsaAgent<S: Hashable> {
    q_table: QTable<S>,
    exploration: EpsilonGreedy<Multiplicative>,
    alpha: f32, // learning rate
    gamma: f32, // discount factor
    target: TdTarget,
    mask_terminal: bool,
}

/// Serialized form of [`ExpectedSarsaAgent`], validated on conversion
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Hashable"))]
struct RawAgent<S: Hashable> {
    q_table: QTable<S>,
    exploration: EpsilonGreedy<Multiplicative>,
    alpha: f32,
    gamma: f32,
    target: TdTarget,
    mask_terminal: bool,
}

#[cfg(feature = "serde")]
impl<S: Hashable> TryFrom<RawAgent<S>> for ExpectedSarsaAgent<S> {
    type Error = ConfigError;

    fn try_from(raw: RawAgent<S>) -> Result<Self> {
        check_step_sizes(raw.alpha, raw.gamma)?;
        Ok(Self {
            q_table: raw.q_table,
            exploration: raw.exploration,
            alpha: raw.alpha,
            gamma: raw.gamma,
            target: raw.target,
            mask_terminal: raw.mask_terminal,
        })
    }
}

impl<S: Hashable> ExpectedSarsaAgent<S> {
    /// Initialize a new `ExpectedSarsaAgent` with an empty table
    ///
    /// **Errors** if any hyperparameter is outside its documented range
    pub fn new(config: ExpectedSarsaAgentConfig) -> Result<Self> {
        let ExpectedSarsaAgentConfig {
            eps_start,
            eps_min,
            eps_decay,
            alpha,
            gamma,
            n_actions,
            target,
            mask_terminal,
        } = config;

        if n_actions == 0 {
            return Err(ConfigError::NoActions);
        }
        check_interval!(eps_start, 0.0, 1.0)?;
        check_interval!(eps_min, 0.0, 1.0)?;
        if eps_min > eps_start {
            return Err(ConfigError::EpsilonOrder {
                start: eps_start,
                end: eps_min,
            });
        }
        check_half_open("eps_decay", eps_decay, 0.0, 1.0)?;
        check_step_sizes(alpha, gamma)?;

        debug!(
            "Expected SARSA agent: n_actions={n_actions}, epsilon={eps_start}->{eps_min} (x{eps_decay}), alpha={alpha}, gamma={gamma}, target={target:?}, mask_terminal={mask_terminal}"
        );

        Ok(Self {
            q_table: QTable::new(n_actions),
            exploration: EpsilonGreedy::new(Multiplicative::new(eps_start, eps_min, eps_decay)?),
            alpha,
            gamma,
            target,
            mask_terminal,
        })
    }

    /// Choose an action for the given state with the epsilon greedy policy
    ///
    /// An unseen state is added to the table with all-zero values.
    ///
    /// **Returns** an action index in `[0, n_actions)`
    pub fn select_action<R: Rng + ?Sized>(&mut self, state: S, rng: &mut R) -> usize {
        let values = self.q_table.values(state);
        self.exploration.choose(values, rng)
    }

    /// Learn from one transition with the Expected SARSA update, then decay epsilon
    ///
    /// Unless [`mask_terminal`](ExpectedSarsaAgentConfig::mask_terminal) is set,
    /// `done` does not change the update.
    ///
    /// **Panics** if `action` is not less than `n_actions`
    pub fn step(&mut self, state: S, action: usize, reward: f32, next_state: S, done: bool) {
        let next_values = self.q_table.values(next_state);
        let next_value: f32 = match self.target {
            TdTarget::Expected => self
                .exploration
                .probabilities(next_values)
                .iter()
                .zip(next_values)
                .map(|(p, q)| p * q)
                .sum(),
            TdTarget::Max => next_values.iter().copied().fold(f32::NEG_INFINITY, f32::max),
        };
        let bootstrap = if done && self.mask_terminal {
            0.0
        } else {
            next_value
        };
        let td_target = reward + self.gamma * bootstrap;

        let q = &mut self.q_table.values_mut(state)[action];
        let old = *q;
        *q = old + self.alpha * (td_target - old);
        trace!(
            "Q[{action}]: {old} -> {} (reward={reward}, target={td_target}, done={done})",
            *q
        );

        self.exploration.decay();
    }

    /// Learn from an [experience](Exp); equivalent to [`step`](Self::step)
    pub fn learn(&mut self, experience: Exp<S>) {
        let Exp {
            state,
            action,
            reward,
            next_state,
            done,
        } = experience;
        self.step(state, action, reward, next_state, done);
    }

    /// Run one episode in the given environment, learning from every transition
    ///
    /// The episode ends when the environment signals `done` or after
    /// `max_steps` transitions, whichever comes first.
    pub fn go<E, R>(&mut self, env: &mut E, rng: &mut R, max_steps: Option<usize>) -> Episode
    where
        E: Environment<State = S>,
        R: Rng + ?Sized,
    {
        let mut episode = Episode::default();
        let mut state = env.reset();
        while !max_steps.is_some_and(|m| episode.steps >= m) {
            let action = self.select_action(state.clone(), rng);
            let (next_state, reward, done) = env.step(action);
            self.step(state, action, reward, next_state.clone(), done);

            episode.reward += reward;
            episode.steps += 1;
            if done {
                episode.done = true;
                break;
            }
            state = next_state;
        }
        episode
    }

    /// The greedy action for a state, without inserting it into the table
    ///
    /// Ties go to the lowest index, so an unseen state yields `0`.
    pub fn greedy_action(&self, state: &S) -> usize {
        self.q_table.get(state).map(argmax).unwrap_or(0)
    }

    /// The greedy action for every state in the table
    pub fn policy(&self) -> HashMap<S, usize> {
        self.q_table
            .iter()
            .map(|(s, values)| (s.clone(), argmax(values)))
            .collect()
    }

    pub fn q_table(&self) -> &QTable<S> {
        &self.q_table
    }

    /// Current exploration probability
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn n_actions(&self) -> usize {
        self.q_table.n_actions()
    }
}
