use log::{debug, info};
use rand::Rng;

use crate::{
    algo::{tabular::Hashable, ExpectedSarsaAgent},
    ds::RingBuffer,
    env::Environment,
    error::{ConfigError, Result},
};

/// Configuration for [`interact`]
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Number of episodes to run
    ///
    /// **Default**: `20_000`
    pub num_episodes: usize,
    /// Number of most recent episodes to average over
    ///
    /// **Default**: `100`
    pub window: usize,
    /// Cap on the number of transitions per episode, or `None` to wait for the environment
    ///
    /// **Default**: `None`
    pub max_steps: Option<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            num_episodes: 20_000,
            window: 100,
            max_steps: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Return of every episode, in order
    pub episode_rewards: Vec<f32>,
    /// Sliding-window average return, one entry per episode once the window is full
    pub avg_rewards: Vec<f32>,
    /// Best sliding-window average seen, or `None` if the window never filled
    pub best_avg_reward: Option<f32>,
}

/// Train an agent in an environment for a number of episodes, tracking the
/// average return over a sliding window of recent episodes
///
/// **Errors** if `num_episodes` or `window` is zero
pub fn interact<E, S, R>(
    env: &mut E,
    agent: &mut ExpectedSarsaAgent<S>,
    config: &MonitorConfig,
    rng: &mut R,
) -> Result<Summary>
where
    E: Environment<State = S>,
    S: Hashable,
    R: Rng + ?Sized,
{
    if config.num_episodes == 0 {
        return Err(ConfigError::NoEpisodes);
    }
    if config.window == 0 {
        return Err(ConfigError::EmptyWindow);
    }

    let mut summary = Summary {
        episode_rewards: Vec::with_capacity(config.num_episodes),
        ..Default::default()
    };
    let mut window = RingBuffer::new(config.window);
    let progress_interval = (config.num_episodes / 100).max(1);

    for i in 1..=config.num_episodes {
        let episode = agent.go(env, rng, config.max_steps);
        summary.episode_rewards.push(episode.reward);
        window.push(episode.reward);

        if !window.is_full() {
            continue;
        }
        let Some(avg) = window.mean() else {
            continue;
        };
        summary.avg_rewards.push(avg);

        if summary.best_avg_reward.map_or(true, |best| avg > best) {
            debug!("Episode {i}: new best average reward {avg}");
            summary.best_avg_reward = Some(avg);
        }

        if i % progress_interval == 0 {
            info!(
                "Episode {i}/{}, best average reward {}, epsilon {}",
                config.num_episodes,
                summary.best_avg_reward.unwrap_or(avg),
                agent.epsilon()
            );
        }
    }

    Ok(summary)
}
