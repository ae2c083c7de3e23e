/// An episodic environment with a discrete action space, such as the taxi task.
///
/// Actions are indices in `[0, n)`, where `n` is fixed by the environment and
/// matches the agent's `n_actions`.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Returns** `(next_state, reward, done)`
    fn step(&mut self, action: usize) -> (Self::State, f32, bool);
}

/// Summary of a single episode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Episode {
    /// Sum of the rewards received
    pub reward: f32,
    /// Number of transitions taken
    pub steps: usize,
    /// Whether the environment signalled the end of the episode, as opposed to hitting a step cap
    pub done: bool,
}
