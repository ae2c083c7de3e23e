/// Represents a single experience or transition in the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Exp<S> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: usize,
    /// The reward received after taking the action
    pub reward: f32,
    /// The state of the environment after the action is taken
    pub next_state: S,
    /// Whether the episode ended with this transition
    pub done: bool,
}

impl<S> Exp<S> {
    pub fn new(state: S, action: usize, reward: f32, next_state: S, done: bool) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
            done,
        }
    }
}

impl<S> From<(S, usize, f32, S, bool)> for Exp<S> {
    fn from((state, action, reward, next_state, done): (S, usize, f32, S, bool)) -> Self {
        Self::new(state, action, reward, next_state, done)
    }
}
