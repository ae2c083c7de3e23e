use thiserror::Error;

/// Rejected hyperparameters for an agent, decay schedule, or monitor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The action space must contain at least one action
    #[error("Invalid value for `n_actions`. There must be at least one action.")]
    NoActions,

    /// A value fell outside its closed interval
    #[error("Invalid value for `{name}`: {value}. Must be in the interval [{low}, {high}].")]
    OutOfInterval {
        name: &'static str,
        value: f32,
        low: f32,
        high: f32,
    },

    /// A value fell outside its half-open interval `(low, high]`
    #[error("Invalid value for `{name}`: {value}. Must be in the interval ({low}, {high}].")]
    OutOfHalfOpenInterval {
        name: &'static str,
        value: f32,
        low: f32,
        high: f32,
    },

    /// The exploration floor lies above its starting value
    #[error("Epsilon end value ({end}) must not exceed the start value ({start}).")]
    EpsilonOrder { start: f32, end: f32 },

    /// A value that must be finite and non-negative was not
    #[error("Invalid value for `{name}`: {value}. Must be finite and non-negative.")]
    Negative { name: &'static str, value: f32 },

    /// A stored row of action values does not have one value per action
    #[error("Action value row has length {actual}, expected {expected}.")]
    RowLength { expected: usize, actual: usize },

    /// A sliding window needs room for at least one episode
    #[error("The averaging window must hold at least one episode.")]
    EmptyWindow,

    /// There must be at least one episode to run
    #[error("The number of episodes must be positive.")]
    NoEpisodes,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
