/// Implemented RL algorithms
pub mod algo;

/// Strategies for hyperparameters that decay over training
pub mod decay;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Configuration errors
pub mod error;

/// Exploration policies
pub mod exploration;

/// Transitions
pub mod memory;

/// Episode loop with sliding-window reward tracking
pub mod monitor;

mod util;

pub use algo::{ExpectedSarsaAgent, ExpectedSarsaAgentConfig, QTable, TdTarget};
pub use error::ConfigError;
