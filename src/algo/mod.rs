pub mod tabular;

pub use tabular::expected_sarsa::{ExpectedSarsaAgent, ExpectedSarsaAgentConfig, TdTarget};
pub use tabular::q_table::QTable;
