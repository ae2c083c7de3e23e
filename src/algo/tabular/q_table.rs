use std::collections::{hash_map, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Hashable;
#[cfg(feature = "serde")]
use crate::error::ConfigError;

/// A table of action values, one vector of length `n_actions` per state
///
/// States are inserted lazily with an all-zero vector the first time they are
/// looked up through [`values`](QTable::values) or
/// [`values_mut`](QTable::values_mut), and are never removed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawQTable<S>",
        bound(
            serialize = "S: Serialize + Hashable",
            deserialize = "S: Deserialize<'de> + Hashable"
        )
    )
)]
pub struct QTable<S: Hashable> {
    table: HashMap<S, Vec<f32>>,
    n_actions: usize,
}

/// Serialized form of [`QTable`]; every row must hold `n_actions` values
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Hashable"))]
struct RawQTable<S: Hashable> {
    table: HashMap<S, Vec<f32>>,
    n_actions: usize,
}

#[cfg(feature = "serde")]
impl<S: Hashable> TryFrom<RawQTable<S>> for QTable<S> {
    type Error = ConfigError;

    fn try_from(raw: RawQTable<S>) -> Result<Self, ConfigError> {
        let RawQTable { table, n_actions } = raw;
        if n_actions == 0 {
            return Err(ConfigError::NoActions);
        }
        if let Some(row) = table.values().find(|row| row.len() != n_actions) {
            return Err(ConfigError::RowLength {
                expected: n_actions,
                actual: row.len(),
            });
        }
        Ok(Self { table, n_actions })
    }
}

impl<S: Hashable> QTable<S> {
    pub fn new(n_actions: usize) -> Self {
        Self {
            table: HashMap::new(),
            n_actions,
        }
    }

    /// Length of every value vector
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Number of states with an entry
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.table.contains_key(state)
    }

    /// Look up the action values for a state without inserting it
    pub fn get(&self, state: &S) -> Option<&[f32]> {
        self.table.get(state).map(Vec::as_slice)
    }

    /// Action values for a state, inserting a zero vector if the state is new
    pub fn values(&mut self, state: S) -> &[f32] {
        self.values_mut(state)
    }

    /// Mutable action values for a state, inserting a zero vector if the state is new
    pub fn values_mut(&mut self, state: S) -> &mut [f32] {
        let n = self.n_actions;
        self.table.entry(state).or_insert_with(|| vec![0.0; n])
    }

    /// Iterate over every `(state, values)` entry in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[f32])> {
        self.table.iter().map(|(s, v)| (s, v.as_slice()))
    }
}

impl<'a, S: Hashable> IntoIterator for &'a QTable<S> {
    type Item = (&'a S, &'a Vec<f32>);
    type IntoIter = hash_map::Iter<'a, S, Vec<f32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}
