#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{check_interval, error::ConfigError, error::Result, util::check_half_open};

/// A hyperparameter that decays in place, one step per learning update
pub trait Decay {
    /// Current value
    fn value(&self) -> f32;

    /// Advance the schedule by one update
    fn step(&mut self);
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn value(&self) -> f32 {
        self.value
    }

    fn step(&mut self) {}
}

/// v<sub>t+1</sub> = max(v<sub>t</sub> * r, v<sub>f</sub>), starting from v<sub>0</sub> = v<sub>i</sub>
///
/// Once the floor is reached the value stays there, since `r <= 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMultiplicative"))]
pub struct Multiplicative {
    value: f32,
    rate: f32,
    vf: f32,
}

impl Multiplicative {
    /// Initialize a schedule from a start value, floor, and per-step rate
    ///
    /// **Errors** unless `0 <= end <= start <= 1` and `rate` is in `(0,1]`
    pub fn new(start: f32, end: f32, rate: f32) -> Result<Self> {
        check_interval!(start, 0.0, 1.0)?;
        check_interval!(end, 0.0, 1.0)?;
        if end > start {
            return Err(ConfigError::EpsilonOrder { start, end });
        }
        check_half_open("rate", rate, 0.0, 1.0)?;
        Ok(Self {
            value: start,
            rate,
            vf: end,
        })
    }

    /// The floor of the schedule
    pub fn floor(&self) -> f32 {
        self.vf
    }

    /// The multiplicative factor applied on each step
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

/// Serialized form of [`Multiplicative`]; a restored schedule resumes from `value`
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawMultiplicative {
    value: f32,
    rate: f32,
    vf: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMultiplicative> for Multiplicative {
    type Error = ConfigError;

    fn try_from(raw: RawMultiplicative) -> Result<Self> {
        Self::new(raw.value, raw.vf, raw.rate)
    }
}

impl Decay for Multiplicative {
    fn value(&self) -> f32 {
        self.value
    }

    fn step(&mut self) {
        self.value = (self.value * self.rate).max(self.vf);
    }
}
