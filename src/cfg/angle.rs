use crate::prelude::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Anomaly convention of the orbital parameters,
/// forwarded untouched to the estimation layer.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PositionAngle {
    /// Mean anomaly
    Mean,
    /// Eccentric anomaly
    Eccentric,
    /// True anomaly
    #[default]
    True,
}

impl std::fmt::Display for PositionAngle {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Mean => write!(fmt, "MEAN"),
            Self::Eccentric => write!(fmt, "ECCENTRIC"),
            Self::True => write!(fmt, "TRUE"),
        }
    }
}

impl std::str::FromStr for PositionAngle {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "eccentric" => Ok(Self::Eccentric),
            "true" => Ok(Self::True),
            _ => Err(Error::Configuration("unknown position angle")),
        }
    }
}
