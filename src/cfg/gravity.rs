#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Central body gravity fidelity
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GravityModel {
    /// Keplerian motion: a = -μ/r³ r
    PointMass,
    /// Point mass and J2 (oblateness) perturbation
    #[default]
    J2,
}
