#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Duration, Error};

mod angle;
mod gravity;

pub use angle::PositionAngle;
pub use gravity::GravityModel;

fn default_corr_time() -> f64 {
    0.0
}

fn default_sigma_pert() -> f64 {
    0.0
}

fn default_position_scale() -> f64 {
    10.0
}

fn default_step() -> f64 {
    30.0
}

/// Dynamic Model Compensation settings.
/// DMC is only enabled when both the correlation time
/// and the process noise are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DmcConfig {
    /// Correlation time τ (s)
    #[cfg_attr(feature = "serde", serde(default = "default_corr_time"))]
    pub corr_time_s: f64,
    /// Process noise σ (m.s⁻²), consumed by the estimation filter
    #[cfg_attr(feature = "serde", serde(default = "default_sigma_pert"))]
    pub sigma_pert: f64,
}

impl Default for DmcConfig {
    fn default() -> Self {
        Self {
            corr_time_s: default_corr_time(),
            sigma_pert: default_sigma_pert(),
        }
    }
}

impl DmcConfig {
    /// Creates a new [DmcConfig]
    pub fn new(corr_time_s: f64, sigma_pert: f64) -> Self {
        Self {
            corr_time_s,
            sigma_pert,
        }
    }

    /// Returns true if both τ and σ are strictly positive.
    /// Partial settings fall back to the uncompensated model.
    pub fn enabled(&self) -> bool {
        self.corr_time_s > 0.0 && self.sigma_pert > 0.0
    }

    /// Returns true if only one of τ and σ is strictly positive,
    /// in which case DMC is disabled.
    pub fn is_partial(&self) -> bool {
        (self.corr_time_s > 0.0) != (self.sigma_pert > 0.0)
    }
}

/// Numerical integration settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegratorConfig {
    /// Fixed integration step (s)
    #[cfg_attr(feature = "serde", serde(default = "default_step"))]
    pub step_s: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            step_s: default_step(),
        }
    }
}

/// Propagator [Config]uration, fixed once the builder is created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// [DmcConfig]
    #[cfg_attr(feature = "serde", serde(default))]
    pub dmc: DmcConfig,
    /// [PositionAngle] convention of the orbital parameters
    #[cfg_attr(feature = "serde", serde(default))]
    pub position_angle: PositionAngle,
    /// Position error scale (m), used to normalize the orbital parameters
    #[cfg_attr(feature = "serde", serde(default = "default_position_scale"))]
    pub position_scale_m: f64,
    /// [IntegratorConfig]
    #[cfg_attr(feature = "serde", serde(default))]
    pub integrator: IntegratorConfig,
    /// [GravityModel]
    #[cfg_attr(feature = "serde", serde(default))]
    pub gravity: GravityModel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dmc: DmcConfig::default(),
            position_angle: PositionAngle::default(),
            position_scale_m: default_position_scale(),
            integrator: IntegratorConfig::default(),
            gravity: GravityModel::default(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with updated [DmcConfig]
    pub fn with_dmc(&self, corr_time_s: f64, sigma_pert: f64) -> Self {
        let mut s = self.clone();
        s.dmc = DmcConfig::new(corr_time_s, sigma_pert);
        s
    }

    /// Copies and returns [Config] with updated integration step
    pub fn with_step(&self, step_s: f64) -> Self {
        let mut s = self.clone();
        s.integrator.step_s = step_s;
        s
    }

    /// Copies and returns [Config] with updated [GravityModel]
    pub fn with_gravity(&self, gravity: GravityModel) -> Self {
        let mut s = self.clone();
        s.gravity = gravity;
        s
    }

    /// Verifies numerical settings.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.integrator.step_s.is_finite() || self.integrator.step_s <= 0.0 {
            return Err(Error::Configuration("integration step must be positive"));
        }
        // steps are counted in nanoseconds
        if Duration::from_seconds(self.integrator.step_s) <= Duration::ZERO {
            return Err(Error::Configuration("integration step below 1ns"));
        }
        if !self.position_scale_m.is_finite() || self.position_scale_m <= 0.0 {
            return Err(Error::Configuration("position scale must be positive"));
        }
        Ok(())
    }
}
