#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod builder;
mod cfg;
mod constants;
mod ephemeris;
mod error;
mod frame;
mod orbit;
mod propagation;
mod service;
mod time;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::builder::{
        dmc_parameter_drivers, with_dmc, DmcBuilder, DmcEquations, NumericalBuilder,
        PropagatorBuild, PropagatorBuilder, DMC_ACC_ESTM, DMC_ACC_PROP, ORBITAL_PARAMETERS,
    };
    pub use crate::cfg::{Config, DmcConfig, GravityModel, IntegratorConfig, PositionAngle};
    pub use crate::constants::{
        EARTH_ANGULAR_VEL_RAD, EARTH_EQUATORIAL_RADIUS_M, EARTH_GRAVITATION_MU_M3_S2, EARTH_J2,
    };
    pub use crate::ephemeris::{resample, Ephemeris, InterpolationRequest};
    pub use crate::error::Error;
    pub use crate::frame::{AlmanacTransform, EarthRotation, FrameTag, FrameTransform};
    pub use crate::orbit::OrbitState;
    pub use crate::propagation::{
        AdditionalEquations, AdditionalState, AugmentedState, EarthGravity, ForceModel,
        NumericalPropagator, ParameterDriver, ParameterDrivers, Rk4, ORBIT_DIMENSION,
    };
    pub use crate::service::{interpolate_ephemeris, InterpolateEphemerisInput, Measurement};
    pub use crate::time::{epoch_from_j2000_seconds, j2000_epoch, j2000_seconds};
    // re-export
    pub use anise::prelude::{Almanac, Frame, Orbit};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::{Vector3, Vector6};
}

// pub export
pub use error::Error;
