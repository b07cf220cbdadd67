//! Reference frames
use std::f64::consts::TAU;

use anise::{
    constants::frames::{EARTH_ITRF93, EARTH_J2000, SSB_J2000},
    prelude::{Almanac, Frame},
};

use log::debug;
use nalgebra::{Rotation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{EARTH_ANGULAR_VEL_RAD, ERA_J2000_REV, ERA_RATE_REV_DAY},
    orbit::OrbitState,
    prelude::{Epoch, Error},
    time::ut1_days_since_j2000,
};

/// Supported reference frames. Identifiers exchanged with
/// the surrounding services are resolved with [FrameTag::from_str](std::str::FromStr).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameTag {
    /// Geocentric Celestial Reference Frame
    GCRF,
    /// Mean equator and equinox of J2000
    EME2000,
    /// International Celestial Reference Frame, centered on the
    /// solar system barycenter
    ICRF,
    /// International Terrestrial Reference Frame (Earth fixed)
    ITRF,
}

impl std::fmt::Display for FrameTag {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::GCRF => write!(fmt, "GCRF"),
            Self::EME2000 => write!(fmt, "EME2000"),
            Self::ICRF => write!(fmt, "ICRF"),
            Self::ITRF => write!(fmt, "ITRF"),
        }
    }
}

impl std::str::FromStr for FrameTag {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GCRF" => Ok(Self::GCRF),
            "EME2000" | "J2000" => Ok(Self::EME2000),
            "ICRF" => Ok(Self::ICRF),
            "ITRF" | "ECEF" | "ITRF_CIO_CONV_2010_SIMPLE_EOP" => Ok(Self::ITRF),
            _ => Err(Error::UnknownFrame(s.to_string())),
        }
    }
}

impl FrameTag {
    /// Returns true for the non rotating frames.
    pub fn is_inertial(&self) -> bool {
        !matches!(self, Self::ITRF)
    }

    /// Returns true for the frames centered on the Earth.
    pub fn is_geocentric(&self) -> bool {
        !matches!(self, Self::ICRF)
    }

    /// Returns the ANISE [Frame] this tag designates.
    pub fn to_anise_frame(&self) -> Frame {
        match self {
            Self::GCRF | Self::EME2000 => EARTH_J2000,
            Self::ICRF => SSB_J2000,
            Self::ITRF => EARTH_ITRF93,
        }
    }
}

/// Any frame conversion provider should implement [FrameTransform].
pub trait FrameTransform {
    /// Expresses [OrbitState] in the requested frame, at the same [Epoch].
    fn transform(&self, state: &OrbitState, to: FrameTag) -> Result<OrbitState, Error>;
}

/// Built-in [FrameTransform]: the geocentric inertial frames are considered identical
/// (sub-milliarcsecond biases are neglected) and the Earth fixed frame
/// rotates at constant rate around the celestial pole.
/// Precession, nutation and polar motion are not modeled. Neither is the
/// Earth orbit, so the barycentric [FrameTag::ICRF] is only reachable
/// from itself: use [AlmanacTransform] otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct EarthRotation;

impl EarthRotation {
    /// Earth rotation angle (rad) at this [Epoch]
    pub fn rotation_angle_rad(&self, t: Epoch) -> f64 {
        let revolutions = ERA_J2000_REV + ERA_RATE_REV_DAY * ut1_days_since_j2000(t);
        revolutions.rem_euclid(1.0) * TAU
    }

    fn to_fixed(&self, state: &OrbitState) -> (Vector3<f64>, Vector3<f64>) {
        let era = self.rotation_angle_rad(state.epoch());
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), -era);
        let omega = Vector3::new(0.0, 0.0, EARTH_ANGULAR_VEL_RAD);

        let r = rot * state.position_m();
        let v = rot * state.velocity_m_s() - omega.cross(&r);
        (r, v)
    }

    fn to_inertial(&self, state: &OrbitState) -> (Vector3<f64>, Vector3<f64>) {
        let era = self.rotation_angle_rad(state.epoch());
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), era);
        let omega = Vector3::new(0.0, 0.0, EARTH_ANGULAR_VEL_RAD);

        let r = state.position_m();
        let v = rot * (state.velocity_m_s() + omega.cross(&r));
        (rot * r, v)
    }
}

impl FrameTransform for EarthRotation {
    fn transform(&self, state: &OrbitState, to: FrameTag) -> Result<OrbitState, Error> {
        let from = state.frame();
        if from != to && !(from.is_geocentric() && to.is_geocentric()) {
            return Err(Error::UnsupportedTransform { from, to });
        }

        let (r, v) = match (from.is_inertial(), to.is_inertial()) {
            (true, false) => self.to_fixed(state),
            (false, true) => self.to_inertial(state),
            _ => (state.position_m(), state.velocity_m_s()),
        };
        Ok(OrbitState::new(state.epoch(), to, r, v))
    }
}

/// [FrameTransform] backed by an ANISE [Almanac].
/// The [Almanac] must provide the Earth orientation kernels
/// when the Earth fixed frame is involved.
pub struct AlmanacTransform {
    almanac: Almanac,
}

impl AlmanacTransform {
    /// Creates a new [AlmanacTransform] from loaded [Almanac]
    pub fn new(almanac: Almanac) -> Self {
        Self { almanac }
    }
}

impl FrameTransform for AlmanacTransform {
    fn transform(&self, state: &OrbitState, to: FrameTag) -> Result<OrbitState, Error> {
        let orbit = state.to_orbit(state.frame().to_anise_frame());

        debug!(
            "{} - almanac transform {} -> {}",
            state.epoch(),
            state.frame(),
            to
        );

        let transformed = self
            .almanac
            .transform_to(orbit, to.to_anise_frame(), None)
            .map_err(Error::Almanac)?;

        Ok(OrbitState::from_orbit(&transformed, to))
    }
}
