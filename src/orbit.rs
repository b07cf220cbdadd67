use nalgebra::{Vector3, Vector6};

use crate::{
    frame::FrameTag,
    prelude::{Epoch, Frame, Orbit},
};

/// Timestamped position and velocity, tagged with its reference frame.
/// [OrbitState] serves as propagator initial condition and ephemeris sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    epoch: Epoch,
    frame: FrameTag,
    /// Position (m)
    position_m: Vector3<f64>,
    /// Velocity (m.s⁻¹)
    velocity_m_s: Vector3<f64>,
}

impl std::fmt::Display for OrbitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (r, v) = (self.position_m, self.velocity_m_s);
        write!(
            f,
            "{} ({}) r=({:.3}, {:.3}, {:.3})m v=({:.6}, {:.6}, {:.6})m/s",
            self.epoch, self.frame, r[0], r[1], r[2], v[0], v[1], v[2],
        )
    }
}

impl OrbitState {
    /// Creates a new [OrbitState] from position (m) and velocity (m.s⁻¹)
    pub fn new(
        epoch: Epoch,
        frame: FrameTag,
        position_m: Vector3<f64>,
        velocity_m_s: Vector3<f64>,
    ) -> Self {
        Self {
            epoch,
            frame,
            position_m,
            velocity_m_s,
        }
    }

    /// Creates a new [OrbitState] from stacked position (m) and velocity (m.s⁻¹)
    pub fn from_pos_vel(epoch: Epoch, frame: FrameTag, pos_vel: Vector6<f64>) -> Self {
        Self::new(
            epoch,
            frame,
            Vector3::new(pos_vel[0], pos_vel[1], pos_vel[2]),
            Vector3::new(pos_vel[3], pos_vel[4], pos_vel[5]),
        )
    }

    /// Creates a new [OrbitState] from ANISE [Orbit] (expressed in km)
    pub fn from_orbit(orbit: &Orbit, frame: FrameTag) -> Self {
        let pos_vel_m = orbit.to_cartesian_pos_vel() * 1.0E3;
        Self::from_pos_vel(orbit.epoch, frame, pos_vel_m)
    }

    /// Converts [OrbitState] to ANISE [Orbit] (expressed in km)
    pub fn to_orbit(&self, frame: Frame) -> Orbit {
        let pos_vel_km_s = self.to_pos_vel() / 1.0E3;
        Orbit::from_cartesian_pos_vel(pos_vel_km_s, self.epoch, frame)
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn frame(&self) -> FrameTag {
        self.frame
    }

    /// Position (m)
    pub fn position_m(&self) -> Vector3<f64> {
        self.position_m
    }

    /// Velocity (m.s⁻¹)
    pub fn velocity_m_s(&self) -> Vector3<f64> {
        self.velocity_m_s
    }

    /// Returns position and velocity stacked as [Vector6]
    pub fn to_pos_vel(&self) -> Vector6<f64> {
        let (r, v) = (self.position_m, self.velocity_m_s);
        Vector6::new(r[0], r[1], r[2], v[0], v[1], v[2])
    }
}
