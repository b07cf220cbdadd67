use nalgebra::Vector3;

use crate::{
    cfg::GravityModel,
    constants::{EARTH_EQUATORIAL_RADIUS_M, EARTH_GRAVITATION_MU_M3_S2, EARTH_J2},
    prelude::Epoch,
};

/// Force models contributing to the orbit acceleration.
/// Accelerations are expressed in the (inertial) propagation frame.
pub trait ForceModel: Send + Sync {
    /// Acceleration (m.s⁻²) at given position (m) and velocity (m.s⁻¹)
    fn acceleration(
        &self,
        epoch: Epoch,
        position_m: &Vector3<f64>,
        velocity_m_s: &Vector3<f64>,
    ) -> Vector3<f64>;

    /// Model name, for logging purposes
    fn name(&self) -> &'static str;
}

/// Earth gravity field, truncated to the selected [GravityModel]
#[derive(Debug, Clone, Copy)]
pub struct EarthGravity {
    model: GravityModel,
    mu_m3_s2: f64,
}

impl EarthGravity {
    /// Creates new [EarthGravity] using EGM96 constants
    pub fn new(model: GravityModel) -> Self {
        Self {
            model,
            mu_m3_s2: EARTH_GRAVITATION_MU_M3_S2,
        }
    }

    /// Central attraction coefficient (m^3 s-2)
    pub fn mu_m3_s2(&self) -> f64 {
        self.mu_m3_s2
    }

    fn j2_acceleration(&self, r: &Vector3<f64>) -> Vector3<f64> {
        let r2 = r.norm_squared();
        let r_norm = r2.sqrt();
        let z2_r2 = r[2] * r[2] / r2;

        let k = -1.5 * EARTH_J2 * self.mu_m3_s2 * EARTH_EQUATORIAL_RADIUS_M.powi(2)
            / (r2 * r2 * r_norm);

        Vector3::new(
            k * r[0] * (1.0 - 5.0 * z2_r2),
            k * r[1] * (1.0 - 5.0 * z2_r2),
            k * r[2] * (3.0 - 5.0 * z2_r2),
        )
    }
}

impl ForceModel for EarthGravity {
    fn acceleration(&self, _: Epoch, position_m: &Vector3<f64>, _: &Vector3<f64>) -> Vector3<f64> {
        let r = position_m.norm();
        let keplerian = position_m * (-self.mu_m3_s2 / r.powi(3));

        match self.model {
            GravityModel::PointMass => keplerian,
            GravityModel::J2 => keplerian + self.j2_acceleration(position_m),
        }
    }

    fn name(&self) -> &'static str {
        match self.model {
            GravityModel::PointMass => "point-mass",
            GravityModel::J2 => "j2",
        }
    }
}

#[cfg(test)]
mod test {
    use super::{EarthGravity, ForceModel};
    use crate::{cfg::GravityModel, constants::EARTH_GRAVITATION_MU_M3_S2, prelude::Epoch};
    use nalgebra::Vector3;

    #[test]
    fn point_mass_magnitude() {
        let gravity = EarthGravity::new(GravityModel::PointMass);
        let r = Vector3::new(7000.0E3, 0.0, 0.0);
        let acc = gravity.acceleration(Epoch::default(), &r, &Vector3::zeros());

        let expected = EARTH_GRAVITATION_MU_M3_S2 / 7000.0E3_f64.powi(2);
        assert!((acc.norm() - expected).abs() < 1.0E-12);
        assert!(acc[0] < 0.0);
    }

    #[test]
    fn j2_perturbation() {
        let point_mass = EarthGravity::new(GravityModel::PointMass);
        let j2 = EarthGravity::new(GravityModel::J2);

        // equatorial: J2 strengthens radial attraction
        let r = Vector3::new(7000.0E3, 0.0, 0.0);
        let a0 = point_mass.acceleration(Epoch::default(), &r, &Vector3::zeros());
        let a1 = j2.acceleration(Epoch::default(), &r, &Vector3::zeros());
        assert!(a1[0] < a0[0]);
        assert!(((a1 - a0).norm() / a0.norm()) < 2.0E-3);

        // polar: J2 weakens it
        let r = Vector3::new(0.0, 0.0, 7000.0E3);
        let a0 = point_mass.acceleration(Epoch::default(), &r, &Vector3::zeros());
        let a1 = j2.acceleration(Epoch::default(), &r, &Vector3::zeros());
        assert!(a1[2] > a0[2]);
    }
}
