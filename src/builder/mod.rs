//! Propagator construction
use std::sync::Arc;

use log::debug;
use nalgebra::Vector3;

use crate::{
    cfg::Config,
    orbit::OrbitState,
    prelude::Error,
    propagation::{EarthGravity, NumericalPropagator, ParameterDriver, ParameterDrivers, Rk4},
};

mod dmc;

pub use dmc::{dmc_parameter_drivers, with_dmc, DmcBuilder, DmcEquations, DMC_ACC_ESTM, DMC_ACC_PROP};

/// DMC capable [NumericalBuilder]
pub type PropagatorBuilder = DmcBuilder<NumericalBuilder>;

/// Cartesian orbital parameter names
pub const ORBITAL_PARAMETERS: [&str; 6] = ["px", "py", "pz", "vx", "vy", "vz"];

/// Propagator build capability: each call returns an independent
/// [NumericalPropagator], ready for one integration run.
pub trait PropagatorBuild {
    /// Builds a [NumericalPropagator] from the normalized values
    /// of the selected parameters: orbital parameters first,
    /// propagation parameters next.
    fn build(&self, normalized: &[f64]) -> Result<NumericalPropagator, Error>;
}

impl<F> PropagatorBuild for F
where
    F: Fn(&[f64]) -> Result<NumericalPropagator, Error>,
{
    fn build(&self, normalized: &[f64]) -> Result<NumericalPropagator, Error> {
        self(normalized)
    }
}

/// [NumericalBuilder] is the base build capability: orbit definition,
/// force models and integrator, no additional state.
#[derive(Clone)]
pub struct NumericalBuilder {
    /// [Config] fixed at construction
    cfg: Config,
    /// Reference [OrbitState]
    orbit: OrbitState,
    /// Cartesian orbital [ParameterDrivers]
    orbital_drivers: ParameterDrivers,
    /// Force model [ParameterDrivers]
    propagation_drivers: ParameterDrivers,
    /// Shared gravity model
    gravity: Arc<EarthGravity>,
}

impl NumericalBuilder {
    /// Creates a new [NumericalBuilder] around reference [OrbitState],
    /// which must be expressed in a geocentric inertial frame.
    pub fn new(cfg: &Config, orbit: OrbitState) -> Result<Self, Error> {
        cfg.validate()?;

        let frame = orbit.frame();
        if !frame.is_inertial() || !frame.is_geocentric() {
            return Err(Error::Configuration(
                "propagation frame must be geocentric inertial",
            ));
        }

        let gravity = Arc::new(EarthGravity::new(cfg.gravity));

        // position scale drives the velocity scale
        let r = orbit.position_m();
        let v = orbit.velocity_m_s();
        let dp = cfg.position_scale_m;
        let dv = if v.norm() > 0.0 {
            gravity.mu_m3_s2() * dp / (v.norm() * r.norm_squared())
        } else {
            dp
        };

        let pos_vel = orbit.to_pos_vel();

        let mut orbital_drivers = ParameterDrivers::default();
        for (i, name) in ORBITAL_PARAMETERS.iter().enumerate() {
            let scale = if i < 3 { dp } else { dv };
            orbital_drivers.add(ParameterDriver::new(name, pos_vel[i], scale).selected());
        }

        Ok(Self {
            orbit,
            gravity,
            orbital_drivers,
            cfg: cfg.clone(),
            propagation_drivers: ParameterDrivers::default(),
        })
    }

    /// Registers a force model [ParameterDriver]
    pub fn add_propagation_driver(&mut self, driver: ParameterDriver) {
        self.propagation_drivers.add(driver);
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Reference [OrbitState]
    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn orbital_drivers(&self) -> &ParameterDrivers {
        &self.orbital_drivers
    }

    pub fn propagation_drivers(&self) -> &ParameterDrivers {
        &self.propagation_drivers
    }

    /// Number of normalized values [PropagatorBuild::build] expects
    pub fn nb_selected(&self) -> usize {
        self.orbital_drivers.nb_selected() + self.propagation_drivers.nb_selected()
    }
}

impl PropagatorBuild for NumericalBuilder {
    fn build(&self, normalized: &[f64]) -> Result<NumericalPropagator, Error> {
        let expected = self.nb_selected();
        if normalized.len() != expected {
            return Err(Error::ParameterDimension {
                expected,
                found: normalized.len(),
            });
        }

        let mut orbital = self.orbital_drivers.clone();
        let remaining = orbital.apply_normalized(normalized)?;

        let mut parameters = self.propagation_drivers.clone();
        parameters.apply_normalized(remaining)?;

        let values = ORBITAL_PARAMETERS
            .iter()
            .map(|name| {
                orbital
                    .value(name)
                    .ok_or_else(|| Error::MissingParameter(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let initial = OrbitState::new(
            self.orbit.epoch(),
            self.orbit.frame(),
            Vector3::new(values[0], values[1], values[2]),
            Vector3::new(values[3], values[4], values[5]),
        );

        debug!("building propagator: {}", initial);

        let mut propagator = NumericalPropagator::new(
            initial,
            Rk4::new(self.cfg.integrator.step_s),
            self.cfg.position_angle,
            parameters,
        );

        propagator.add_force_model(self.gravity.clone());
        Ok(propagator)
    }
}
