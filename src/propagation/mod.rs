//! Numerical orbit propagation
use std::sync::Arc;

use log::debug;
use nalgebra::{DVector, Vector3};

use crate::{
    cfg::PositionAngle,
    orbit::OrbitState,
    prelude::{Epoch, Error},
};

mod equations;
mod forces;
mod integrator;
mod parameters;
mod state;

pub use equations::AdditionalEquations;
pub use forces::{EarthGravity, ForceModel};
pub use integrator::Rk4;
pub use parameters::{ParameterDriver, ParameterDrivers};
pub use state::{AdditionalState, AugmentedState, ORBIT_DIMENSION};

/// [NumericalPropagator] integrates an [AugmentedState] through time.
/// Each instance is meant to be driven by one integration run at a time.
pub struct NumericalPropagator {
    /// Initial [AugmentedState]
    initial: AugmentedState,
    /// [ForceModel]s, summed up
    forces: Vec<Arc<dyn ForceModel>>,
    /// [AdditionalEquations], one per managed block
    equations: Vec<Box<dyn AdditionalEquations>>,
    /// [Rk4] integrator
    integrator: Rk4,
    /// [PositionAngle] of the orbital parameters
    position_angle: PositionAngle,
    /// Resolved parameter set
    parameters: ParameterDrivers,
}

impl NumericalPropagator {
    /// Creates a new [NumericalPropagator] with no force model
    /// and no additional state.
    pub fn new(
        initial: OrbitState,
        integrator: Rk4,
        position_angle: PositionAngle,
        parameters: ParameterDrivers,
    ) -> Self {
        Self {
            integrator,
            parameters,
            position_angle,
            forces: Vec::new(),
            equations: Vec::new(),
            initial: AugmentedState::from(initial),
        }
    }

    /// Adds one [ForceModel]
    pub fn add_force_model(&mut self, force: Arc<dyn ForceModel>) {
        self.forces.push(force);
    }

    /// Attaches [AdditionalEquations]. Their state block must be
    /// part of the initial state before propagating.
    pub fn add_additional_equations(&mut self, equations: Box<dyn AdditionalEquations>) {
        debug!("attaching \"{}\" equations", equations.name());
        self.equations.push(equations);
    }

    /// Names of the blocks managed by attached [AdditionalEquations]
    pub fn managed_states(&self) -> Vec<&str> {
        self.equations.iter().map(|eq| eq.name()).collect()
    }

    pub fn initial_state(&self) -> &AugmentedState {
        &self.initial
    }

    pub fn set_initial_state(&mut self, initial: AugmentedState) {
        self.initial = initial;
    }

    /// State vector dimension
    pub fn dimension(&self) -> usize {
        self.initial.dimension()
    }

    /// Resolved parameter set this propagator was built with
    pub fn parameters(&self) -> &ParameterDrivers {
        &self.parameters
    }

    pub fn position_angle(&self) -> PositionAngle {
        self.position_angle
    }

    /// Computes the flat state derivative at given [AugmentedState].
    pub fn derivatives(&self, state: &AugmentedState) -> Result<DVector<f64>, Error> {
        let mut xdot = DVector::<f64>::zeros(state.dimension());

        let o = state.orbit;
        let r = Vector3::new(o[0], o[1], o[2]);
        let mut velocity = Vector3::new(o[3], o[4], o[5]);

        let mut acceleration = Vector3::<f64>::zeros();
        for force in self.forces.iter() {
            acceleration += force.acceleration(state.epoch, &r, &velocity);
        }

        for eq in self.equations.iter() {
            let name = eq.name();
            let found = state
                .additional_state(name)
                .ok_or_else(|| Error::MissingAdditionalState(name.to_string()))?
                .len();

            if found != eq.dimension() {
                return Err(Error::AdditionalStateDimension {
                    name: name.to_string(),
                    expected: eq.dimension(),
                    found,
                });
            }

            let offset = state
                .additional_offset(name)
                .ok_or_else(|| Error::MissingAdditionalState(name.to_string()))?;

            let pdot = &mut xdot.as_mut_slice()[offset..offset + found];
            let contribution = eq.compute_derivatives(state, pdot)?;

            velocity += Vector3::new(contribution[0], contribution[1], contribution[2]);
            acceleration += Vector3::new(contribution[3], contribution[4], contribution[5]);
        }

        for i in 0..3 {
            xdot[i] = velocity[i];
            xdot[i + 3] = acceleration[i];
        }

        Ok(xdot)
    }

    /// Propagates the initial state to `target` [Epoch], forward or backward.
    pub fn propagate(&self, target: Epoch) -> Result<AugmentedState, Error> {
        debug!(
            "{} - propagating to {} (dim={}, forces={}, equations={})",
            self.initial.epoch,
            target,
            self.dimension(),
            self.forces.len(),
            self.equations.len(),
        );

        let f = |t: Epoch, x: &DVector<f64>| self.derivatives(&self.initial.with_vector(t, x));

        let y = self
            .integrator
            .integrate(self.initial.epoch, self.initial.to_vector(), target, &f)?;

        Ok(self.initial.with_vector(target, &y))
    }
}
