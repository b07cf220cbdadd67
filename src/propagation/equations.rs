use nalgebra::Vector6;

use crate::{prelude::Error, propagation::state::AugmentedState};

/// Derivative equation of an [AdditionalState](crate::propagation::AdditionalState) block.
///
/// Any number of [AdditionalEquations] may be attached to a
/// [NumericalPropagator](crate::prelude::NumericalPropagator): each fills
/// the derivative of its own block and returns its contribution to the
/// orbit derivative, summed by the integrator.
pub trait AdditionalEquations: Send + Sync {
    /// Name of the [AdditionalState](crate::propagation::AdditionalState) block
    fn name(&self) -> &str;

    /// Block dimension
    fn dimension(&self) -> usize;

    /// Computes the block derivative, written into `pdot`
    /// (exactly [Self::dimension] long), and returns the
    /// orbit derivative contribution: components 0..3 add up to the velocity,
    /// components 3..6 add up to the acceleration.
    fn compute_derivatives(
        &self,
        state: &AugmentedState,
        pdot: &mut [f64],
    ) -> Result<Vector6<f64>, Error>;
}
