//! Dynamic Model Compensation
use log::{debug, warn};
use nalgebra::Vector6;

use crate::{
    builder::{NumericalBuilder, PropagatorBuild},
    cfg::{Config, DmcConfig},
    orbit::OrbitState,
    prelude::Error,
    propagation::{AdditionalEquations, AugmentedState, NumericalPropagator, ParameterDriver},
};

/// Name of the DMC [AdditionalState](crate::propagation::AdditionalState) block
pub const DMC_ACC_PROP: &str = "dmc_acc";

/// Names of the estimated initial DMC accelerations, one per axis
pub const DMC_ACC_ESTM: [&str; 3] = ["dmc_acc_x", "dmc_acc_y", "dmc_acc_z"];

/// Builds the three selected [ParameterDriver]s seeding the DMC state,
/// to be registered as propagation parameters.
pub fn dmc_parameter_drivers(initial_acc_m_s2: [f64; 3], scale: f64) -> Vec<ParameterDriver> {
    DMC_ACC_ESTM
        .iter()
        .zip(initial_acc_m_s2)
        .map(|(name, acc)| ParameterDriver::new(name, acc, scale).selected())
        .collect()
}

/// Unmodeled acceleration, modeled on each axis as a first order
/// Gauss-Markov process of correlation time τ. Only the drift term
/// `d(acc)/dt = -acc/τ` is integrated, the stochastic forcing
/// being applied by the estimation filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmcEquations {
    corr_time_s: f64,
    sigma_pert: f64,
    enabled: bool,
}

impl DmcEquations {
    /// Creates new [DmcEquations]. They stay disabled unless `enabled`
    /// is set and [DmcConfig] is complete.
    pub fn new(cfg: &DmcConfig, enabled: bool) -> Self {
        Self {
            corr_time_s: cfg.corr_time_s,
            sigma_pert: cfg.sigma_pert,
            enabled: enabled && cfg.enabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Discrete state transition over `dt_s`: exp(-|dt|/τ)
    pub fn state_transition(&self, dt_s: f64) -> f64 {
        if self.enabled {
            (-dt_s.abs() / self.corr_time_s).exp()
        } else {
            0.0
        }
    }

    /// Discrete process noise variance accumulated over `dt_s`,
    /// σ being the steady state deviation: σ² (1 - exp(-2|dt|/τ))
    pub fn process_noise(&self, dt_s: f64) -> f64 {
        if self.enabled {
            self.sigma_pert.powi(2) * (1.0 - (-2.0 * dt_s.abs() / self.corr_time_s).exp())
        } else {
            0.0
        }
    }
}

impl AdditionalEquations for DmcEquations {
    fn name(&self) -> &str {
        DMC_ACC_PROP
    }

    fn dimension(&self) -> usize {
        3
    }

    fn compute_derivatives(
        &self,
        state: &AugmentedState,
        pdot: &mut [f64],
    ) -> Result<Vector6<f64>, Error> {
        let mut acc_eci = Vector6::<f64>::zeros();

        if !self.enabled {
            for p in pdot.iter_mut().take(3) {
                *p = 0.0;
            }
            return Ok(acc_eci);
        }

        assert!(
            self.corr_time_s > 0.0,
            "internal error: dmc correlation time must be positive"
        );

        let acc = state
            .additional_state(DMC_ACC_PROP)
            .ok_or_else(|| Error::MissingAdditionalState(DMC_ACC_PROP.to_string()))?;

        for i in 0..3 {
            acc_eci[i + 3] = acc[i];
            pdot[i] = -acc[i] / self.corr_time_s;
        }

        Ok(acc_eci)
    }
}

/// Decorates a base [PropagatorBuild] capability with DMC.
pub struct DmcBuilder<B: PropagatorBuild> {
    /// Base build capability
    base: B,
    /// [DmcConfig] fixed at construction
    dmc: DmcConfig,
    /// Derivative switch, fixed at construction
    enabled: bool,
}

/// Returns the DMC augmented build capability of `base`.
/// The DMC state is attached when [DmcConfig] is complete (τ > 0 and σ > 0),
/// while `enabled` gates its derivative.
pub fn with_dmc<B: PropagatorBuild>(base: B, dmc: DmcConfig, enabled: bool) -> DmcBuilder<B> {
    if dmc.is_partial() {
        warn!(
            "partial dmc settings (tau={}s, sigma={}): dmc disabled",
            dmc.corr_time_s, dmc.sigma_pert
        );
    }
    DmcBuilder { base, dmc, enabled }
}

impl<B: PropagatorBuild> DmcBuilder<B> {
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Mutable access to the base capability, to register parameters
    pub fn base_mut(&mut self) -> &mut B {
        &mut self.base
    }

    pub fn dmc_config(&self) -> &DmcConfig {
        &self.dmc
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl DmcBuilder<NumericalBuilder> {
    /// Creates a DMC capable builder around a [NumericalBuilder]
    pub fn new(cfg: &Config, orbit: OrbitState, enabled: bool) -> Result<Self, Error> {
        let base = NumericalBuilder::new(cfg, orbit)?;
        Ok(with_dmc(base, cfg.dmc, enabled))
    }
}

impl<B: PropagatorBuild> PropagatorBuild for DmcBuilder<B> {
    fn build(&self, normalized: &[f64]) -> Result<NumericalPropagator, Error> {
        let mut propagator = self.base.build(normalized)?;

        if !self.dmc.enabled() {
            return Ok(propagator);
        }

        let acc = DMC_ACC_ESTM
            .iter()
            .map(|name| {
                propagator
                    .parameters()
                    .value(name)
                    .ok_or_else(|| Error::MissingParameter(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "dmc: tau={}s sigma={} initial=({:.6E}, {:.6E}, {:.6E})",
            self.dmc.corr_time_s, self.dmc.sigma_pert, acc[0], acc[1], acc[2]
        );

        propagator.add_additional_equations(Box::new(DmcEquations::new(&self.dmc, self.enabled)));

        let initial = propagator
            .initial_state()
            .with_additional_state(DMC_ACC_PROP, acc);

        propagator.set_initial_state(initial);
        Ok(propagator)
    }
}
