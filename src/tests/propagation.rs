use nalgebra::DVector;
use std::sync::Arc;

use crate::{
    prelude::{
        AdditionalEquations, AugmentedState, Config, Duration, EarthGravity, Error, FrameTag,
        GravityModel, NumericalBuilder, NumericalPropagator, OrbitState, ParameterDrivers,
        PositionAngle, PropagatorBuild, Rk4, Vector6, EARTH_GRAVITATION_MU_M3_S2,
    },
    tests::{init_logger, leo_orbit, reference_epoch},
};

/// Constant acceleration along Z, stored as a 1 dimensional "clock" block
struct Thrust {
    acc_m_s2: f64,
}

impl AdditionalEquations for Thrust {
    fn name(&self) -> &str {
        "thrust_time"
    }

    fn dimension(&self) -> usize {
        1
    }

    fn compute_derivatives(
        &self,
        _: &AugmentedState,
        pdot: &mut [f64],
    ) -> Result<Vector6<f64>, Error> {
        pdot[0] = 1.0;
        Ok(Vector6::new(0.0, 0.0, 0.0, 0.0, 0.0, self.acc_m_s2))
    }
}

fn keplerian_propagator(orbit: OrbitState) -> NumericalPropagator {
    let cfg = Config::default()
        .with_gravity(GravityModel::PointMass)
        .with_step(10.0);

    NumericalBuilder::new(&cfg, orbit)
        .unwrap()
        .build(&[0.0; 6])
        .unwrap()
}

#[test]
fn augmented_state_layout() {
    let state = AugmentedState::from(leo_orbit(reference_epoch(), FrameTag::GCRF))
        .with_additional_state("a", vec![1.0, 2.0])
        .with_additional_state("b", vec![3.0, 4.0, 5.0]);

    assert_eq!(state.dimension(), 11);
    assert_eq!(state.additional_offset("a"), Some(6));
    assert_eq!(state.additional_offset("b"), Some(8));
    assert_eq!(state.additional_offset("c"), None);

    let x = state.to_vector();
    assert_eq!(x.len(), 11);
    assert_eq!(x[6], 1.0);
    assert_eq!(x[10], 5.0);

    // replaced in place
    let replaced = state.with_additional_state("a", vec![-1.0, -2.0]);
    assert_eq!(replaced.additional_offset("b"), Some(8));
    assert_eq!(replaced.additional_state("a"), Some(&[-1.0, -2.0][..]));

    let names = replaced
        .additional_states()
        .map(|block| block.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["a", "b"]);

    let t1 = reference_epoch() + Duration::from_seconds(1.0);
    let y = DVector::from_iterator(11, (0..11).map(|i| i as f64));
    let rebuilt = state.with_vector(t1, &y);

    assert_eq!(rebuilt.epoch, t1);
    assert_eq!(rebuilt.orbit, Vector6::new(0.0, 1.0, 2.0, 3.0, 4.0, 5.0));
    assert_eq!(rebuilt.additional_state("a"), Some(&[6.0, 7.0][..]));
    assert_eq!(rebuilt.additional_state("b"), Some(&[8.0, 9.0, 10.0][..]));
    assert_eq!(rebuilt.to_vector(), y);
}

#[test]
fn circular_orbit_is_preserved() {
    init_logger();

    let orbit = leo_orbit(reference_epoch(), FrameTag::GCRF);
    let propagator = keplerian_propagator(orbit);

    assert_eq!(propagator.dimension(), 6);
    assert_eq!(propagator.position_angle(), PositionAngle::True);

    let r0 = orbit.position_m().norm();
    let period_s = 2.0 * std::f64::consts::PI * (r0.powi(3) / EARTH_GRAVITATION_MU_M3_S2).sqrt();

    for fraction in [0.25, 0.5, 1.0] {
        let t = reference_epoch() + Duration::from_seconds(period_s * fraction);
        let state = propagator.propagate(t).unwrap();

        assert_eq!(state.epoch, t);

        let r = state.orbit_state().position_m().norm();
        assert!((r - r0).abs() < 1.0, "radius drift {}m", r - r0);
    }

    // one full revolution
    let t = reference_epoch() + Duration::from_seconds(period_s);
    let state = propagator.propagate(t).unwrap().orbit_state();
    assert!((state.position_m() - orbit.position_m()).norm() < 10.0);
}

#[test]
fn forward_backward() {
    init_logger();

    let orbit = leo_orbit(reference_epoch(), FrameTag::GCRF);
    let forward = keplerian_propagator(orbit);

    let t1 = reference_epoch() + Duration::from_seconds(625.0);
    let state = forward.propagate(t1).unwrap();

    let mut backward = keplerian_propagator(orbit);
    backward.set_initial_state(state);

    let back = backward.propagate(reference_epoch()).unwrap();
    let dr = back.orbit_state().position_m() - orbit.position_m();
    assert!(dr.norm() < 1.0E-3);
}

#[test]
fn additional_equations_contribute() {
    init_logger();

    let orbit = leo_orbit(reference_epoch(), FrameTag::GCRF);
    let nominal = keplerian_propagator(orbit);

    let mut thrusted = keplerian_propagator(orbit);
    thrusted.add_additional_equations(Box::new(Thrust { acc_m_s2: 2.0E-3 }));

    let t1 = reference_epoch() + Duration::from_seconds(30.0);

    // block not declared yet
    assert!(matches!(
        thrusted.propagate(t1),
        Err(Error::MissingAdditionalState(_))
    ));

    // invalid block dimension
    let initial = thrusted.initial_state().clone();
    thrusted.set_initial_state(initial.with_additional_state("thrust_time", vec![0.0, 0.0]));
    assert!(matches!(
        thrusted.propagate(t1),
        Err(Error::AdditionalStateDimension { .. })
    ));

    thrusted.set_initial_state(initial.with_additional_state("thrust_time", vec![0.0]));

    let state = thrusted.propagate(t1).unwrap();
    let reference = nominal.propagate(t1).unwrap();

    let thrust_time = state.additional_state("thrust_time").unwrap();
    assert!((thrust_time[0] - 30.0).abs() < 1.0E-9);

    let dz = state.orbit[2] - reference.orbit[2];
    assert!((dz - 0.9).abs() < 0.01, "dz={}", dz);
}

#[test]
fn unmanaged_blocks_stay_constant() {
    let orbit = leo_orbit(reference_epoch(), FrameTag::GCRF);
    let mut propagator = keplerian_propagator(orbit);

    let initial = propagator
        .initial_state()
        .with_additional_state("mass", vec![500.0]);

    propagator.set_initial_state(initial);
    assert_eq!(propagator.dimension(), 7);
    assert!(propagator.managed_states().is_empty());

    let state = propagator
        .propagate(reference_epoch() + Duration::from_seconds(120.0))
        .unwrap();

    assert_eq!(state.additional_state("mass"), Some(&[500.0][..]));
}

#[test]
fn manual_assembly() {
    let orbit = leo_orbit(reference_epoch(), FrameTag::EME2000);

    let mut propagator = NumericalPropagator::new(
        orbit,
        Rk4::new(10.0),
        PositionAngle::Mean,
        ParameterDrivers::default(),
    );

    // no force model: uniform motion
    let t1 = reference_epoch() + Duration::from_seconds(100.0);
    let state = propagator.propagate(t1).unwrap().orbit_state();
    let expected = orbit.position_m() + orbit.velocity_m_s() * 100.0;
    assert!((state.position_m() - expected).norm() < 1.0E-6);
    assert_eq!(state.frame(), FrameTag::EME2000);

    propagator.add_force_model(Arc::new(EarthGravity::new(GravityModel::J2)));
    let state = propagator.propagate(t1).unwrap().orbit_state();
    assert!((state.position_m() - expected).norm() > 1.0);
}
