mod propagation;

use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{
    Config, Duration, Epoch, FrameTag, GravityModel, NumericalBuilder, OrbitState,
    PropagatorBuild, Vector3, EARTH_GRAVITATION_MU_M3_S2,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Reference epoch of all tests
pub fn reference_epoch() -> Epoch {
    crate::prelude::epoch_from_j2000_seconds(7.0E8)
}

/// Circular, inclined LEO at 7000km
pub fn leo_orbit(t0: Epoch, frame: FrameTag) -> OrbitState {
    let r = 7000.0E3;
    let v = (EARTH_GRAVITATION_MU_M3_S2 / r).sqrt();
    let inc = 51.6_f64.to_radians();
    OrbitState::new(
        t0,
        frame,
        Vector3::new(r, 0.0, 0.0),
        Vector3::new(0.0, v * inc.cos(), v * inc.sin()),
    )
}

/// Keplerian trajectory, sampled every `period_s` seconds
pub fn keplerian_samples(t0: Epoch, nb_samples: usize, period_s: f64) -> Vec<OrbitState> {
    let cfg = Config::default()
        .with_gravity(GravityModel::PointMass)
        .with_step(10.0);

    let builder = NumericalBuilder::new(&cfg, leo_orbit(t0, FrameTag::GCRF)).unwrap();
    let propagator = builder.build(&[0.0; 6]).unwrap();

    (0..nb_samples)
        .map(|i| {
            let t = t0 + Duration::from_seconds(period_s * i as f64);
            propagator.propagate(t).unwrap().orbit_state()
        })
        .collect()
}

/// Uniform rectilinear motion, sampled at given offsets (s)
pub fn linear_samples(t0: Epoch, frame: FrameTag, offsets_s: &[f64]) -> Vec<OrbitState> {
    let r0 = Vector3::new(6800.0E3, -1200.0E3, 300.0E3);
    let v = Vector3::new(-1.5E3, 7.1E3, 0.4E3);
    offsets_s
        .iter()
        .map(|dt| OrbitState::new(t0 + Duration::from_seconds(*dt), frame, r0 + v * *dt, v))
        .collect()
}
