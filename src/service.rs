//! Wire contract of the utility services.
//! Times are expressed in seconds from the J2000 epoch,
//! states as raw (position, velocity) 6-vectors in meters.
use std::str::FromStr;

use nalgebra::Vector6;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ephemeris::{resample, InterpolationRequest},
    frame::{FrameTag, FrameTransform},
    orbit::OrbitState,
    prelude::{Duration, Error},
    time::{epoch_from_j2000_seconds, j2000_seconds},
};

/// Ephemeris interpolation input
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterpolateEphemerisInput {
    /// Frame identifier of the samples
    pub source_frame: String,
    /// Frame identifier of the output
    pub dest_frame: String,
    /// Sample times (s from J2000)
    pub time: Vec<f64>,
    /// Sample states, one 6-vector per time
    pub ephem: Vec<Vec<f64>>,
    /// Interpolation order
    pub num_points: usize,
    /// Output start (s from J2000)
    pub interp_start: f64,
    /// Output end (s from J2000), inclusive
    pub interp_end: f64,
    /// Output step (s)
    pub step_size: f64,
}

/// Timestamped state vector, as returned to the caller
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Time (s from J2000)
    pub time: f64,
    /// Position (m) and velocity (m.s⁻¹)
    pub values: Vec<f64>,
}

impl From<&OrbitState> for Measurement {
    fn from(state: &OrbitState) -> Self {
        Self {
            time: j2000_seconds(state.epoch()),
            values: state.to_pos_vel().iter().copied().collect(),
        }
    }
}

/// Resolves the request at the boundary, then resamples.
pub fn interpolate_ephemeris<T: FrameTransform>(
    input: &InterpolateEphemerisInput,
    transform: &T,
) -> Result<Vec<Measurement>, Error> {
    let source = FrameTag::from_str(&input.source_frame)?;
    let destination = FrameTag::from_str(&input.dest_frame)?;

    if input.time.len() != input.ephem.len() {
        return Err(Error::SampleCountMismatch {
            times: input.time.len(),
            states: input.ephem.len(),
        });
    }

    let samples = input
        .time
        .iter()
        .zip(input.ephem.iter())
        .map(|(t, pv)| {
            if pv.len() != 6 {
                return Err(Error::InvalidStateVector(pv.len()));
            }
            Ok(OrbitState::from_pos_vel(
                epoch_from_j2000_seconds(*t),
                source,
                Vector6::from_column_slice(pv),
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let request = InterpolationRequest {
        source,
        destination,
        order: input.num_points,
        start: epoch_from_j2000_seconds(input.interp_start),
        end: epoch_from_j2000_seconds(input.interp_end),
        step: Duration::from_seconds(input.step_size),
    };

    let states = resample(&samples, &request, transform)?;
    Ok(states.iter().map(Measurement::from).collect())
}
