//! Ephemeris interpolation
use itertools::Itertools;

use crate::{
    frame::FrameTag,
    orbit::OrbitState,
    prelude::{Epoch, Error},
};

mod hermite;
mod resample;

use hermite::Hermite;

pub use resample::{resample, InterpolationRequest};

/// [Ephemeris] interpolates a sparse, irregularly sampled trajectory.
/// Each evaluation uses the `order` samples neighbouring the requested [Epoch],
/// both positions and velocities being matched (Hermite interpolation).
///
/// Evaluation outside the sampled span is permitted (extrapolation)
/// but accuracy quickly degrades.
#[derive(Debug, Clone)]
pub struct Ephemeris {
    /// Frame of all samples
    frame: FrameTag,
    /// Number of neighbouring samples per evaluation
    order: usize,
    /// Samples, in chronological order
    samples: Vec<OrbitState>,
}

impl Ephemeris {
    /// Creates a new [Ephemeris] from chronological samples, all expressed
    /// in `frame`. We need at least as many samples as the interpolation
    /// order, which is 2 at least.
    pub fn new(samples: Vec<OrbitState>, frame: FrameTag, order: usize) -> Result<Self, Error> {
        if order < 2 {
            return Err(Error::InvalidInterpolationOrder(order));
        }

        if samples.len() < order {
            return Err(Error::InsufficientSamples {
                required: order,
                available: samples.len(),
            });
        }

        if let Some(sample) = samples.iter().find(|s| s.frame() != frame) {
            return Err(Error::FrameMismatch {
                expected: frame,
                found: sample.frame(),
            });
        }

        if !samples
            .iter()
            .tuple_windows()
            .all(|(prev, next)| prev.epoch() < next.epoch())
        {
            return Err(Error::NonIncreasingSamples);
        }

        Ok(Self {
            frame,
            order,
            samples,
        })
    }

    pub fn frame(&self) -> FrameTag {
        self.frame
    }

    /// Number of neighbouring samples used per evaluation
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sampled [Epoch]
    pub fn first_epoch(&self) -> Epoch {
        self.samples[0].epoch()
    }

    /// Last sampled [Epoch]
    pub fn last_epoch(&self) -> Epoch {
        self.samples[self.samples.len() - 1].epoch()
    }

    /// Returns true if `t` lies within the sampled span
    pub fn covers(&self, t: Epoch) -> bool {
        t >= self.first_epoch() && t <= self.last_epoch()
    }

    /// Selects the `order` samples centered on `t`,
    /// shifted towards the arc when close to its edges.
    fn neighbours(&self, t: Epoch) -> Result<&[OrbitState], Error> {
        let (order, len) = (self.order, self.samples.len());

        if len < order {
            return Err(Error::InsufficientSamples {
                required: order,
                available: len,
            });
        }

        // latest sample prior t
        let central = self
            .samples
            .partition_point(|s| s.epoch() <= t)
            .saturating_sub(1);

        let start = central.saturating_sub((order - 1) / 2).min(len - order);
        Ok(&self.samples[start..start + order])
    }

    /// Interpolates the [OrbitState] at `t`.
    pub fn state_at(&self, t: Epoch) -> Result<OrbitState, Error> {
        let window = self.neighbours(t)?;
        let t0 = window[0].epoch();

        let points = window
            .iter()
            .map(|s| {
                (
                    (s.epoch() - t0).to_seconds(),
                    s.position_m(),
                    s.velocity_m_s(),
                )
            })
            .collect::<Vec<_>>();

        let (position_m, velocity_m_s) = Hermite::new(&points).evaluate((t - t0).to_seconds());

        Ok(OrbitState::new(t, self.frame, position_m, velocity_m_s))
    }
}
