use log::{debug, warn};

use crate::{
    ephemeris::Ephemeris,
    frame::{FrameTag, FrameTransform},
    orbit::OrbitState,
    prelude::{Duration, Epoch, Error},
};

/// Maximal number of states reserved ahead of resampling
const MAX_PREALLOCATION: usize = 1 << 16;

/// Number of states to reserve for this span, the output grows beyond.
fn preallocation(span: Duration, step: Duration) -> usize {
    let nb_steps = (span.to_seconds() / step.to_seconds()).ceil();
    if nb_steps.is_finite() && nb_steps < MAX_PREALLOCATION as f64 {
        nb_steps as usize + 1
    } else {
        MAX_PREALLOCATION
    }
}

/// Ephemeris resampling request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationRequest {
    /// Frame of the samples
    pub source: FrameTag,
    /// Frame of the resampled states
    pub destination: FrameTag,
    /// Number of neighbouring samples per evaluation
    pub order: usize,
    /// First resampled [Epoch]
    pub start: Epoch,
    /// Last resampled [Epoch] (inclusive)
    pub end: Epoch,
    /// Resampling step
    pub step: Duration,
}

/// Resamples `samples` onto a uniform grid spanning
/// [InterpolationRequest::start] to [InterpolationRequest::end], both included,
/// expressed in the [InterpolationRequest::destination] frame.
/// The last step is shortened so the last state lands exactly on `end`.
pub fn resample<T: FrameTransform>(
    samples: &[OrbitState],
    request: &InterpolationRequest,
    transform: &T,
) -> Result<Vec<OrbitState>, Error> {
    if request.step <= Duration::ZERO {
        return Err(Error::InvalidStep);
    }

    if request.end < request.start {
        return Err(Error::InvalidTimeSpan);
    }

    let ephemeris = Ephemeris::new(samples.to_vec(), request.source, request.order)?;

    debug!(
        "resampling {} samples ({}) {} -> {} every {} (order={}) into {}",
        ephemeris.len(),
        request.source,
        request.start,
        request.end,
        request.step,
        request.order,
        request.destination,
    );

    if !ephemeris.covers(request.start) || !ephemeris.covers(request.end) {
        warn!(
            "extrapolating outside sampled span {} -> {}",
            ephemeris.first_epoch(),
            ephemeris.last_epoch()
        );
    }

    let mut output = Vec::with_capacity(preallocation(request.end - request.start, request.step));

    let mut t = request.start;

    loop {
        let state = ephemeris.state_at(t)?;
        output.push(transform.transform(&state, request.destination)?);

        let remaining = request.end - t;
        if remaining <= Duration::ZERO {
            break;
        }

        t += if remaining < request.step {
            remaining
        } else {
            request.step
        };
    }

    Ok(output)
}

#[cfg(test)]
mod test {
    use super::{preallocation, MAX_PREALLOCATION};
    use crate::prelude::Duration;

    #[test]
    fn bounded_preallocation() {
        let step = Duration::from_seconds(10.0);
        assert_eq!(preallocation(Duration::ZERO, step), 1);
        assert_eq!(preallocation(Duration::from_seconds(240.0), step), 25);
        assert_eq!(preallocation(Duration::from_seconds(245.0), step), 26);

        // millennium long span, nanosecond step
        let span = Duration::from_days(365.25 * 1000.0);
        let step = Duration::from_nanoseconds(1.0);
        assert_eq!(preallocation(span, step), MAX_PREALLOCATION);
    }
}
