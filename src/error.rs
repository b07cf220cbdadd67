use thiserror::Error;

use anise::errors::AlmanacError;

use crate::frame::FrameTag;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid numerical settings in [crate::prelude::Config].
    /// Note that partial DMC settings never wind up here: DMC is simply disabled.
    #[error("invalid configuration: {0}")]
    Configuration(&'static str),

    /// The interpolation window cannot be filled: the ephemeris arc
    /// is too short for requested interpolation order.
    #[error("not enough samples: {required} required, {available} available")]
    InsufficientSamples { required: usize, available: usize },

    /// Interpolation requires at least 2 neighbouring samples.
    #[error("invalid interpolation order {0} (2 minimum)")]
    InvalidInterpolationOrder(usize),

    /// Ephemeris samples must be expressed in chronological order,
    /// without duplicates.
    #[error("sample timestamps are not strictly increasing")]
    NonIncreasingSamples,

    /// Sample is not expressed in the declared source frame.
    #[error("frame mismatch: expecting {expected}, got {found}")]
    FrameMismatch { expected: FrameTag, found: FrameTag },

    /// The [FrameTransform](crate::prelude::FrameTransform) cannot model this conversion.
    #[error("unsupported frame transform {from} -> {to}")]
    UnsupportedTransform { from: FrameTag, to: FrameTag },

    /// Frame identifier does not belong to the supported set.
    #[error("unknown reference frame \"{0}\"")]
    UnknownFrame(String),

    /// DMC is enabled but named initial value is not part of the parameter set.
    #[error("missing parameter \"{0}\"")]
    MissingParameter(String),

    /// An attached equation could not locate its state block.
    #[error("missing additional state \"{0}\"")]
    MissingAdditionalState(String),

    #[error("additional state \"{name}\": expecting {expected} components, got {found}")]
    AdditionalStateDimension {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Normalized parameters do not match the selected drivers.
    #[error("invalid parameter dimension: expecting {expected}, got {found}")]
    ParameterDimension { expected: usize, found: usize },

    /// Raw state vectors are made of position and velocity (6 components).
    #[error("invalid state vector dimension {0} (expecting 6)")]
    InvalidStateVector(usize),

    /// Every sample time must come with its state vector.
    #[error("{times} sample times for {states} state vectors")]
    SampleCountMismatch { times: usize, states: usize },

    #[error("resampling step must be strictly positive")]
    InvalidStep,

    #[error("invalid time span: end precedes start")]
    InvalidTimeSpan,

    /// Kernel backed frame transforms may wind up here.
    #[error("issue with Almanac: {0}")]
    Almanac(AlmanacError),
}
