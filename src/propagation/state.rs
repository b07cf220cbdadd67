use nalgebra::{DVector, Vector6};

use crate::{frame::FrameTag, orbit::OrbitState, prelude::Epoch};

/// Orbit state dimension (position, velocity)
pub const ORBIT_DIMENSION: usize = 6;

/// Named block of scalars integrated alongside the orbit
#[derive(Debug, Clone, PartialEq)]
pub struct AdditionalState {
    pub name: String,
    pub values: Vec<f64>,
}

/// Propagated state: fixed size orbit followed by an ordered list
/// of [AdditionalState] blocks. The flat layout is
/// `[x, y, z, vx, vy, vz, block_0.., block_1.., ..]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedState {
    pub epoch: Epoch,
    pub frame: FrameTag,
    /// Position (m) and velocity (m.s⁻¹)
    pub orbit: Vector6<f64>,
    additional: Vec<AdditionalState>,
}

impl From<OrbitState> for AugmentedState {
    fn from(state: OrbitState) -> Self {
        Self {
            epoch: state.epoch(),
            frame: state.frame(),
            orbit: state.to_pos_vel(),
            additional: Vec::new(),
        }
    }
}

impl AugmentedState {
    /// Copies and returns [AugmentedState] with given [AdditionalState] block.
    /// An existing block with the same name is replaced in place.
    pub fn with_additional_state(&self, name: &str, values: Vec<f64>) -> Self {
        let mut s = self.clone();
        match s.additional.iter_mut().find(|block| block.name == name) {
            Some(block) => block.values = values,
            None => s.additional.push(AdditionalState {
                name: name.to_string(),
                values,
            }),
        }
        s
    }

    /// Returns [AdditionalState] values, by name
    pub fn additional_state(&self, name: &str) -> Option<&[f64]> {
        self.additional
            .iter()
            .find(|block| block.name == name)
            .map(|block| block.values.as_slice())
    }

    /// Returns true if this [AdditionalState] block exists
    pub fn has_additional_state(&self, name: &str) -> bool {
        self.additional_state(name).is_some()
    }

    /// Iterates over the [AdditionalState] blocks, in state vector order
    pub fn additional_states(&self) -> impl Iterator<Item = &AdditionalState> + '_ {
        self.additional.iter()
    }

    /// Offset of this [AdditionalState] block within the flat state vector
    pub fn additional_offset(&self, name: &str) -> Option<usize> {
        let mut offset = ORBIT_DIMENSION;
        for block in self.additional.iter() {
            if block.name == name {
                return Some(offset);
            }
            offset += block.values.len();
        }
        None
    }

    /// Total state vector dimension
    pub fn dimension(&self) -> usize {
        ORBIT_DIMENSION
            + self
                .additional
                .iter()
                .map(|block| block.values.len())
                .sum::<usize>()
    }

    /// Returns the orbital part as [OrbitState]
    pub fn orbit_state(&self) -> OrbitState {
        OrbitState::from_pos_vel(self.epoch, self.frame, self.orbit)
    }

    /// Flattens this [AugmentedState]
    pub fn to_vector(&self) -> DVector<f64> {
        let mut x = DVector::<f64>::zeros(self.dimension());
        for i in 0..ORBIT_DIMENSION {
            x[i] = self.orbit[i];
        }

        let mut offset = ORBIT_DIMENSION;
        for block in self.additional.iter() {
            for (i, value) in block.values.iter().enumerate() {
                x[offset + i] = *value;
            }
            offset += block.values.len();
        }
        x
    }

    /// Returns a new [AugmentedState] sharing this layout, at [Epoch]
    /// and from flattened values. `x` must match [Self::dimension].
    pub fn with_vector(&self, epoch: Epoch, x: &DVector<f64>) -> Self {
        let mut s = self.clone();
        s.epoch = epoch;

        for i in 0..ORBIT_DIMENSION {
            s.orbit[i] = x[i];
        }

        let mut offset = ORBIT_DIMENSION;
        for block in s.additional.iter_mut() {
            for (i, value) in block.values.iter_mut().enumerate() {
                *value = x[offset + i];
            }
            offset += block.values.len();
        }
        s
    }
}
