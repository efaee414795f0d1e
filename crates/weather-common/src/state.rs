//! Explicit simulation state threaded through sampling and rendering.

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// Playback and view state for one session.
///
/// Passed by reference to whatever needs the current timestep or attribute.
/// A slice pass reads `timestep` once when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Current timestep index.
    pub timestep: usize,
    /// Attribute being displayed.
    pub attribute: Attribute,
    /// Camera position (x, y in world units, z height above the map plane).
    pub eye: [f64; 3],
}

impl SimulationState {
    pub fn new(attribute: Attribute, eye: [f64; 3]) -> Self {
        Self {
            timestep: 0,
            attribute,
            eye,
        }
    }

    /// Timestep a daily attribute is differenced against, or `None` at the
    /// first timestep.
    pub fn previous_timestep(&self) -> Option<usize> {
        self.timestep.checked_sub(1)
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(Attribute::default(), [0.0, 0.0, 10.0])
    }
}
