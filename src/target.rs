// Gas target cell layout along the beam axis
//
// Only the extent of the cell matters to the scattering process: the vertex
// has to sit somewhere inside it. Windows are aluminium, the thicknesses
// below are per target fill.

use crate::error::{Result, ScatterError};
use crate::units::{CM, MM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetGas {
    H1,
    H2,
    H3,
    He3,
}

impl TargetGas {
    pub const ALL: [TargetGas; 4] = [TargetGas::H1, TargetGas::H2, TargetGas::H3, TargetGas::He3];

    fn index(self) -> usize {
        match self {
            TargetGas::H1 => 0,
            TargetGas::H2 => 1,
            TargetGas::H3 => 2,
            TargetGas::He3 => 3,
        }
    }
}

impl FromStr for TargetGas {
    type Err = ScatterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "H1" => Ok(TargetGas::H1),
            "H2" => Ok(TargetGas::H2),
            "H3" => Ok(TargetGas::H3),
            "He3" => Ok(TargetGas::He3),
            other => Err(ScatterError::UnknownTarget(other.to_string())),
        }
    }
}

impl fmt::Display for TargetGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetGas::H1 => "H1",
            TargetGas::H2 => "H2",
            TargetGas::H3 => "H3",
            TargetGas::He3 => "He3",
        };
        write!(f, "{}", name)
    }
}

const CELL_LENGTH: f64 = 25.0 * CM;

// Indexed by TargetGas::index
const ENTRANCE_WINDOW: [f64; 4] = [0.311 * MM, 0.215 * MM, 0.253 * MM, 0.203 * MM];
const EXIT_WINDOW: [f64; 4] = [0.330 * MM, 0.294 * MM, 0.343 * MM, 0.328 * MM];

/// Gas cell centred on the origin with its axis on the beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCell {
    pub gas: TargetGas,
    pub length: f64,
    pub entrance_window: f64,
    pub exit_window: f64,
}

impl TargetCell {
    pub fn new(gas: TargetGas) -> Self {
        let i = gas.index();
        Self {
            gas,
            length: CELL_LENGTH,
            entrance_window: ENTRANCE_WINDOW[i],
            exit_window: EXIT_WINDOW[i],
        }
    }

    /// Beam-axis extent of the gas volume.
    pub fn gas_extent(&self) -> (f64, f64) {
        (-self.length / 2.0, self.length / 2.0)
    }

    /// Beam-axis extent including the entrance and exit windows.
    pub fn outer_extent(&self) -> (f64, f64) {
        (
            -(self.length / 2.0 + self.entrance_window),
            self.length / 2.0 + self.exit_window,
        )
    }

    pub fn contains_vertex(&self, z: f64) -> bool {
        let (lo, hi) = self.outer_extent();
        z >= lo && z <= hi
    }

    /// True when `z` is inside the cell but in one of the end windows
    /// rather than the gas.
    pub fn vertex_in_window(&self, z: f64) -> bool {
        let (lo, hi) = self.gas_extent();
        self.contains_vertex(z) && (z < lo || z > hi)
    }
}
