use nalgebra::Vector3;

/// Host-side transport status of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    Alive,
    StopAndKill,
}

/// Read-only view of the particle a process is asked about.
///
/// Track id 1 is the primary, following the host convention; everything
/// else is a secondary.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: u32,
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub kinetic_energy: f64,
    pub mass: f64,
    pub status: TrackStatus,
}

impl Track {
    pub const PRIMARY_ID: u32 = 1;

    pub fn new(track_id: u32, position: [f64; 3], direction: [f64; 3], kinetic_energy: f64, mass: f64) -> Self {
        Self {
            track_id,
            position,
            direction,
            kinetic_energy,
            mass,
            status: TrackStatus::Alive,
        }
    }

    /// Primary travelling along +z from `position`.
    pub fn primary(position: [f64; 3], kinetic_energy: f64, mass: f64) -> Self {
        Self::new(Self::PRIMARY_ID, position, [0.0, 0.0, 1.0], kinetic_energy, mass)
    }

    pub fn is_primary(&self) -> bool {
        self.track_id == Self::PRIMARY_ID
    }

    pub fn is_alive(&self) -> bool {
        self.status == TrackStatus::Alive
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.mass
    }

    /// Position along the beam axis.
    pub fn z(&self) -> f64 {
        self.position[2]
    }

    pub fn move_by(&mut self, distance: f64) {
        let moved = Vector3::from_row_slice(&self.position) + Vector3::from_row_slice(&self.direction) * distance;
        self.position = [moved.x, moved.y, moved.z];
    }
}
