use crate::particle::{Track, TrackStatus};

/// Outgoing record a process hands back to the host after an interaction.
///
/// Always starts as a copy of the incoming track state, so an untouched
/// record means "no change".
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleChange {
    pub total_energy: f64,
    pub direction: [f64; 3],
    pub status: TrackStatus,
}

impl ParticleChange {
    pub fn initialize(track: &Track) -> Self {
        Self {
            total_energy: track.total_energy(),
            direction: track.direction,
            status: track.status,
        }
    }

    pub fn propose_energy(&mut self, total_energy: f64) {
        self.total_energy = total_energy;
    }

    pub fn propose_direction(&mut self, direction: [f64; 3]) {
        self.direction = direction;
    }

    pub fn propose_status(&mut self, status: TrackStatus) {
        self.status = status;
    }

    pub fn is_kill(&self) -> bool {
        self.status == TrackStatus::StopAndKill
    }

    /// Write the proposal back onto the host's track.
    ///
    /// A proposed total energy at or below the rest mass stops and kills the
    /// track instead of leaving it alive with no kinetic energy.
    pub fn apply_to(&self, track: &mut Track) {
        track.status = self.status;
        if self.is_kill() {
            return;
        }
        if self.total_energy <= track.mass {
            log::warn!(
                "track {}: proposed energy {:.3} MeV does not exceed the rest mass {:.3} MeV, killing it",
                track.track_id,
                self.total_energy,
                track.mass
            );
            track.status = TrackStatus::StopAndKill;
            return;
        }
        track.kinetic_energy = self.total_energy - track.mass;
        track.direction = self.direction;
    }
}
