mod attacker;
mod formation;
mod game_state;
mod projectile;

// Re-export all public types
pub use attacker::Attacker;
pub use formation::{DefenderCell, Formation, FormationPhase};
pub use game_state::GameState;
pub use projectile::{Projectile, ProjectileHandle, ProjectilePool};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Playfield bounds, passed into every update instead of being shared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }
}
