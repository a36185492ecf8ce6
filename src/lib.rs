// Library exports for testing
pub use entities::{
    Attacker, DefenderCell, Formation, FormationPhase, GameState, Playfield, Projectile,
    ProjectileHandle, ProjectilePool,
};
pub use input::{Command, HeldCommands, InputAction, InputManager};
pub use simulation::Simulation;
pub use surface::{Bounds, DrawCommand, DrawList, Surface};

pub mod app;
pub mod entities;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod simulation;
pub mod surface;

/// Startup constants. None of these are configurable at runtime.
pub mod consts {
    use std::time::Duration;

    /// Playfield size in world units
    pub const PLAYFIELD_WIDTH: f32 = 600.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Number of projectile slots
    pub const POOL_CAPACITY: usize = 10;

    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    pub const PROJECTILE_SPEED: f32 = 20.0;

    pub const ATTACKER_WIDTH: f32 = 100.0;
    pub const ATTACKER_HEIGHT: f32 = 100.0;
    pub const ATTACKER_SPEED: f32 = 3.0;

    /// Defender grid layout
    pub const FORMATION_ROWS: usize = 3;
    pub const FORMATION_COLUMNS: usize = 3;
    pub const FORMATION_CELL_SIZE: f32 = 60.0;
    /// Initial horizontal velocity, applied twice per tick
    pub const FORMATION_SPEED: f32 = 3.0;
    /// Units per tick the block eases down while still above the playfield
    pub const FORMATION_DESCENT_RATE: f32 = 5.0;

    /// ~60 frames per second
    pub const FRAME_DURATION: Duration = Duration::from_millis(16);
    /// Frames a movement key stays held after its last press when the
    /// terminal cannot report key releases
    pub const FALLBACK_HOLD_FRAMES: u8 = 20;

    pub const LOG_FILE: &str = "volley.log";
    pub const LOG_ENV: &str = "VOLLEY_LOG";
}
