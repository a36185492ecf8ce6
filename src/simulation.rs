use crate::consts::{FORMATION_CELL_SIZE, FORMATION_COLUMNS, FORMATION_ROWS, POOL_CAPACITY};
use crate::entities::{Attacker, Formation, Playfield, ProjectilePool};
use crate::input::HeldCommands;
use crate::surface::Surface;

/// Owns every entity and runs the per-frame update/draw pass
#[derive(Debug, Clone)]
pub struct Simulation {
    pub playfield: Playfield,
    pub attacker: Attacker,
    pub pool: ProjectilePool<POOL_CAPACITY>,
    pub formation: Formation,
    pub frame_count: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Playfield::default())
    }
}

impl Simulation {
    pub fn new(playfield: Playfield) -> Self {
        Self {
            playfield,
            attacker: Attacker::new(&playfield),
            pool: ProjectilePool::new(),
            formation: Formation::new(FORMATION_ROWS, FORMATION_COLUMNS, FORMATION_CELL_SIZE),
            frame_count: 0,
        }
    }

    /// Resolve a fire request against the pool right away.
    /// Returns the started slot, or `None` if every slot is in flight.
    pub fn fire(&mut self) -> Option<usize> {
        self.attacker.fire(&mut self.pool)
    }

    /// One frame, in fixed order: clear, attacker (drawn before it moves),
    /// projectiles, formation.
    pub fn frame(&mut self, held: &HeldCommands, surface: &mut impl Surface) {
        self.frame_count += 1;

        surface.clear(0.0, 0.0, self.playfield.width, self.playfield.height);

        self.attacker.draw(surface);
        self.attacker.update(held, &self.playfield);

        self.pool.tick();
        self.pool.draw(surface);

        self.formation.update(&self.playfield);
        self.formation.draw(surface);
    }
}
