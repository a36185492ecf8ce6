use super::Playfield;
use super::projectile::ProjectilePool;
use crate::consts::{ATTACKER_HEIGHT, ATTACKER_SPEED, ATTACKER_WIDTH};
use crate::input::{Command, HeldCommands};
use crate::surface::Surface;

/// The player-controlled ship
#[derive(Debug, Clone, PartialEq)]
pub struct Attacker {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Attacker {
    /// Horizontally centered, resting on the bottom edge
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            x: playfield.width * 0.5 - ATTACKER_WIDTH * 0.5,
            y: playfield.height - ATTACKER_HEIGHT,
            width: ATTACKER_WIDTH,
            height: ATTACKER_HEIGHT,
            speed: ATTACKER_SPEED,
        }
    }

    /// Leftmost allowed x. Half the sprite may hang off each edge.
    pub fn min_x(&self) -> f32 {
        -self.width * 0.5
    }

    pub fn max_x(&self, playfield: &Playfield) -> f32 {
        playfield.width - self.width * 0.5
    }

    /// Move for held keys, then clamp. Runs the clamp even with nothing held so
    /// an out-of-range position is corrected on the next tick.
    pub fn update(&mut self, held: &HeldCommands, playfield: &Playfield) {
        match (
            held.is_held(Command::MoveLeft),
            held.is_held(Command::MoveRight),
        ) {
            (true, false) => self.x -= self.speed,
            (false, true) => self.x += self.speed,
            _ => {}
        }

        if self.x < self.min_x() {
            self.x = self.min_x();
        } else if self.x > self.max_x(playfield) {
            self.x = self.max_x(playfield);
        }
    }

    /// Top-center of the sprite, where shots leave from
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y)
    }

    /// Start one shot from the muzzle if a slot is free, returning the slot index.
    /// An exhausted pool is not an error: nothing happens and nothing is queued.
    pub fn fire<const N: usize>(&self, pool: &mut ProjectilePool<N>) -> Option<usize> {
        let Some(handle) = pool.acquire() else {
            log::debug!("fire ignored, all {} slots in flight", N);
            return None;
        };
        let (x, y) = self.muzzle();
        let index = pool.start(handle, x, y)?;
        log::debug!("fired slot {index} at ({x}, {y})");
        Some(index)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_rect(self.x, self.y, self.width, self.height);
    }
}
