use super::Playfield;
use crate::consts::{FORMATION_DESCENT_RATE, FORMATION_SPEED};
use crate::surface::Surface;

/// Where the block is in its motion cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormationPhase {
    Entering,   // Still easing down from above the playfield
    Patrolling, // Bouncing between the side edges
}

impl FormationPhase {
    pub fn get_name(&self) -> &'static str {
        match self {
            FormationPhase::Entering => "Entering",
            FormationPhase::Patrolling => "Patrolling",
        }
    }
}

/// One defender in the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenderCell {
    /// Fixed offset from the formation origin
    pub offset_x: f32,
    pub offset_y: f32,
    /// Last resolved (and drawn) position
    pub x: f32,
    pub y: f32,
}

impl DefenderCell {
    fn resolve(&mut self, origin_x: f32, origin_y: f32) {
        self.x = origin_x + self.offset_x;
        self.y = origin_y + self.offset_y;
    }
}

/// Rigid block of defenders sharing a single origin
#[derive(Debug, Clone)]
pub struct Formation {
    /// Top-left of the block
    pub origin_x: f32,
    pub origin_y: f32,
    pub velocity_x: f32,
    /// Downward step queued by a bounce, cleared every tick
    pub velocity_y: f32,
    pub cell_size: f32,
    pub rows: usize,
    pub columns: usize,
    /// Row-major, never reordered
    pub cells: Vec<DefenderCell>,
}

impl Formation {
    /// A block parked fully above the playfield, moving right
    pub fn new(rows: usize, columns: usize, cell_size: f32) -> Self {
        let origin_x = 0.0;
        let origin_y = -(rows as f32 * cell_size);

        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                let mut cell = DefenderCell {
                    offset_x: column as f32 * cell_size,
                    offset_y: row as f32 * cell_size,
                    x: 0.0,
                    y: 0.0,
                };
                cell.resolve(origin_x, origin_y);
                cells.push(cell);
            }
        }

        Self {
            origin_x,
            origin_y,
            velocity_x: FORMATION_SPEED,
            velocity_y: 0.0,
            cell_size,
            rows,
            columns,
            cells,
        }
    }

    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    pub fn phase(&self) -> FormationPhase {
        if self.origin_y < 0.0 {
            FormationPhase::Entering
        } else {
            FormationPhase::Patrolling
        }
    }

    /// Largest origin x before the right edge counts as crossed
    pub fn max_origin_x(&self, playfield: &Playfield) -> f32 {
        playfield.width - self.width()
    }

    /// Advance one tick. Returns true if the block bounced off a side edge.
    ///
    /// x moves twice per tick with the edge check in between, so a bounce takes
    /// effect mid-tick and the nominal speed is covered twice.
    pub fn update(&mut self, playfield: &Playfield) -> bool {
        // Entry easing, no snapping to 0
        if self.origin_y < 0.0 {
            self.origin_y += FORMATION_DESCENT_RATE;
        }

        self.velocity_y = 0.0;
        self.origin_x += self.velocity_x;

        let bounced = self.origin_x < 0.0 || self.origin_x > self.max_origin_x(playfield);
        if bounced {
            self.velocity_x *= -1.0;
            self.velocity_y = self.cell_size;
            log::debug!(
                "formation bounced at x={}, stepping down to y={}",
                self.origin_x,
                self.origin_y + self.velocity_y
            );
        }

        self.origin_x += self.velocity_x;
        self.origin_y += self.velocity_y;

        for cell in &mut self.cells {
            cell.resolve(self.origin_x, self.origin_y);
        }

        bounced
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for cell in &self.cells {
            surface.stroke_rect(cell.x, cell.y, self.cell_size, self.cell_size);
        }
    }
}
