/// Axis-aligned rectangle in playfield units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Something that accepts rectangle draw calls once per frame
pub trait Surface {
    /// Clear a region, called once per frame before any drawing
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Solid sprite (attacker, projectile)
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Outlined sprite (defender cell)
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Bounds),
    Fill(Bounds),
    Stroke(Bounds),
}

impl DrawCommand {
    pub fn bounds(&self) -> Bounds {
        match self {
            DrawCommand::Clear(b) | DrawCommand::Fill(b) | DrawCommand::Stroke(b) => *b,
        }
    }
}

/// Records draw calls so a frame can be painted later (or inspected in tests)
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands since the most recent clear
    pub fn visible(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Drop recorded commands, keeping the allocation for the next frame
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands
            .push(DrawCommand::Clear(Bounds::new(x, y, width, height)));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands
            .push(DrawCommand::Fill(Bounds::new(x, y, width, height)));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands
            .push(DrawCommand::Stroke(Bounds::new(x, y, width, height)));
    }
}
