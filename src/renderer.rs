use crate::entities::{FormationPhase, GameState, Playfield};
use crate::surface::{Bounds, DrawCommand};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Painter, Shape},
    },
};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    /// Draw calls recorded during the last simulated frame
    pub commands: &'a [DrawCommand],
    pub playfield: Playfield,
    pub active_shots: usize,
    pub shot_capacity: usize,
    pub formation_phase: FormationPhase,
    pub frame_count: u64,
    pub area: Rect,
    pub fps: u32,
}

/// A recorded rectangle painted onto the canvas grid, clipped to the playfield
struct RectShape {
    bounds: Bounds,
    playfield: Playfield,
    filled: bool,
    color: Color,
}

impl Shape for RectShape {
    fn draw(&self, painter: &mut Painter) {
        let width = self.playfield.width as f64;
        let height = self.playfield.height as f64;
        let left = self.bounds.x as f64;
        let right = self.bounds.right() as f64;
        let top = self.bounds.y as f64;
        let bottom = self.bounds.bottom() as f64;

        if right < 0.0 || left > width || bottom < 0.0 || top > height {
            return;
        }

        // Canvas y grows upward, playfield y grows downward
        let Some((col0, row0)) = painter.get_point(left.max(0.0), height - top.max(0.0)) else {
            return;
        };
        let Some((col1, row1)) = painter.get_point(right.min(width), height - bottom.min(height))
        else {
            return;
        };

        if self.filled {
            for row in row0..=row1 {
                for col in col0..=col1 {
                    painter.paint(col, row, self.color);
                }
            }
            return;
        }

        // Only edges that are actually on the playfield
        if top >= 0.0 {
            for col in col0..=col1 {
                painter.paint(col, row0, self.color);
            }
        }
        if bottom <= height {
            for col in col0..=col1 {
                painter.paint(col, row1, self.color);
            }
        }
        if left >= 0.0 {
            for row in row0..=row1 {
                painter.paint(col0, row, self.color);
            }
        }
        if right <= width {
            for row in row0..=row1 {
                painter.paint(col1, row, self.color);
            }
        }
    }
}

/// Largest rect inside `area` that shows the playfield at its true aspect ratio,
/// leaving the first and last rows for the HUD. Includes two columns of side border.
pub fn fit_playfield(area: Rect, playfield: &Playfield) -> Rect {
    let avail_height = area.height.saturating_sub(2);
    let max_inner_width = area.width.saturating_sub(2);
    let aspect = CELL_ASPECT * playfield.width / playfield.height;

    let mut inner_height = avail_height;
    let mut inner_width = (inner_height as f32 * aspect).round() as u16;
    if inner_width > max_inner_width {
        inner_width = max_inner_width;
        inner_height = ((inner_width as f32 / aspect).round() as u16).min(avail_height);
    }

    let width = (inner_width + 2).min(area.width);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + 1 + avail_height.saturating_sub(inner_height) / 2,
        width,
        height: inner_height,
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer {}

impl GameRenderer {
    /// Creates a new GameRenderer
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let game_area = fit_playfield(area, &view.playfield);
        let playfield = view.playfield;

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::RIGHT)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, playfield.width as f64])
            .y_bounds([0.0, playfield.height as f64])
            .paint(|ctx| {
                for command in view.commands {
                    let (filled, color) = match command {
                        DrawCommand::Clear(_) => continue,
                        DrawCommand::Fill(_) => (true, Color::White),
                        DrawCommand::Stroke(_) => (false, Color::LightRed),
                    };
                    ctx.draw(&RectShape {
                        bounds: command.bounds(),
                        playfield,
                        filled,
                        color,
                    });
                }
            });
        frame.render_widget(canvas, game_area);

        // Stats overlay at the top
        let stats = Line::from(vec![
            Span::styled("Shots: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", view.active_shots, view.shot_capacity),
                if view.active_shots < view.shot_capacity {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
            Span::styled("  Formation: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.formation_phase.get_name(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Frame: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.frame_count),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Paragraph::new(stats).centered(), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [1/Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: area.x + (area.width / 2).saturating_sub(15),
            y: area.y + (area.height / 2).saturating_sub(3),
            width: area.width.min(30),
            height: area.height.min(6),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }
}
