use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Instant;

use crate::consts::FRAME_DURATION;
use crate::entities::GameState;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::simulation::Simulation;
use crate::surface::DrawList;

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    simulation: Simulation,
    /// Draw calls from the most recent simulated frame
    draw_list: DrawList,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    ///
    /// `release_events` tells input handling whether the terminal reports key releases.
    pub fn new(release_events: bool) -> Self {
        Self {
            running: true,
            game_state: GameState::Playing,
            simulation: Simulation::default(),
            draw_list: DrawList::new(),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        log::info!("entering frame loop");
        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Apply this frame's key events before the simulation reads them
            self.input_manager.poll_events(self.game_state)?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);

            self.step();

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.game_state,
                    commands: self.draw_list.visible(),
                    playfield: self.simulation.playfield,
                    active_shots: self.simulation.pool.active_count(),
                    shot_capacity: self.simulation.pool.capacity(),
                    formation_phase: self.simulation.formation.phase(),
                    frame_count: self.simulation.frame_count,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            std::thread::sleep(FRAME_DURATION);
        }
        log::info!(
            "leaving frame loop after {} frames",
            self.simulation.frame_count
        );
        Ok(())
    }

    /// Process input actions and update game state accordingly
    pub fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    log::info!("paused at frame {}", self.simulation.frame_count);
                    self.game_state = GameState::Paused;
                    self.input_manager.release_all();
                }
                InputAction::Resume => {
                    log::info!("resumed at frame {}", self.simulation.frame_count);
                    self.game_state = GameState::Playing;
                }
                InputAction::Fire => {
                    if self.game_state == GameState::Playing {
                        self.simulation.fire();
                    }
                }
            }
        }
    }

    /// Run one simulation frame into the draw list, unless paused.
    /// While paused the last recorded frame stays on screen.
    pub fn step(&mut self) {
        if self.game_state != GameState::Playing {
            return;
        }
        self.draw_list.reset();
        let held = self.input_manager.held();
        self.simulation.frame(&held, &mut self.draw_list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_new() {
        let app = App::new(true);
        assert!(app.is_running());
        assert_eq!(app.game_state(), GameState::Playing);
        assert_eq!(app.simulation().frame_count, 0);
    }

    #[test]
    fn test_fire_resolved_before_step() {
        let mut app = App::new(true);
        app.process_actions(&[InputAction::Fire, InputAction::Fire]);
        assert_eq!(app.simulation().pool.active_count(), 2);
        app.step();
        assert_eq!(app.simulation().pool.iter_active().count(), 2);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut app = App::new(true);
        app.step();
        let recorded = app.draw_list().len();

        app.process_actions(&[InputAction::Pause]);
        app.step();
        app.step();
        assert_eq!(app.simulation().frame_count, 1);
        assert_eq!(app.draw_list().len(), recorded);

        app.process_actions(&[InputAction::Fire]);
        assert_eq!(app.simulation().pool.active_count(), 0);

        app.process_actions(&[InputAction::Resume]);
        app.step();
        assert_eq!(app.simulation().frame_count, 2);
    }

    #[test]
    fn test_quit_stops_running() {
        let mut app = App::new(false);
        app.process_actions(&[InputAction::Quit]);
        assert!(!app.is_running());
    }
}
