use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::consts::FALLBACK_HOLD_FRAMES;
use crate::entities::GameState;

/// Commands that stay active for as long as their key is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
}

impl Command {
    pub const COUNT: usize = 2;
    pub const ALL: [Command; Command::COUNT] = [Command::MoveLeft, Command::MoveRight];

    fn index(self) -> usize {
        self as usize
    }

    fn opposite(self) -> Self {
        match self {
            Command::MoveLeft => Command::MoveRight,
            Command::MoveRight => Command::MoveLeft,
        }
    }

    /// The held command bound to a key, if any
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
            _ => None,
        }
    }
}

/// Snapshot of which commands are held, one flag per [`Command`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldCommands {
    held: [bool; Command::COUNT],
}

impl HeldCommands {
    pub fn press(&mut self, command: Command) {
        self.held[command.index()] = true;
    }

    pub fn release(&mut self, command: Command) {
        self.held[command.index()] = false;
    }

    pub fn is_held(&self, command: Command) -> bool {
        self.held[command.index()]
    }

    pub fn clear(&mut self) {
        self.held = [false; Command::COUNT];
    }
}

/// Represents semantic actions triggered once per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Fire,
    Pause,
    Resume,
    Quit,
}

/// Manages input polling and translates raw key events into held commands and actions
pub struct InputManager {
    held: HeldCommands,
    /// Frames left before a fallback hold lapses
    hold_frames: [u8; Command::COUNT],
    /// Whether the terminal reports key releases
    release_events: bool,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    /// `release_events` should be true when keyboard enhancement is active.
    /// Without it, auto-repeat presses keep a movement key held.
    pub fn new(release_events: bool) -> Self {
        Self {
            held: HeldCommands::default(),
            hold_frames: [0; Command::COUNT],
            release_events,
            oneshot_actions: Vec::new(),
        }
    }

    /// Drains all pending events without blocking.
    /// Should be called once per frame before reading actions
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();
        self.advance_frame();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    /// Ages fallback holds by one frame
    pub fn advance_frame(&mut self) {
        if self.release_events {
            return;
        }
        for command in Command::ALL {
            let frames = &mut self.hold_frames[command.index()];
            if *frames > 0 {
                *frames -= 1;
                if *frames == 0 {
                    self.held.release(command);
                }
            }
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state, false),
            KeyEventKind::Repeat => self.handle_key_press(key_event, game_state, true),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState, repeat: bool) {
        // Quit works in any state
        if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
            if !repeat {
                self.oneshot_actions.push(match game_state {
                    GameState::Playing => InputAction::Pause,
                    GameState::Paused => InputAction::Resume,
                });
            }
            return;
        }

        if game_state != GameState::Playing {
            return;
        }

        if let Some(command) = Command::from_key(key_event.code) {
            self.hold(command);
            return;
        }

        // Fire is edge-triggered
        if !repeat && matches!(key_event.code, KeyCode::Char('1') | KeyCode::Char(' ')) {
            self.oneshot_actions.push(InputAction::Fire);
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(command) = Command::from_key(code) {
            self.held.release(command);
            self.hold_frames[command.index()] = 0;
        }
    }

    fn hold(&mut self, command: Command) {
        if !self.release_events {
            // No release will arrive for the other direction
            let opposite = command.opposite();
            self.held.release(opposite);
            self.hold_frames[opposite.index()] = 0;
            self.hold_frames[command.index()] = FALLBACK_HOLD_FRAMES;
        }
        self.held.press(command);
    }

    pub fn held(&self) -> HeldCommands {
        self.held
    }

    /// One-shot actions from the last poll, in arrival order
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Forgets held keys, e.g. when pausing
    pub fn release_all(&mut self) {
        self.held.clear();
        self.hold_frames = [0; Command::COUNT];
    }
}
