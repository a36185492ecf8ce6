use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};

use volley::app::App;
use volley::consts::LOG_FILE;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    volley::logging::init(LOG_FILE)?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!("keyboard enhancement supported: {supports_keyboard_enhancement}");
    if !supports_keyboard_enhancement {
        log::warn!("no key release events, movement keys fall back to auto-repeat holds");
    }

    enable_raw_mode()?;
    let result = run(supports_keyboard_enhancement);
    // Restore even when setup or the frame loop failed
    let restored = restore_terminal(supports_keyboard_enhancement);

    if let Err(err) = &result {
        log::error!("frame loop failed: {err}");
    }
    if let Err(err) = &restored {
        log::error!("terminal restore failed: {err}");
    }
    result?;
    restored?;
    Ok(())
}

/// Everything between raw mode on and raw mode off
fn run(supports_keyboard_enhancement: bool) -> color_eyre::Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    App::new(supports_keyboard_enhancement).run(&mut terminal)
}

/// Runs every restore step, then reports the first one that failed.
fn restore_terminal(supports_keyboard_enhancement: bool) -> io::Result<()> {
    let mut stdout = stdout();
    let pop_flags = if supports_keyboard_enhancement {
        execute!(stdout, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    first_error([
        pop_flags,
        disable_raw_mode(),
        execute!(stdout, LeaveAlternateScreen),
        execute!(stdout, Show),
    ])
}

fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().fold(Ok(()), |first, step| first.and(step))
}
