use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

use crate::consts::LOG_ENV;

/// Routes `log` output to a file, since the terminal is taken by the game.
///
/// The filter comes from `VOLLEY_LOG` (e.g. `VOLLEY_LOG=debug`), defaulting to `info`.
pub fn init(path: impl AsRef<Path>) -> color_eyre::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path.as_ref())?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::info!("logging to {}", path.as_ref().display());
    Ok(())
}
