use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use thiserror::Error;

use crate::geometry::Size;
use crate::runtime::DungeonRuntime;
use crate::DungeonError;

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("runtime error: {0}")]
    Runtime(#[from] DungeonError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Minimal terminal driver that owns a [`DungeonRuntime`] and manages raw
/// mode + alternate screen transitions. The screen state is released on
/// every exit path, including runtime errors, so the viewport subscription
/// never outlives the view.
pub struct CliDriver {
    runtime: DungeonRuntime,
}

impl CliDriver {
    pub fn new(mut runtime: DungeonRuntime) -> Self {
        runtime.config_mut().position_frames = true;
        Self { runtime }
    }

    pub fn run(mut self) -> DriverResult<()> {
        let mut stdout = io::stdout();
        self.enter(&mut stdout)?;
        let result = self.run_inner(&mut stdout);
        self.exit(&mut stdout);
        result
    }

    fn run_inner(&mut self, stdout: &mut impl Write) -> DriverResult<()> {
        let (width, height) = terminal::size()?;
        self.runtime.resize(Size::new(width, height))?;
        self.runtime.run(stdout)?;
        Ok(())
    }

    fn enter(&self, stdout: &mut impl Write) -> DriverResult<()> {
        terminal::enable_raw_mode().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(())
    }

    fn exit(&self, stdout: &mut impl Write) {
        execute!(stdout, Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}
