//! Interactive selector drawn on the alternate screen of stderr
//!
//! The picker only ever writes to stderr and reads keys from the
//! controlling terminal, so `--print` output on stdout can be captured.

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use std::io::{self, IsTerminal};

use super::{Choice, Picker, PickerResult, SelectError, Selector, Theme};

/// Prompts on the controlling terminal, one full-screen picker per call.
///
/// Blocks until the operator submits or cancels; there is no timeout.
#[derive(Default)]
pub struct TerminalSelector {
    theme: Theme,
}

impl TerminalSelector {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn run(&self, picker: &mut Picker) -> Result<Option<usize>, SelectError> {
        let picked = {
            let _screen = ScreenGuard::enter()?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
            drive(&mut terminal, picker, &self.theme, event::read)?
        };

        // Back on the main screen: leave the answer in the scrollback
        eprintln!("{}", summary_line(picker, picked));
        Ok(picked)
    }
}

impl Selector for TerminalSelector {
    fn select<T: Clone>(&mut self, message: &str, choices: &[Choice<T>]) -> Result<T, SelectError> {
        if choices.is_empty() {
            return Err(SelectError::NoChoices);
        }
        if !io::stdin().is_terminal() {
            return Err(SelectError::NotInteractive);
        }

        let labels = choices.iter().map(|c| c.label.clone()).collect();
        let mut picker = Picker::new(message, labels);

        match self.run(&mut picker)? {
            Some(idx) => {
                tracing::debug!("{} picked {}", message, choices[idx].label);
                Ok(choices[idx].value.clone())
            }
            None => Err(SelectError::Cancelled),
        }
    }
}

/// Draws `picker` and feeds it key presses until it submits or cancels.
///
/// Uses the terminal's full-screen viewport, which never asks the terminal
/// where its cursor is.
fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    picker: &mut Picker,
    theme: &Theme,
    mut next_event: impl FnMut() -> io::Result<Event>,
) -> io::Result<Option<usize>> {
    loop {
        terminal.draw(|f| {
            let screen = f.area();
            let area = Rect {
                height: picker.height().min(screen.height),
                ..screen
            };
            picker.render(f, area, theme);
        })?;

        if let Event::Key(key) = next_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match picker.handle_key(key) {
                PickerResult::Continue => {}
                PickerResult::Cancel => return Ok(None),
                PickerResult::Submit(idx) => return Ok(Some(idx)),
            }
        }
    }
}

/// One-line record of an answered (or abandoned) prompt.
fn summary_line(picker: &Picker, picked: Option<usize>) -> String {
    match picked.and_then(|idx| picker.label(idx)) {
        Some(label) => format!(
            "{} {} {}",
            "✔".green().bold(),
            picker.message().bold(),
            label.cyan()
        ),
        None => format!("{} {}", "✖".red().bold(), picker.message().bold()),
    }
}

/// Raw mode plus the alternate screen on stderr, both undone on drop.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stderr(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
