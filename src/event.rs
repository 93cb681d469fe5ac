use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

#[derive(Debug, Clone, Copy)]
pub enum Input {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// Next pending key press or mouse event without blocking the runtime.
/// Releases, focus changes and resizes are skipped.
pub fn next_input() -> color_eyre::Result<Option<Input>> {
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(Input::Key(key))),
            Event::Mouse(mouse) => return Ok(Some(Input::Mouse(mouse))),
            _ => continue,
        }
    }
    Ok(None)
}
