use crossterm::event::{Event, KeyEvent, MouseEvent};

/// Terminal input delivered through [`terminal_events`](crate::terminal_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste content.
    Paste(String),
    /// New size as (columns, rows).
    Resize(u16, u16),
    /// The terminal window gained (`true`) or lost focus.
    Focus(bool),
}

impl From<Event> for TerminalEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => TerminalEvent::Key(key),
            Event::Mouse(mouse) => TerminalEvent::Mouse(mouse),
            Event::Paste(text) => TerminalEvent::Paste(text),
            Event::Resize(cols, rows) => TerminalEvent::Resize(cols, rows),
            Event::FocusGained => TerminalEvent::Focus(true),
            Event::FocusLost => TerminalEvent::Focus(false),
        }
    }
}
