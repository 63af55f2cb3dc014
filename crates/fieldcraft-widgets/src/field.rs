//! Single-line text field whose edits are decided by a [`FieldKind`] policy.
//!
//! The field owns the text buffer and the cursor. Every mutation, whether a
//! typed character, a deletion or a paste, is expressed as an
//! [`EditProposal`] and run through [`policy::apply`]. The field then honours
//! the decision: an accepted edit lands as typed, an override replaces the
//! whole text, a rejection leaves the buffer untouched.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fieldcraft_core::{policy, CounterTier, DerivedState, EditProposal, FieldKind};
use fieldcraft_runtime::{Command, Component};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::theme;

/// Controls how the field text is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoMode {
    /// Display characters as typed.
    #[default]
    Normal,
    /// Display each character as the given mask character.
    Password(char),
}

/// Style configuration for a field.
#[derive(Debug, Clone)]
pub struct FieldStyle {
    pub text: Style,
    pub placeholder: Style,
    pub cursor: Style,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Messages for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A keyboard event to process.
    KeyPress(KeyEvent),
    /// Paste text at the cursor.
    Paste(String),
    /// Emitted when the text changes.
    Changed(String),
    /// Emitted when the policy refuses an edit.
    Rejected,
    /// Emitted when Enter is pressed.
    Submit(String),
}

/// A policy-driven text field.
///
/// # Example
///
/// ```ignore
/// use fieldcraft_core::FieldKind;
/// use fieldcraft_runtime::Component;
/// use fieldcraft_widgets::field::{Message, PolicyField};
///
/// let mut field = PolicyField::new("Only characters", FieldKind::masked());
/// field.focus();
/// field.update(Message::Paste("ab12cd34ef".into()));
/// assert_eq!(field.value(), "abcde-1234");
/// ```
#[derive(Debug, Clone)]
pub struct PolicyField {
    kind: FieldKind,
    title: String,
    placeholder: String,
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    echo_mode: EchoMode,
    state: DerivedState,
    style: FieldStyle,
}

impl PolicyField {
    /// Create an empty field. Password fields echo `*` by default.
    pub fn new(title: impl Into<String>, kind: FieldKind) -> Self {
        let placeholder = match &kind {
            FieldKind::Masked(mask) => mask.placeholder(),
            FieldKind::UrlLink { .. } => "www.example.com".to_owned(),
            FieldKind::Password => "Password".to_owned(),
            FieldKind::NoDigits | FieldKind::LimitedInput { .. } => "Type here".to_owned(),
        };
        let echo_mode = if kind == FieldKind::Password {
            EchoMode::Password('*')
        } else {
            EchoMode::Normal
        };
        let state = policy::derive(&kind, "");
        Self {
            kind,
            title: title.into(),
            placeholder,
            value: Vec::new(),
            cursor: 0,
            focus: false,
            echo_mode,
            state,
            style: FieldStyle::default(),
        }
    }

    /// Replace the placeholder shown while the field is empty and unfocused.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    pub fn with_style(mut self, style: FieldStyle) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Set the text directly, bypassing the edit policy, and move the cursor
    /// to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
        self.state = policy::derive(&self.kind, value);
    }

    /// Cursor position as a character index.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Display state derived from the current text.
    pub fn state(&self) -> &DerivedState {
        &self.state
    }

    /// Give the field focus and run the kind's focus hook.
    ///
    /// Returns `true` when the hook replaced the text. The replacement is not
    /// reported as [`Message::Changed`], since nobody typed it.
    pub fn focus(&mut self) -> bool {
        self.focus = true;
        let current = self.value();
        let Some(replacement) = policy::on_focus(&self.kind, &current) else {
            return false;
        };
        if replacement == current {
            return false;
        }
        tracing::debug!(field = %self.title, "focus hook replaced text");
        self.set_value(&replacement);
        true
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Rows needed to draw the field, border included.
    pub fn height(&self) -> u16 {
        3
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let len = self.value.len();
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return Command::none();
                }
                self.edit(0, self.cursor, "")
            }
            (KeyCode::Char('k'), m) if m.contains(KeyModifiers::CONTROL) => {
                if self.cursor == len {
                    return Command::none();
                }
                self.edit(self.cursor, len - self.cursor, "")
            }
            (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
                Command::none()
            }
            (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.cursor = len;
                Command::none()
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let mut buf = [0; 4];
                let typed: &str = c.encode_utf8(&mut buf);
                self.edit(self.cursor, 0, typed)
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return Command::none();
                }
                self.edit(self.cursor - 1, 1, "")
            }
            (KeyCode::Delete, _) => {
                if self.cursor == len {
                    return Command::none();
                }
                self.edit(self.cursor, 1, "")
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                Command::none()
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(len);
                Command::none()
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                Command::none()
            }
            (KeyCode::End, _) => {
                self.cursor = len;
                Command::none()
            }
            (KeyCode::Enter, _) => Command::message(Message::Submit(self.value())),
            _ => Command::none(),
        }
    }

    fn edit(&mut self, start: usize, length: usize, replacement: &str) -> Command<Message> {
        let current = self.value();
        let proposal = EditProposal::new(&current, start, length, replacement);
        let outcome = policy::apply(&self.kind, &proposal);
        self.state = outcome.state;

        let cursor = match (&outcome.decision.override_text, outcome.decision.accept) {
            (Some(text), _) => text.chars().count(),
            (None, true) => start + replacement.chars().count(),
            (None, false) => {
                tracing::trace!(field = %self.title, "edit rejected");
                return Command::message(Message::Rejected);
            }
        };

        self.value = outcome.text.chars().collect();
        self.cursor = cursor.min(self.value.len());
        if outcome.text == current {
            return Command::none();
        }
        Command::message(Message::Changed(outcome.text))
    }

    fn display_chars(&self) -> Vec<char> {
        match self.echo_mode {
            EchoMode::Normal => self.value.clone(),
            EchoMode::Password(mask) => vec![mask; self.value.len()],
        }
    }

    fn counter(&self) -> Option<(i64, CounterTier)> {
        match self.state {
            DerivedState::Counter(counter) => Some((counter.remaining, counter.tier)),
            DerivedState::None | DerivedState::Password(_) => None,
        }
    }
}

impl Component for PolicyField {
    type Message = Message;

    /// Ignores input unless the field is focused.
    fn update(&mut self, msg: Message) -> Command<Message> {
        if !self.focus {
            return Command::none();
        }
        match msg {
            Message::KeyPress(key) => self.handle_key(key),
            Message::Paste(text) => {
                if text.is_empty() {
                    Command::none()
                } else {
                    self.edit(self.cursor, 0, &text)
                }
            }
            Message::Changed(_) | Message::Rejected | Message::Submit(_) => Command::none(),
        }
    }

    /// Render into `area`, border included.
    fn view(&self, frame: &mut Frame, area: Rect) {
        let counter = self.counter();
        let error = counter.is_some_and(|(_, tier)| tier.highlights_border());
        let block = theme::field_block(&self.title, self.focus, error);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text_area = if let Some((remaining, tier)) = counter {
            let width = counter_width(remaining);
            let [text_area, counter_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(width)]).areas(inner);
            let label = Paragraph::new(remaining.to_string())
                .alignment(Alignment::Right)
                .style(Style::default().fg(theme::counter_color(tier)));
            frame.render_widget(label, counter_area);
            text_area
        } else {
            inner
        };

        let display = self.display_chars();
        let mut spans = Vec::new();
        if display.is_empty() && !self.focus {
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
        } else if !self.focus {
            let (start, end) = visible_window(&display, 0, text_area.width as usize);
            spans.push(Span::styled(
                display[start..end].iter().collect::<String>(),
                self.style.text,
            ));
        } else {
            let (start, end) = visible_window(&display, self.cursor, text_area.width as usize);
            let before: String = display[start..self.cursor].iter().collect();
            if !before.is_empty() {
                spans.push(Span::styled(before, self.style.text));
            }
            match display.get(self.cursor) {
                Some(c) => spans.push(Span::styled(c.to_string(), self.style.cursor)),
                None => spans.push(Span::styled(" ", self.style.cursor)),
            }
            if self.cursor + 1 < end {
                let after: String = display[self.cursor + 1..end].iter().collect();
                spans.push(Span::styled(after, self.style.text));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), text_area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

/// Columns for the remaining-character counter, one separator included.
fn counter_width(remaining: i64) -> u16 {
    u16::try_from(remaining.to_string().len() + 1).unwrap_or(u16::MAX)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Character range of `chars` to draw in `width` columns so that the cursor
/// cell stays visible.
fn visible_window(chars: &[char], cursor: usize, width: usize) -> (usize, usize) {
    let cursor = cursor.min(chars.len());
    let cursor_cell = chars.get(cursor).copied().map_or(1, char_width).max(1);
    let mut start = 0;
    let mut before: usize = chars[..cursor].iter().copied().map(char_width).sum();
    while start < cursor && before + cursor_cell > width {
        before -= char_width(chars[start]);
        start += 1;
    }
    let mut end = start;
    let mut used = 0;
    while end < chars.len() && used + char_width(chars[end]) <= width {
        used += char_width(chars[end]);
        end += 1;
    }
    (start, end.max(cursor.min(chars.len())))
}
