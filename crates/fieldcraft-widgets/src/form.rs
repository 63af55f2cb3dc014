//! A scrolling column of policy fields with focus cycling.
//!
//! The form stacks its fields vertically, draws a strength meter under
//! password fields and a status line under link fields, and scrolls so the
//! focused field is never hidden below the bottom edge.
//!
//! Field notifications come back through [`FieldForm::update`] wrapped in
//! [`Message::Field`]. The form turns a text change in a link field into
//! [`Message::LinkEdited`] for the screen to act on.

use crossterm::event::{KeyCode, KeyEvent};
use fieldcraft_core::{DerivedState, FieldKind};
use fieldcraft_runtime::{Command, Component};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::field::{self, PolicyField};
use crate::focus::FocusRing;
use crate::strength::StrengthMeter;

/// Rows kept between a focused field and the bottom edge after scrolling.
pub const SCROLL_MARGIN: u16 = 1;

const HEADER_HEIGHT: u16 = 2;
const HELP_HEIGHT: u16 = 1;

/// Reachability of the link typed into a link field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkStatus {
    #[default]
    Idle,
    Checking(String),
    Reachable(String),
    Unreachable { url: String, reason: String },
}

/// Messages for a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key for the form. Tab and Shift+Tab move focus, everything else
    /// goes to the focused field.
    Key(KeyEvent),
    /// Paste into the focused field.
    Paste(String),
    FocusNext,
    FocusPrev,
    /// A message for, or a notification from, the field at an index.
    Field(usize, field::Message),
    /// Emitted when focus moves to another field.
    FocusChanged(usize),
    /// Emitted when the text of a link field was edited.
    LinkEdited { index: usize, text: String },
}

/// Vertical extent of one field and its extras, in content rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Section {
    top: u16,
    height: u16,
}

impl Section {
    fn bottom(self) -> u16 {
        self.top + self.height
    }
}

/// A form of policy fields.
#[derive(Debug, Clone)]
pub struct FieldForm {
    title: String,
    fields: Vec<PolicyField>,
    ring: FocusRing,
    link_status: LinkStatus,
}

impl FieldForm {
    /// Create a form and focus its first field.
    pub fn new(title: impl Into<String>, fields: Vec<PolicyField>) -> Self {
        let ring = FocusRing::new(fields.len());
        let mut form = Self {
            title: title.into(),
            fields,
            ring,
            link_status: LinkStatus::Idle,
        };
        if let Some(first) = form.fields.first_mut() {
            first.focus();
        }
        form
    }

    /// The five-field demonstration screen.
    pub fn demo() -> Self {
        Self::new(
            "Text Fields",
            vec![
                PolicyField::new("NO digits field", FieldKind::NoDigits),
                PolicyField::new("Input limit", FieldKind::limited(10)),
                PolicyField::new("Only characters", FieldKind::masked()),
                PolicyField::new("Link", FieldKind::https_link()),
                PolicyField::new("Validation rules", FieldKind::Password),
            ],
        )
    }

    pub fn fields(&self) -> &[PolicyField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&PolicyField> {
        self.fields.get(index)
    }

    /// Index of the focused field.
    pub fn focused_index(&self) -> usize {
        self.ring.focused()
    }

    pub fn link_status(&self) -> &LinkStatus {
        &self.link_status
    }

    pub fn set_link_status(&mut self, status: LinkStatus) {
        self.link_status = status;
    }

    fn move_focus(&mut self, from: usize, to: usize) -> Command<Message> {
        if from == to {
            return Command::none();
        }
        if let Some(field) = self.fields.get_mut(from) {
            field.blur();
        }
        if let Some(field) = self.fields.get_mut(to) {
            field.focus();
        }
        tracing::debug!(from, to, "focus moved");
        Command::message(Message::FocusChanged(to))
    }

    fn sections(&self) -> Vec<Section> {
        let mut top = HEADER_HEIGHT;
        self.fields
            .iter()
            .map(|field| {
                let mut height = field.height();
                match (field.kind(), field.state()) {
                    (FieldKind::UrlLink { .. }, _) => height += 1,
                    (_, DerivedState::Password(_)) => height += StrengthMeter::HEIGHT,
                    _ => {}
                }
                let section = Section { top, height };
                top += height;
                section
            })
            .collect()
    }

    /// Rows of content, header included.
    pub fn content_height(&self) -> u16 {
        self.sections()
            .last()
            .map_or(HEADER_HEIGHT, |section| section.bottom())
    }

    /// Scroll offset for a viewport of `viewport` rows that keeps the focused
    /// field visible.
    ///
    /// Nothing scrolls while the field fits. Once its bottom edge would fall
    /// below the viewport, content moves up until the field sits
    /// [`SCROLL_MARGIN`] rows above the bottom.
    pub fn scroll_offset(&self, viewport: u16) -> u16 {
        let Some(section) = self.sections().get(self.ring.focused()).copied() else {
            return 0;
        };
        if section.bottom() <= viewport {
            return 0;
        }
        let max_scroll = self.content_height().saturating_sub(viewport);
        (section.bottom() - viewport + SCROLL_MARGIN)
            .min(max_scroll)
            .min(section.top)
    }
}

impl Component for FieldForm {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Key(key) => match key.code {
                KeyCode::Tab => self.update(Message::FocusNext),
                KeyCode::BackTab => self.update(Message::FocusPrev),
                _ => {
                    let index = self.ring.focused();
                    self.update(Message::Field(index, field::Message::KeyPress(key)))
                }
            },
            Message::Paste(text) => {
                let index = self.ring.focused();
                self.update(Message::Field(index, field::Message::Paste(text)))
            }
            Message::FocusNext => {
                let from = self.ring.focused();
                let to = self.ring.next();
                self.move_focus(from, to)
            }
            Message::FocusPrev => {
                let from = self.ring.focused();
                let to = self.ring.prev();
                self.move_focus(from, to)
            }
            Message::Field(index, msg) => {
                let Some(target) = self.fields.get_mut(index) else {
                    return Command::none();
                };
                match msg {
                    field::Message::Changed(text)
                        if matches!(target.kind(), FieldKind::UrlLink { .. }) =>
                    {
                        Command::message(Message::LinkEdited { index, text })
                    }
                    msg => target
                        .update(msg)
                        .map(move |msg| Message::Field(index, msg)),
                }
            }
            Message::FocusChanged(_) | Message::LinkEdited { .. } => Command::none(),
        }
    }

    /// Render the whole form into `area`.
    ///
    /// A field box is drawn whenever it fits in the viewport. Its strength
    /// meter or link status line is clipped to the rows left below it.
    fn view(&self, frame: &mut Frame, area: Rect) {
        let viewport = area.height.saturating_sub(HELP_HEIGHT);
        let scroll = self.scroll_offset(viewport);

        if scroll == 0 && viewport > 0 {
            let title = Paragraph::new(self.title.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
            frame.render_widget(title, Rect { height: 1, ..area });
        }

        for (field, section) in self.fields.iter().zip(self.sections()) {
            let Some(top) = section.top.checked_sub(scroll) else {
                continue;
            };
            let field_bottom = top + field.height();
            if field_bottom > viewport {
                continue;
            }
            field.view(
                frame,
                Rect::new(area.x, area.y + top, area.width, field.height()),
            );

            let extra_height = (section.height - field.height()).min(viewport - field_bottom);
            if extra_height == 0 {
                continue;
            }
            let extra = Rect::new(area.x, area.y + field_bottom, area.width, extra_height);
            match (field.kind(), field.state()) {
                (FieldKind::UrlLink { .. }, _) => {
                    frame.render_widget(link_status_line(&self.link_status), extra);
                }
                (_, DerivedState::Password(state)) => {
                    frame.render_widget(StrengthMeter::new(state), extra);
                }
                _ => {}
            }
        }

        if area.height > 0 {
            let help_area = Rect::new(area.x, area.bottom() - 1, area.width, HELP_HEIGHT);
            frame.render_widget(help_line(), help_area);
        }
    }

    fn focused(&self) -> bool {
        self.fields.iter().any(PolicyField::focused)
    }
}

fn link_status_line(status: &LinkStatus) -> Line<'_> {
    match status {
        LinkStatus::Idle => Line::default(),
        LinkStatus::Checking(url) => Line::styled(
            format!(" checking {url}"),
            Style::default().fg(Color::Yellow),
        ),
        LinkStatus::Reachable(url) => Line::styled(
            format!(" \u{2713} {url}"),
            Style::default().fg(Color::Green),
        ),
        LinkStatus::Unreachable { url, reason } => Line::styled(
            format!(" \u{2717} {url}: {reason}"),
            Style::default().fg(Color::Red),
        ),
    }
}

fn help_line() -> Paragraph<'static> {
    let key = Style::default().fg(Color::Cyan);
    Paragraph::new(Line::from(vec![
        Span::styled("Tab", key),
        Span::raw(" next  "),
        Span::styled("Shift+Tab", key),
        Span::raw(" prev  "),
        Span::styled("Esc", key),
        Span::raw(" quit"),
    ]))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::collections::VecDeque;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Run `msg` and every message it leads to, the way the runtime would,
    /// and return the emitted messages in order.
    fn send(form: &mut FieldForm, msg: Message) -> Vec<Message> {
        let mut emitted = Vec::new();
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            for out in form.update(msg).into_messages() {
                emitted.push(out.clone());
                queue.push_back(out);
            }
        }
        emitted
    }

    fn type_str(form: &mut FieldForm, s: &str) -> Vec<Message> {
        s.chars()
            .flat_map(|c| send(form, Message::Key(key(KeyCode::Char(c)))))
            .collect()
    }

    fn tab_to(form: &mut FieldForm, index: usize) {
        while form.focused_index() != index {
            send(form, Message::Key(key(KeyCode::Tab)));
        }
    }

    fn render(form: &FieldForm, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                form.view(frame, area);
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn demo_has_five_fields_and_focuses_first() {
        let form = FieldForm::demo();
        assert_eq!(form.fields().len(), 5);
        assert_eq!(form.focused_index(), 0);
        assert!(form.fields()[0].focused());
        assert!(form.focused());
    }

    #[test]
    fn tab_cycles_and_moves_focus_flags() {
        let mut form = FieldForm::demo();
        assert_eq!(
            send(&mut form, Message::Key(key(KeyCode::Tab))),
            vec![Message::FocusChanged(1)]
        );
        assert!(!form.fields()[0].focused());
        assert!(form.fields()[1].focused());
        assert_eq!(
            send(&mut form, Message::Key(key(KeyCode::BackTab))),
            vec![Message::FocusChanged(0)]
        );
    }

    #[test]
    fn keys_reach_only_the_focused_field() {
        let mut form = FieldForm::demo();
        type_str(&mut form, "a1");
        tab_to(&mut form, 2);
        type_str(&mut form, "ab12cd34ef");
        assert_eq!(form.fields()[0].value(), "a");
        assert_eq!(form.fields()[1].value(), "");
        assert_eq!(form.fields()[2].value(), "abcde-1234");
    }

    #[test]
    fn key_for_unfocused_field_is_ignored() {
        let mut form = FieldForm::demo();
        let msg = Message::Field(2, field::Message::KeyPress(key(KeyCode::Char('a'))));
        assert!(send(&mut form, msg).is_empty());
        assert_eq!(form.fields()[2].value(), "");
    }

    #[test]
    fn link_field_gets_prefix_on_focus_and_reports_edits() {
        let mut form = FieldForm::demo();
        tab_to(&mut form, 3);
        assert_eq!(form.fields()[3].value(), "https://");
        let emitted = type_str(&mut form, "a.io");
        assert_eq!(
            emitted.last(),
            Some(&Message::LinkEdited {
                index: 3,
                text: "https://a.io".into(),
            })
        );
    }

    #[test]
    fn focusing_link_field_reports_no_edit() {
        let mut form = FieldForm::demo();
        let emitted = send(&mut form, Message::Field(0, field::Message::Changed("x".into())));
        assert!(emitted.is_empty());
        tab_to(&mut form, 2);
        let emitted = send(&mut form, Message::Key(key(KeyCode::Tab)));
        assert_eq!(emitted, vec![Message::FocusChanged(3)]);
    }

    #[test]
    fn rejected_digit_is_reported() {
        let mut form = FieldForm::demo();
        assert_eq!(
            send(&mut form, Message::Key(key(KeyCode::Char('5')))),
            vec![Message::Field(0, field::Message::Rejected)]
        );
    }

    #[test]
    fn enter_in_link_field_reports_submit() {
        let mut form = FieldForm::demo();
        tab_to(&mut form, 3);
        assert_eq!(
            send(&mut form, Message::Key(key(KeyCode::Enter))),
            vec![Message::Field(3, field::Message::Submit("https://".into()))]
        );
    }

    #[test]
    fn paste_goes_to_focused_field() {
        let mut form = FieldForm::demo();
        tab_to(&mut form, 1);
        send(&mut form, Message::Paste("HelloWorld!".into()));
        assert_eq!(form.fields()[1].value(), "HelloWorld!");
    }

    #[test]
    fn no_scroll_while_focused_field_fits() {
        let form = FieldForm::demo();
        assert_eq!(form.scroll_offset(10), 0);
    }

    #[test]
    fn scrolls_to_reveal_lower_field() {
        let mut form = FieldForm::demo();
        tab_to(&mut form, 4);
        // Header 2 + four fields (3 + 3 + 3 + 4) = 15; password section is 8.
        assert_eq!(form.content_height(), 23);
        let offset = form.scroll_offset(12);
        // Bottom 23 - viewport 12 + margin 1 = 12, capped by max scroll 11.
        assert_eq!(offset, 11);
    }

    #[test]
    fn scroll_never_hides_field_top() {
        let mut form = FieldForm::demo();
        tab_to(&mut form, 4);
        // The password section (top 15) is taller than a 6-row viewport.
        assert_eq!(form.scroll_offset(6), 15);
    }

    #[test]
    fn renders_titles_and_help() {
        let form = FieldForm::demo();
        let out = render(&form, 50, 30);
        assert!(out.contains("Text Fields"));
        assert!(out.contains("NO digits field"));
        assert!(out.contains("Validation rules"));
        assert!(out.contains("minimum 1 digit"));
        assert!(out.contains("Shift+Tab"));
    }

    #[test]
    fn renders_link_status() {
        let mut form = FieldForm::demo();
        form.set_link_status(LinkStatus::Unreachable {
            url: "https://nope.invalid/".into(),
            reason: "server answered 404".into(),
        });
        let out = render(&form, 70, 30);
        assert!(out.contains("server answered 404"));
    }

    #[test]
    fn small_terminal_shows_focused_field() {
        let mut form = FieldForm::demo();
        tab_to(&mut form, 4);
        let out = render(&form, 50, 10);
        assert!(out.contains("Validation rules"));
        assert!(!out.contains("NO digits field"));
    }

    #[test]
    fn short_viewport_keeps_field_box_and_clips_rules() {
        let mut form = FieldForm::demo();
        tab_to(&mut form, 4);
        for height in [7, 8] {
            let out = render(&form, 50, height);
            assert!(out.contains("Validation rules"), "height {height}:\n{out}");
            assert!(out.contains("Shift+Tab"), "height {height}:\n{out}");
        }
        // Viewport 7 leaves four of the meter's five rows under the box.
        let out = render(&form, 50, 8);
        assert!(out.contains("minimum"));
        assert!(!out.contains("NO digits field"));
    }
}
