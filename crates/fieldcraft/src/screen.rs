//! The text fields screen: the demonstration form wired to link checks.
//!
//! Edits of the link field turn into reachability checks run as
//! [`Command::perform`]; their outcomes come back as [`Msg::LinkChecked`].
//! Pressing Enter in the link field while it shows a reachable link opens the
//! link with the system handler.

use std::future::IntoFuture;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fieldcraft_core::FieldKind;
use fieldcraft_probe::{LinkMonitor, ProbeOutcome};
use fieldcraft_runtime::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use fieldcraft_widgets::field;
use fieldcraft_widgets::form::{self, FieldForm, LinkStatus};
use ratatui::Frame;

/// Messages for [`TextFieldsScreen`].
#[derive(Debug)]
pub enum Msg {
    Form(form::Message),
    /// A link check finished. `None` when it was superseded.
    LinkChecked(Option<ProbeOutcome>),
    /// The system handler was asked to open a link.
    LinkOpened(Result<(), String>),
    Resized,
    Quit,
}

/// The five policy fields on one scrolling screen.
pub struct TextFieldsScreen {
    form: FieldForm,
    monitor: LinkMonitor,
}

impl TextFieldsScreen {
    pub fn form(&self) -> &FieldForm {
        &self.form
    }

    pub fn monitor(&self) -> &LinkMonitor {
        &self.monitor
    }

    fn is_link_field(&self, index: usize) -> bool {
        self.form
            .field(index)
            .is_some_and(|field| matches!(field.kind(), FieldKind::UrlLink { .. }))
    }

    fn check_link(&mut self, text: String) -> Command<Msg> {
        // Clearing the field, or leaving only the prefix, means nothing to check.
        if text.is_empty() || text == self.monitor.prefix() {
            self.monitor.cancel();
            self.form.set_link_status(LinkStatus::Idle);
            return Command::none();
        }
        match self.monitor.submit(&text) {
            Ok(pending) => {
                self.form
                    .set_link_status(LinkStatus::Checking(pending.url().to_string()));
                Command::perform(pending.into_future(), Msg::LinkChecked)
            }
            Err(err) => {
                self.form.set_link_status(LinkStatus::Unreachable {
                    url: text,
                    reason: err.to_string(),
                });
                Command::none()
            }
        }
    }

    fn open_link(&self) -> Command<Msg> {
        let LinkStatus::Reachable(url) = self.form.link_status() else {
            return Command::none();
        };
        let url = url.clone();
        tracing::info!(%url, "opening link");
        Command::perform(
            async move { open::that_detached(&url).map_err(|err| err.to_string()) },
            Msg::LinkOpened,
        )
    }

    fn apply_outcome(&mut self, outcome: ProbeOutcome) {
        if !self.monitor.is_current(&outcome) {
            tracing::trace!(generation = outcome.generation, "stale link outcome ignored");
            return;
        }
        let url = outcome.url.to_string();
        let status = match outcome.result {
            Ok(()) => LinkStatus::Reachable(url),
            Err(err) => LinkStatus::Unreachable {
                url,
                reason: err.to_string(),
            },
        };
        self.form.set_link_status(status);
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

impl Model for TextFieldsScreen {
    type Message = Msg;
    type Flags = LinkMonitor;

    fn init(monitor: LinkMonitor) -> (Self, Command<Msg>) {
        let screen = Self {
            form: FieldForm::demo(),
            monitor,
        };
        (screen, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Form(form::Message::LinkEdited { text, .. }) => self.check_link(text),
            Msg::Form(form::Message::Field(index, field::Message::Submit(value))) => {
                tracing::info!(index, %value, "field submitted");
                if self.is_link_field(index) {
                    self.open_link()
                } else {
                    Command::none()
                }
            }
            Msg::Form(msg) => self.form.update(msg).map(Msg::Form),
            Msg::LinkChecked(Some(outcome)) => {
                self.apply_outcome(outcome);
                Command::none()
            }
            Msg::LinkChecked(None) | Msg::Resized => Command::none(),
            Msg::LinkOpened(Ok(())) => Command::none(),
            Msg::LinkOpened(Err(err)) => {
                tracing::warn!(%err, "could not open link");
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.form.view(frame, area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit_key(&key) {
                    Some(Msg::Quit)
                } else {
                    Some(Msg::Form(form::Message::Key(key)))
                }
            }
            TerminalEvent::Paste(text) => Some(Msg::Form(form::Message::Paste(text))),
            TerminalEvent::Resize(..) => Some(Msg::Resized),
            _ => None,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use fieldcraft_probe::{CanOpenProbe, ProbeError};
    use fieldcraft_runtime::testing::TestProgram;
    use std::sync::Arc;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn program() -> TestProgram<TextFieldsScreen> {
        let monitor =
            LinkMonitor::with_probe("https://", Arc::new(CanOpenProbe), Duration::from_secs(5));
        TestProgram::new(monitor)
    }

    fn press(prog: &mut TestProgram<TextFieldsScreen>, key: KeyEvent) {
        prog.send(Msg::Form(form::Message::Key(key)));
        prog.drain_messages();
    }

    fn type_str(prog: &mut TestProgram<TextFieldsScreen>, s: &str) {
        for c in s.chars() {
            press(prog, key(KeyCode::Char(c)));
        }
    }

    fn focus_link(prog: &mut TestProgram<TextFieldsScreen>) {
        for _ in 0..3 {
            press(prog, key(KeyCode::Tab));
        }
        assert_eq!(prog.model().form().focused_index(), 3);
    }

    fn outcome(generation: u64, url: &str, result: Result<(), ProbeError>) -> ProbeOutcome {
        ProbeOutcome {
            generation,
            url: url.parse().unwrap(),
            result,
        }
    }

    #[test]
    fn typing_a_link_starts_a_check() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a.io");
        assert_eq!(
            prog.model().form().link_status(),
            &LinkStatus::Checking("https://a.io/".into())
        );
        assert_eq!(prog.model().monitor().generation(), 4);
        assert!(prog.render_string(60, 30).contains("checking https://a.io/"));
    }

    #[test]
    fn check_is_issued_as_async_command() {
        let mut prog = program();
        let cmd = prog.model_mut().update(Msg::Form(form::Message::LinkEdited {
            index: 3,
            text: "https://a.io".into(),
        }));
        assert!(cmd.has_future());
    }

    #[test]
    fn current_outcome_updates_status() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a.io");
        let generation = prog.model().monitor().generation();
        prog.send(Msg::LinkChecked(Some(outcome(generation, "https://a.io/", Ok(())))));
        assert_eq!(
            prog.model().form().link_status(),
            &LinkStatus::Reachable("https://a.io/".into())
        );
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a.io");
        prog.send(Msg::LinkChecked(Some(outcome(
            1,
            "https://a/",
            Err(ProbeError::Status(404)),
        ))));
        assert_eq!(
            prog.model().form().link_status(),
            &LinkStatus::Checking("https://a.io/".into())
        );
    }

    #[test]
    fn clearing_link_field_returns_to_idle() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a.io");
        let before = prog.model().monitor().generation();

        press(&mut prog, ctrl('u'));
        assert_eq!(prog.model().form().field(3).map(|f| f.value()), Some(String::new()));
        assert_eq!(prog.model().form().link_status(), &LinkStatus::Idle);
        assert!(prog.model().monitor().generation() > before);
    }

    #[test]
    fn bare_prefix_returns_to_idle() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a");
        press(&mut prog, key(KeyCode::Backspace));
        let value = prog.model().form().field(3).map(|f| f.value());
        assert_eq!(value.as_deref(), Some("https://"));
        assert_eq!(prog.model().form().link_status(), &LinkStatus::Idle);
    }

    #[test]
    fn enter_on_reachable_link_opens_it() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a.io");
        let generation = prog.model().monitor().generation();
        prog.send(Msg::LinkChecked(Some(outcome(generation, "https://a.io/", Ok(())))));

        let cmd = prog.model_mut().update(Msg::Form(form::Message::Field(
            3,
            field::Message::Submit("https://a.io".into()),
        )));
        assert!(cmd.has_future());
    }

    #[test]
    fn enter_while_checking_does_nothing() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a.io");
        let cmd = prog.model_mut().update(Msg::Form(form::Message::Field(
            3,
            field::Message::Submit("https://a.io".into()),
        )));
        assert!(cmd.is_none());
    }

    #[test]
    fn enter_in_other_field_does_not_open() {
        let mut prog = program();
        prog.model_mut()
            .form
            .set_link_status(LinkStatus::Reachable("https://a.io/".into()));
        let cmd = prog.model_mut().update(Msg::Form(form::Message::Field(
            0,
            field::Message::Submit(String::new()),
        )));
        assert!(cmd.is_none());
    }

    #[test]
    fn superseded_check_changes_nothing() {
        let mut prog = program();
        focus_link(&mut prog);
        type_str(&mut prog, "a.io");
        prog.send(Msg::LinkChecked(None));
        assert!(matches!(prog.model().form().link_status(), LinkStatus::Checking(_)));
    }

    #[test]
    fn quit_message_quits() {
        let mut prog = program();
        prog.send(Msg::Quit);
        assert!(prog.has_quit());
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&key(KeyCode::Esc)));
        assert!(is_quit_key(&ctrl('c')));
        assert!(!is_quit_key(&key(KeyCode::Char('c'))));
    }
}
