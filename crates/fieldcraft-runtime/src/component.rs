use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A widget with its own messages that renders into an area chosen by its
/// parent.
///
/// Parents wrap the child's messages in one of their own variants and lift
/// the returned command with [`Command::map`]:
///
/// ```rust,ignore
/// Msg::Form(m) => self.form.update(m).map(Msg::Form),
/// ```
///
/// Notifications (a field's `Changed`, a form's `LinkEdited`) travel the same
/// way: the child returns them as [`Command::message`], and the parent sees
/// them on the next update and may act before forwarding.
pub trait Component: Send + 'static {
    type Message: Send + 'static;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render inside `area` only.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component takes keyboard input.
    fn focused(&self) -> bool {
        false
    }
}
