use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// A whole screen: the top of the init, update, view cycle.
///
/// [`Program`](crate::Program) calls [`init`](Model::init) once, renders with
/// [`view`](Model::view), and then feeds every message from subscriptions and
/// commands through [`update`](Model::update) until a command quits.
pub trait Model: Sized + Send + 'static {
    type Message: Send + 'static;

    /// Startup data handed to [`Model::init`].
    type Flags: Send + 'static;

    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    fn view(&self, frame: &mut Frame);

    /// Event sources that should be running for the current state. Compared
    /// by id after every update; new ones start and missing ones stop.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
