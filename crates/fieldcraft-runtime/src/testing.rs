use crate::command::Command;
use crate::model::Model;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Drives a [`Model`] without a terminal.
///
/// Immediate messages returned by `update` are queued and processed by
/// [`drain_messages`](TestProgram::drain_messages); async commands are
/// dropped, so a test feeds their results back with [`send`](TestProgram::send).
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Screen>::new(flags);
/// prog.send(Msg::Key(key));
/// prog.drain_messages();
/// assert!(prog.render_string(60, 30).contains("checking"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: Vec<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    pub fn new(flags: M::Flags) -> Self {
        let (model, cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: Vec::new(),
            quit: false,
        };
        program.collect(cmd);
        program
    }

    /// Run one update; its immediate messages are queued, not processed.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process queued messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending.is_empty() {
            let messages: Vec<_> = self.pending.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Whether any update so far asked to quit.
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render into a `width` x `height` buffer and return its rows joined by
    /// newlines.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let mut terminal = match Terminal::new(TestBackend::new(width, height)) {
            Ok(terminal) => terminal,
            Err(never) => match never {},
        };
        if let Err(never) = terminal.draw(|frame| self.model.view(frame)) {
            match never {}
        }
        let buf = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        self.quit |= cmd.is_quit();
        self.pending.extend(cmd.into_messages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Steps {
        log: Vec<&'static str>,
    }

    enum Msg {
        Start,
        Step(&'static str),
        Stop,
    }

    impl Model for Steps {
        type Message = Msg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<Msg>) {
            (Steps { log: vec![] }, Command::message(Msg::Step("init")))
        }

        fn update(&mut self, msg: Msg) -> Command<Msg> {
            match msg {
                Msg::Start => Command::batch([
                    Command::message(Msg::Step("a")),
                    Command::message(Msg::Step("b")),
                ]),
                Msg::Step(s) => {
                    self.log.push(s);
                    Command::none()
                }
                Msg::Stop => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.log.join(",")), frame.area());
        }
    }

    #[test]
    fn init_messages_wait_for_drain() {
        let mut prog = TestProgram::<Steps>::new(());
        assert!(prog.model().log.is_empty());
        prog.drain_messages();
        assert_eq!(prog.model().log, vec!["init"]);
    }

    #[test]
    fn batched_messages_arrive_in_order() {
        let mut prog = TestProgram::<Steps>::new(());
        prog.send(Msg::Start);
        prog.drain_messages();
        assert_eq!(prog.model().log, vec!["init", "a", "b"]);
        assert!(prog.render_string(20, 1).starts_with("init,a,b"));
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Steps>::new(());
        assert!(!prog.has_quit());
        prog.send(Msg::Stop);
        assert!(prog.has_quit());
    }
}
