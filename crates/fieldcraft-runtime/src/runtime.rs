use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::command::{Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;

/// Errors from terminal setup, drawing, or teardown.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a [`Program`] sets up the terminal.
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("Text Fields".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Redraw rate cap (default 60, clamped to 1..=120).
    pub fps: u32,
    /// Deliver pastes as one event instead of a burst of keys (default on).
    pub bracketed_paste: bool,
    pub title: Option<String>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            bracketed_paste: true,
            title: None,
        }
    }
}

/// Drives a [`Model`] in the real terminal until a command quits.
///
/// The terminal is put into raw mode on the alternate screen with
/// [`ratatui::try_init`], which also restores it if the program panics.
pub struct Program<M: Model> {
    model: M,
    terminal: DefaultTerminal,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;
        let subscriptions = SubscriptionManager::new(msg_tx.clone());

        let mut program = Self {
            model,
            terminal,
            msg_tx,
            msg_rx,
            subscriptions,
            options,
            needs_redraw: true,
            should_quit: false,
        };
        tracing::debug!("program initialized");
        program.execute(init_cmd);
        let subs = program.model.subscriptions();
        program.subscriptions.reconcile(subs);
        Ok(program)
    }

    /// Sender for injecting messages from outside the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.msg_tx.clone()
    }

    /// Run until quit and hand back the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;
        tracing::debug!("shutting down");
        self.subscriptions.shutdown();
        restore_terminal(&self.options);
        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                msg = self.msg_rx.recv() => {
                    // The program holds a sender, so the channel never closes.
                    let Some(msg) = msg else { return Ok(()) };
                    self.process(msg);
                    while let Ok(msg) = self.msg_rx.try_recv() {
                        if self.should_quit {
                            break;
                        }
                        self.process(msg);
                    }
                    if self.should_quit {
                        return Ok(());
                    }
                }
                _ = frames.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
    }

    fn process(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute(cmd);
        let subs = self.model.subscriptions();
        self.subscriptions.reconcile(subs);
        self.needs_redraw = true;
    }

    fn execute(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.send(msg),
            CommandInner::Quit => self.should_quit = true,
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    if tx.send(fut.await).is_err() {
                        tracing::trace!("program exited before async command finished");
                    }
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
        }
    }

    fn send(&self, msg: M::Message) {
        if self.msg_tx.send(msg).is_err() {
            tracing::trace!("message dropped, receiver closed");
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        let model = &self.model;
        self.terminal.draw(|frame| model.view(frame))?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<DefaultTerminal, ProgramError> {
    let terminal = ratatui::try_init()?;
    if options.bracketed_paste {
        execute!(stdout(), EnableBracketedPaste)?;
    }
    if let Some(title) = &options.title {
        execute!(stdout(), SetTitle(title))?;
    }
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) {
    if options.bracketed_paste {
        execute!(stdout(), DisableBracketedPaste).ok();
    }
    ratatui::restore();
}
