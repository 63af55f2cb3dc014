use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::EventStream;
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::event::TerminalEvent;

type Spawn<Msg> = Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>;

/// A long-lived event source, started and stopped by the runtime.
///
/// Two subscriptions with the same id are the same source: returning it
/// again from [`Model::subscriptions`](crate::Model::subscriptions) keeps the
/// running task instead of starting another.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Spawn<Msg>,
}

/// Identity used to diff subscriptions between updates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(&'static str);

impl SubscriptionId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) -> AbortHandle {
    tokio::spawn(async move {
        while let Some(msg) = stream.next().await {
            if tx.send(msg).is_err() {
                tracing::trace!("subscription receiver gone, stopping");
                break;
            }
        }
    })
    .abort_handle()
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Wrap a stream that is already built.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| forward(stream, tx)),
        }
    }

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Lift the message type into a parent's.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        Subscription {
            id: self.id,
            spawn: Box::new(move |tx: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, inner_rx) = mpsc::unbounded_channel::<Msg>();
                let source = (self.spawn)(inner_tx);
                // Ends on its own once the source is aborted and drops inner_tx.
                forward(UnboundedReceiverStream::new(inner_rx).map(f).boxed(), tx);
                source
            }),
        }
    }
}

/// Keyboard, paste and resize events from the terminal, mapped through
/// `map`. Return `None` to drop an event.
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);
    Subscription {
        id: SubscriptionId::new("terminal-events"),
        // The EventStream is created inside the task so that re-declaring the
        // subscription on every update never touches crossterm's reader.
        spawn: Box::new(move |tx| {
            let stream = EventStream::new()
                .filter_map(move |result| {
                    let map = Arc::clone(&map);
                    async move {
                        match result {
                            Ok(event) => map(TerminalEvent::from(event)),
                            Err(err) => {
                                tracing::debug!(%err, "terminal event error");
                                None
                            }
                        }
                    }
                })
                .boxed();
            forward(stream, tx)
        }),
    }
}

/// Running subscriptions, keyed by id.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Start subscriptions not yet running and stop those no longer declared.
    pub fn reconcile(&mut self, subs: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<SubscriptionId, Subscription<Msg>> =
            subs.into_iter().map(|sub| (sub.id.clone(), sub)).collect();

        self.active.retain(|id, handle| {
            let keep = declared.contains_key(id);
            if !keep {
                tracing::debug!(subscription = id.name(), "stopping subscription");
                handle.abort();
            }
            keep
        });

        for (id, sub) in declared.drain() {
            if !self.active.contains_key(&id) {
                tracing::debug!(subscription = id.name(), "starting subscription");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
