//! Observer registration and ordered dispatch.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::panic_message;
use crate::{AgentEvent, EventKind};

/// Error an observer may return. Logged and otherwise ignored.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Receives agent events.
///
/// Called synchronously from the agent loop, so keep it quick. Hand heavy
/// work off to a channel.
pub trait Observer: Send {
    fn on_event(&mut self, event: &AgentEvent<'_>) -> Result<(), ObserverError>;
}

type Callback = Box<dyn FnMut(&AgentEvent<'_>) + Send>;

enum Handler {
    Observer(Box<dyn Observer>),
    Callback(Callback),
}

struct Entry {
    /// `None` means every kind.
    filter: Option<EventKind>,
    handler: Handler,
}

/// The ordered list of everyone listening to one agent.
///
/// Dispatch visits entries in registration order. A failing or panicking
/// entry is logged and skipped; the rest still hear the event.
#[derive(Default)]
pub struct Observers {
    entries: Vec<Entry>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for every event.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> &mut Self {
        self.entries.push(Entry {
            filter: None,
            handler: Handler::Observer(Box::new(observer)),
        });
        self
    }

    /// Registers a callback for one kind of event.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> &mut Self
    where
        F: FnMut(&AgentEvent<'_>) + Send + 'static,
    {
        self.entries.push(Entry {
            filter: Some(kind),
            handler: Handler::Callback(Box::new(callback)),
        });
        self
    }

    /// Registers a callback for every event.
    pub fn on_any<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&AgentEvent<'_>) + Send + 'static,
    {
        self.entries.push(Entry {
            filter: None,
            handler: Handler::Callback(Box::new(callback)),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every matching entry, in order.
    ///
    /// Returns how many entries failed.
    pub fn dispatch(&mut self, event: &AgentEvent<'_>) -> usize {
        let kind = event.kind();
        let mut failures = 0;

        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.filter.is_some_and(|k| k != kind) {
                continue;
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| match &mut entry.handler {
                Handler::Observer(observer) => observer.on_event(event),
                Handler::Callback(callback) => {
                    callback(event);
                    Ok(())
                }
            }));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failures += 1;
                    tracing::warn!(%kind, observer = index, error = %err, "observer failed");
                }
                Err(payload) => {
                    failures += 1;
                    tracing::warn!(
                        %kind,
                        observer = index,
                        panic = %panic_message(payload.as_ref()),
                        "observer panicked"
                    );
                }
            }
        }

        failures
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}
