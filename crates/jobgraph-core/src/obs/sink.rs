//! Event sink boundary.
//!
//! All instrumentation flows through `ProjectionEvent` and `EventSink`. The
//! default sink forwards to `tracing`; a scoped, thread-local override lets
//! tests and hosts capture events for one dynamic extent.
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = const { RefCell::new(None) };
}

///
/// ProjectionEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectionEvent {
    RegistryBuilt {
        kinds: usize,
        fields: usize,
    },
    ProjectFinished {
        kind: &'static str,
        schema: &'static str,
        rows_visited: u64,
    },
    ExportFinished {
        kind: &'static str,
        rows_visited: u64,
        depth_exhausted: u64,
        cycles_skipped: u64,
    },
    CallFailed {
        kind: &'static str,
        operation: Operation,
    },
}

///
/// Operation
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Project,
    Export,
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: &ProjectionEvent);
}

///
/// TracingSink
/// Default sink; writes every event as a `tracing` event.
///

pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &ProjectionEvent) {
        match *event {
            ProjectionEvent::RegistryBuilt { kinds, fields } => {
                tracing::debug!(target: "jobgraph", kinds, fields, "model registry built");
            }
            ProjectionEvent::ProjectFinished {
                kind,
                schema,
                rows_visited,
            } => {
                tracing::trace!(target: "jobgraph", kind, schema, rows_visited, "projection finished");
            }
            ProjectionEvent::ExportFinished {
                kind,
                rows_visited,
                depth_exhausted,
                cycles_skipped,
            } => {
                tracing::trace!(
                    target: "jobgraph",
                    kind,
                    rows_visited,
                    depth_exhausted,
                    cycles_skipped,
                    "export finished"
                );
            }
            ProjectionEvent::CallFailed { kind, operation } => {
                tracing::debug!(target: "jobgraph", kind, ?operation, "projection call failed");
            }
        }
    }
}

///
/// EventLog
/// Capturing sink for tests and diagnostics.
///

#[derive(Debug, Default)]
pub struct EventLog {
    events: RefCell<Vec<ProjectionEvent>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    #[must_use]
    pub fn events(&self) -> Vec<ProjectionEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for EventLog {
    fn record(&self, event: &ProjectionEvent) {
        self.events.borrow_mut().push(*event);
    }
}

pub(crate) fn record(event: ProjectionEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(&event),
        None => TracingSink.record(&event),
    }
}

/// Run a closure with a temporary sink override on the current thread.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
