// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diagnostics port for the geometry types.
//!
//! The types themselves only emit `tracing` events; they never choose where
//! those events go. Callers that want the crate's notices as plain values
//! install a [`SinkLayer`] around their own [`DiagnosticSink`]:
//!
//! ```
//! use echo_geom::diag::{self, Severity};
//! use echo_geom::{Line, Vec3};
//!
//! let p = Vec3::new(1.0, 2.0, 3.0).unwrap();
//! let (line, notices) = diag::capture(|| Line::new(p, p));
//! assert!(line.is_degenerate());
//! assert!(notices.iter().any(|n| n.severity == Severity::Warning));
//! ```
//!
//! Severity mapping: `ERROR` events become [`Severity::Severe`] and are
//! emitted immediately before an error is returned, `WARN` events become
//! [`Severity::Warning`], everything else is [`Severity::Info`].

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// Target prefix shared by every event this crate emits.
pub const TARGET: &str = "echo_geom";

/// How serious a [`Notice`] is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operation.
    Info,
    /// Numerically risky but non-fatal: near-zero normalize, parallel
    /// fallback in the closest-point solver, degenerate line construction.
    Warning,
    /// The operation is about to fail with an error.
    Severe,
}

impl Severity {
    fn from_level(level: Level) -> Self {
        if level == Level::ERROR {
            Self::Severe
        } else if level == Level::WARN {
            Self::Warning
        } else {
            Self::Info
        }
    }
}

/// One diagnostic emitted by a geometry operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity derived from the event level.
    pub severity: Severity,
    /// Operation name, e.g. `"line.closest_points_with"`. Empty if the event
    /// carried no `op` field.
    pub op: String,
    /// Rendered event message.
    pub message: String,
}

/// Receiver for geometry diagnostics.
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Called once per event, on the thread that emitted it.
    fn notify(&self, notice: &Notice);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Notice) + Send + Sync + 'static,
{
    fn notify(&self, notice: &Notice) {
        self(notice);
    }
}

/// In-memory sink that keeps every notice it receives.
///
/// Clones share storage, so one clone can be handed to a [`SinkLayer`] while
/// another is inspected.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl Recorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices received so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of notices at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }

    /// Drops every recorded notice.
    pub fn clear(&self) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for Recorder {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

/// `tracing_subscriber` layer forwarding this crate's events to a sink.
///
/// Events from other targets pass through untouched.
#[derive(Debug)]
pub struct SinkLayer<D> {
    sink: D,
}

impl<D: DiagnosticSink> SinkLayer<D> {
    /// Wraps `sink`.
    pub fn new(sink: D) -> Self {
        Self { sink }
    }

    /// Returns the wrapped sink.
    pub fn sink(&self) -> &D {
        &self.sink
    }
}

impl<S, D> Layer<S> for SinkLayer<D>
where
    S: Subscriber,
    D: DiagnosticSink,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if !meta.target().starts_with(TARGET) {
            return;
        }
        let mut visitor = NoticeVisitor::default();
        event.record(&mut visitor);
        self.sink.notify(&Notice {
            severity: Severity::from_level(*meta.level()),
            op: visitor.op,
            message: visitor.message,
        });
    }
}

#[derive(Default)]
struct NoticeVisitor {
    op: String,
    message: String,
}

impl Visit for NoticeVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "op" => value.clone_into(&mut self.op),
            "message" => value.clone_into(&mut self.message),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "op" => self.op = format!("{value:?}"),
            "message" => self.message = format!("{value:?}"),
            _ => {}
        }
    }
}

/// Runs `f` with `sink` receiving every geometry notice emitted on this
/// thread, then restores the previous subscriber.
pub fn with_sink<D, T>(sink: D, f: impl FnOnce() -> T) -> T
where
    D: DiagnosticSink,
{
    let subscriber = Registry::default().with(SinkLayer::new(sink));
    tracing::subscriber::with_default(subscriber, f)
}

/// Runs `f` and returns its result together with the notices it emitted.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Notice>) {
    let recorder = Recorder::new();
    let out = with_sink(recorder.clone(), f);
    (out, recorder.notices())
}
