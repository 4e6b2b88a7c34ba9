//! A `tracing` layer that keeps closed spans and emitted events in memory so
//! tests can assert on instrumentation.

use std::{
    collections::HashMap,
    fmt::{self, Write as _},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use ::tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

type Fields = HashMap<String, String>;

/// Layer that records every closed span and every event.
///
/// Clones share storage, so a test can keep one handle while installing
/// another into a subscriber.
///
/// # Examples
/// ```
/// use percolation_test_support::tracing::RecordingLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let layer = RecordingLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     let _span = tracing::info_span!("demo", answer = 42).entered();
///     tracing::info!(flag = true, "hello");
/// });
///
/// assert_eq!(layer.span("demo").and_then(|s| s.field("answer").map(str::to_owned)), Some("42".into()));
/// assert_eq!(layer.events()[0].message(), Some("hello"));
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    store: Arc<Mutex<Store>>,
}

#[derive(Default)]
struct Store {
    spans: Vec<SpanRecord>,
    events: Vec<EventRecord>,
}

impl RecordingLayer {
    /// Closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.lock().spans.clone()
    }

    /// First closed span called `name`, if any.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        self.lock().spans.iter().find(|span| span.name == name).cloned()
    }

    /// Emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.lock().events.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A closed span with every field recorded over its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the callsite metadata.
    pub name: String,
    /// Field values rendered as strings.
    pub fields: Fields,
}

impl SpanRecord {
    /// Rendered value of the field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// An emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    level: Level,
    target: String,
    fields: Fields,
}

impl EventRecord {
    /// Event level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Event target, usually the emitting module path.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The event message, if one was given.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Rendered value of the field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Per-span scratch storage kept in the registry extensions until close.
struct Pending(SpanRecord);

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Fields::new();
        attrs.record(&mut Collector(&mut fields));
        span.extensions_mut().insert(Pending(SpanRecord {
            name: attrs.metadata().name().to_owned(),
            fields,
        }));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(pending) = span.extensions_mut().get_mut::<Pending>() {
            values.record(&mut Collector(&mut pending.0.fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut Collector(&mut fields));
        let metadata = event.metadata();
        self.lock().events.push(EventRecord {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields,
        });
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        if let Some(Pending(record)) = span.extensions_mut().remove::<Pending>() {
            self.lock().spans.push(record);
        }
    }
}

struct Collector<'a>(&'a mut Fields);

impl Collector<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for Collector<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }

    fn record_bytes(&mut self, field: &Field, value: &[u8]) {
        let mut hex = String::with_capacity(value.len() * 2);
        for byte in value {
            let _ = write!(hex, "{byte:02x}");
        }
        self.put(field, hex);
    }
}
