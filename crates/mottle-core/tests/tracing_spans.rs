#![forbid(unsafe_code)]

//! Span and event instrumentation of the engine.
//!
//!   cargo test -p mottle-core --features tracing --test tracing_spans

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};

use mottle_core::{EngineOptions, PatternEngine, ScalarField, Scale, ScaleSet};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    parent_name: Option<String>,
}

#[derive(Default, Clone)]
struct Captured {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<(tracing::Level, String)>>>,
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for Captured
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            parent_name,
        });
    }

    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        self.events.lock().unwrap().push((
            *event.metadata().level(),
            visitor.0.unwrap_or_default(),
        ));
    }
}

fn capture<F: FnOnce()>(f: F) -> Captured {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    tracing::subscriber::with_default(subscriber, f);
    captured
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn step_span_wraps_one_span_per_scale() {
    let captured = capture(|| {
        let scales = ScaleSet::new(vec![Scale::new(2, 1, 0.05), Scale::new(1, 0, 0.02)]).unwrap();
        let mut engine =
            PatternEngine::with_options(12, 9, scales, EngineOptions::default().with_seed(5))
                .unwrap();
        engine.step();
    });

    let spans = captured.spans.lock().unwrap();
    let steps = spans.iter().filter(|s| s.name == "pattern_step").count();
    assert_eq!(steps, 1);
    let scales: Vec<_> = spans.iter().filter(|s| s.name == "scale").collect();
    assert_eq!(scales.len(), 2);
    assert!(
        scales
            .iter()
            .all(|s| s.parent_name.as_deref() == Some("pattern_step"))
    );
}

#[test]
fn empty_scale_set_opens_no_step_span() {
    let captured = capture(|| {
        let mut engine =
            PatternEngine::with_options(4, 4, ScaleSet::empty(), EngineOptions::default())
                .unwrap();
        engine.step();
    });
    let spans = captured.spans.lock().unwrap();
    assert!(spans.iter().all(|s| s.name != "pattern_step"));
}

#[test]
fn flat_field_warns() {
    let captured = capture(|| {
        let field = ScalarField::from_values(2, 2, vec![0.25; 4]).unwrap();
        let scales = ScaleSet::new(vec![Scale::new(1, 0, 0.1)]).unwrap();
        let mut engine =
            PatternEngine::from_field(field, scales, EngineOptions::default()).unwrap();
        engine.step();
    });
    let events = captured.events.lock().unwrap();
    assert!(
        events
            .iter()
            .any(|(level, msg)| *level == tracing::Level::WARN && msg.contains("flat"))
    );
}
