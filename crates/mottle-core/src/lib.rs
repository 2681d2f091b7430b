#![forbid(unsafe_code)]

//! Core: multi-scale Turing pattern evolution.
//!
//! A [`PatternEngine`] owns a [`ScalarField`] of values in `[0, 1]` and a
//! [`ScaleSet`]. Each [`PatternEngine::step`] blurs the current field at the
//! activator and inhibitor radius of every scale, picks per pixel the scale
//! whose activator/inhibitor difference is smallest in magnitude, nudges the
//! pixel by that scale's increment, and renormalizes.
//!
//! The host (renderer, event loop) reads [`PatternEngine::field`] between
//! steps. Reading and stepping are expected to happen on the same thread in
//! lock-step.
//!
//! ```
//! use mottle_core::{EngineOptions, PatternEngine, ScaleSet};
//!
//! let options = EngineOptions::default().with_seed(7);
//! let mut engine = PatternEngine::with_options(64, 48, ScaleSet::fine(), options)?;
//! engine.step();
//! let field = engine.field();
//! assert_eq!(field.len(), 64 * 48);
//! # Ok::<(), mottle_core::EngineError>(())
//! ```

pub mod blur;
pub mod engine;
pub mod error;
pub mod field;
pub mod logging;
pub mod random;
pub mod scale;

pub use blur::BoxBlur;
pub use engine::{EngineOptions, PatternEngine, Selection};
pub use error::EngineError;
pub use field::{DEGENERATE_FILL, ScalarField};
pub use random::Randomizer;
pub use scale::{Scale, ScaleSet};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace_span, warn};
