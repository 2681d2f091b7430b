#![forbid(unsafe_code)]

//! Pattern engine: one simulation step over all scales.
//!
//! # Step
//!
//! For every scale, in order:
//!
//! 1. Blur the current field at the activator radius and at the inhibitor
//!    radius. The two blurs read the same snapshot and write disjoint
//!    buffers, so they run on two threads joined before step 2.
//! 2. Per pixel, `variation = activator - inhibitor`. The first scale always
//!    records its variation and signed increment; later scales replace them
//!    only when `|variation|` is strictly smaller than the stored one.
//!
//! Then every pixel receives its recorded increment and the field is
//! renormalized to `[0, 1]`.
//!
//! Scales run sequentially because the per-pixel selection state is
//! updated scale by scale.
//!
//! # No Per-Step Allocations
//!
//! Scratch buffers are allocated once with the engine and reused.

use std::thread;

use crate::blur::BoxBlur;
use crate::error::EngineError;
use crate::field::{ScalarField, try_alloc};
use crate::random::Randomizer;
use crate::scale::{Scale, ScaleSet};

/// Construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Fixed seed for reproducible noise. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Run the activator and inhibitor blurs of a scale on two threads.
    /// Results are identical either way.
    pub concurrent_blur: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            concurrent_blur: true,
        }
    }
}

impl EngineOptions {
    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the two-thread blur.
    #[must_use]
    pub fn with_concurrent_blur(mut self, concurrent: bool) -> Self {
        self.concurrent_blur = concurrent;
        self
    }
}

/// Per-pixel winners of the most recent scale selection.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    variations: &'a [f64],
    increments: &'a [f64],
}

impl<'a> Selection<'a> {
    /// Smallest-magnitude `activator - inhibitor` found at each pixel.
    pub fn variations(&self) -> &'a [f64] {
        self.variations
    }

    /// Signed increment of the winning scale at each pixel.
    pub fn increments(&self) -> &'a [f64] {
        self.increments
    }
}

/// Scratch memory for one step. Contents never carry across steps.
#[derive(Debug, Clone)]
struct StepBuffers {
    activators: Vec<f64>,
    inhibitors: Vec<f64>,
    activator_pass: Vec<f64>,
    inhibitor_pass: Vec<f64>,
    variations: Vec<f64>,
    increments: Vec<f64>,
}

impl StepBuffers {
    fn new(len: usize) -> Result<Self, EngineError> {
        Ok(Self {
            activators: try_alloc(len)?,
            inhibitors: try_alloc(len)?,
            activator_pass: try_alloc(len)?,
            inhibitor_pass: try_alloc(len)?,
            variations: try_alloc(len)?,
            increments: try_alloc(len)?,
        })
    }

    /// Blur `source` at both radii of `scale` into `activators` and
    /// `inhibitors`.
    fn blur_scale(&mut self, blur: BoxBlur, source: &[f64], scale: &Scale, concurrent: bool) {
        let Self {
            activators,
            inhibitors,
            activator_pass,
            inhibitor_pass,
            ..
        } = self;

        if concurrent {
            thread::scope(|s| {
                s.spawn(move || {
                    blur.blur_into(scale.activator_radius, source, activator_pass, activators);
                });
                blur.blur_into(scale.inhibitor_radius, source, inhibitor_pass, inhibitors);
            });
        } else {
            blur.blur_into(scale.activator_radius, source, activator_pass, activators);
            blur.blur_into(scale.inhibitor_radius, source, inhibitor_pass, inhibitors);
        }
    }

    /// Fold this scale's variations into the running selection.
    fn select(&mut self, scale: &Scale, first: bool) {
        let candidates = self.activators.iter().zip(&self.inhibitors);
        let running = self.variations.iter_mut().zip(&mut self.increments);
        for ((activator, inhibitor), (best, increment)) in candidates.zip(running) {
            let variation = activator - inhibitor;
            if first || variation.abs() < best.abs() {
                *best = variation;
                *increment = if variation > 0.0 {
                    scale.increment
                } else {
                    -scale.increment
                };
            }
        }
    }
}

/// Owns the field and evolves it one generation per [`PatternEngine::step`].
#[derive(Debug, Clone)]
pub struct PatternEngine {
    field: ScalarField,
    scales: ScaleSet,
    blur: BoxBlur,
    randomizer: Randomizer,
    buffers: StepBuffers,
    concurrent_blur: bool,
    generation: u64,
}

impl PatternEngine {
    /// Allocate a `width x height` engine seeded from OS entropy and fill
    /// it with noise.
    pub fn new(width: usize, height: usize, scales: ScaleSet) -> Result<Self, EngineError> {
        Self::with_options(width, height, scales, EngineOptions::default())
    }

    /// Allocate a `width x height` engine and fill it with noise.
    ///
    /// Fails without side effects if either dimension is zero, the area
    /// overflows, or any buffer cannot be allocated.
    pub fn with_options(
        width: usize,
        height: usize,
        scales: ScaleSet,
        options: EngineOptions,
    ) -> Result<Self, EngineError> {
        let field = ScalarField::new(width, height)?;
        let mut engine = Self::from_field(field, scales, options)?;
        engine.randomize();
        Ok(engine)
    }

    /// Wrap an existing field without randomizing it.
    pub fn from_field(
        field: ScalarField,
        scales: ScaleSet,
        options: EngineOptions,
    ) -> Result<Self, EngineError> {
        let buffers = StepBuffers::new(field.len())?;
        crate::debug!(
            width = field.width(),
            height = field.height(),
            scales = scales.len(),
            concurrent_blur = options.concurrent_blur,
            "pattern engine initialized"
        );
        Ok(Self {
            blur: BoxBlur::for_field(&field),
            field,
            scales,
            randomizer: Randomizer::from_seed_option(options.seed),
            buffers,
            concurrent_blur: options.concurrent_blur,
            generation: 0,
        })
    }

    /// Field width.
    #[inline]
    pub fn width(&self) -> usize {
        self.field.width()
    }

    /// Field height.
    #[inline]
    pub fn height(&self) -> usize {
        self.field.height()
    }

    /// Current field. Values are in `[0, 1]` between steps.
    #[inline]
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Configured scales.
    #[inline]
    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    /// Number of completed steps (no-op steps on an empty scale set are
    /// not counted).
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the two blurs of a scale run concurrently.
    #[inline]
    pub fn concurrent_blur(&self) -> bool {
        self.concurrent_blur
    }

    /// Refill the field with uniform noise from `[0, 1)`.
    pub fn randomize(&mut self) {
        self.randomizer.fill(&mut self.field);
        crate::debug!(generation = self.generation, "field randomized");
    }

    /// Run the blur and per-pixel scale selection against the current
    /// field without modifying it.
    ///
    /// Returns `None` when the scale set is empty.
    pub fn evaluate(&mut self) -> Option<Selection<'_>> {
        if self.scales.is_empty() {
            return None;
        }

        let Self {
            field,
            scales,
            blur,
            buffers,
            concurrent_blur,
            ..
        } = self;

        for (index, scale) in scales.iter().enumerate() {
            let span = crate::trace_span!(
                "scale",
                index,
                activator_radius = scale.activator_radius,
                inhibitor_radius = scale.inhibitor_radius
            );
            let _guard = span.enter();
            buffers.blur_scale(*blur, field.values(), scale, *concurrent_blur);
            buffers.select(scale, index == 0);
        }

        Some(Selection {
            variations: &self.buffers.variations,
            increments: &self.buffers.increments,
        })
    }

    /// Advance one generation: select per-pixel increments, add them, and
    /// renormalize. Does nothing when the scale set is empty.
    pub fn step(&mut self) {
        if self.scales.is_empty() {
            return;
        }

        let span = crate::debug_span!(
            "pattern_step",
            generation = self.generation,
            scales = self.scales.len()
        );
        let _guard = span.enter();

        self.evaluate();
        self.field.add_assign(&self.buffers.increments);
        if !self.field.normalize() {
            crate::warn!(
                generation = self.generation,
                "field is flat after step; filled with constant"
            );
        }
        self.generation += 1;
    }
}
