#![forbid(unsafe_code)]

//! Separable moving-sum box blur.
//!
//! Each output pixel is the unweighted mean of the source pixels inside a
//! square window of half-width `radius`, clipped at the image edges. The
//! window is never padded: near an edge the divisor (the *span*) shrinks to
//! the number of in-bounds samples, so a constant field blurs to itself
//! everywhere.
//!
//! The blur runs as two 1-D passes (rows, then columns). Each pass keeps a
//! running sum and adds/drops one sample per position, so the cost is
//! `O(width * height)` per pass regardless of the radius.

use crate::field::ScalarField;

/// Blur geometry for one field shape.
///
/// `BoxBlur` owns no buffers; callers pass source, intermediate, and
/// destination slices so the same scratch memory can be reused across
/// steps and two blurs can run on different threads at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxBlur {
    width: usize,
    height: usize,
}

impl BoxBlur {
    /// Blur geometry for a `width x height` row-major buffer.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Blur geometry matching `field`.
    pub fn for_field(field: &ScalarField) -> Self {
        Self::new(field.width(), field.height())
    }

    /// Number of elements every slice passed to this blur must hold.
    #[inline]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// `true` if the geometry has no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Horizontal pass: blur every row of `source` into `destination`.
    pub fn horizontal(&self, radius: usize, source: &[f64], destination: &mut [f64]) {
        assert_eq!(source.len(), self.len(), "source length mismatch");
        assert_eq!(destination.len(), self.len(), "destination length mismatch");
        for y in 0..self.height {
            smooth_line(source, destination, y * self.width, 1, self.width, radius);
        }
    }

    /// Vertical pass: blur every column of `source` into `destination`.
    pub fn vertical(&self, radius: usize, source: &[f64], destination: &mut [f64]) {
        assert_eq!(source.len(), self.len(), "source length mismatch");
        assert_eq!(destination.len(), self.len(), "destination length mismatch");
        for x in 0..self.width {
            smooth_line(source, destination, x, self.width, self.height, radius);
        }
    }

    /// Full 2-D blur. `intermediate` receives the horizontal pass and is
    /// then read by the vertical pass that writes `destination`.
    ///
    /// # Panics
    ///
    /// Panics if any slice is not exactly [`BoxBlur::len`] elements long.
    pub fn blur_into(
        &self,
        radius: usize,
        source: &[f64],
        intermediate: &mut [f64],
        destination: &mut [f64],
    ) {
        self.horizontal(radius, source, intermediate);
        self.vertical(radius, intermediate, destination);
    }

    /// Blur `source` into a freshly allocated field.
    pub fn blur(radius: usize, source: &ScalarField) -> ScalarField {
        let blur = Self::for_field(source);
        let mut intermediate = vec![0.0; blur.len()];
        let mut blurred = source.clone();
        blur.blur_into(
            radius,
            source.values(),
            &mut intermediate,
            blurred.values_mut(),
        );
        blurred
    }
}

/// Moving-sum mean over one strided line of `len` samples starting at
/// `start`.
///
/// `span` counts the in-bounds samples in the current window. When the
/// sample entering on the high side is past the end, nothing is added and
/// the span shrinks; when the sample leaving on the low side is before the
/// start, nothing is subtracted and the span grows.
fn smooth_line(
    source: &[f64],
    destination: &mut [f64],
    start: usize,
    stride: usize,
    len: usize,
    radius: usize,
) {
    if len == 0 {
        return;
    }
    let at = |i: usize| start + i * stride;

    // Exact copy; the running sum would otherwise accumulate rounding.
    if radius == 0 {
        for i in 0..len {
            destination[at(i)] = source[at(i)];
        }
        return;
    }

    // First window covers samples 0..=radius, clamped to the line.
    let head = radius.min(len - 1);
    let mut sum: f64 = (0..=head).map(|i| source[at(i)]).sum();
    let mut span = head + 1;
    destination[at(0)] = sum / span as f64;

    for i in 1..len {
        // `i + radius < len`, written to avoid overflow for huge radii.
        let entering_inside = radius < len - i;
        let leaving_inside = i > radius;

        if entering_inside {
            sum += source[at(i + radius)];
        }
        if leaving_inside {
            sum -= source[at(i - radius - 1)];
        } else {
            span += 1;
        }
        if !entering_inside {
            span -= 1;
        }

        destination[at(i)] = sum / span as f64;
    }
}
