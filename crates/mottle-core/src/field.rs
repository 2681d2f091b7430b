#![forbid(unsafe_code)]

//! Dense row-major scalar field.
//!
//! Values live in `[0, 1]` between steps. During a step the engine adds
//! increments in place (values may leave the unit interval) and then calls
//! [`ScalarField::normalize`] to bring them back.

use crate::error::EngineError;

/// Value written to every element when a flat field is normalized.
///
/// A field whose minimum equals its maximum has no relative positions to
/// stretch, so normalization fills it with this constant instead of
/// dividing by a zero range.
pub const DEGENERATE_FILL: f64 = 0.5;

/// Allocate a zeroed buffer of `len` elements, reporting allocation failure.
pub(crate) fn try_alloc(len: usize) -> Result<Vec<f64>, EngineError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|source| EngineError::Allocation { len, source })?;
    values.resize(len, 0.0);
    Ok(values)
}

/// Checked `width * height` for a non-empty field.
pub(crate) fn checked_len(width: usize, height: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::ZeroDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(EngineError::DimensionOverflow { width, height })
}

/// A `width x height` grid of `f64` values, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl ScalarField {
    /// Create a zero-filled field.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            values: try_alloc(len)?,
        })
    }

    /// Wrap existing row-major values.
    ///
    /// Returns [`EngineError::ZeroDimension`] for an empty shape and
    /// [`EngineError::LengthMismatch`] if `values.len()` is not
    /// `width * height`. NaN and infinities are rejected with
    /// [`EngineError::NonFiniteValue`].
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        if values.len() != len {
            return Err(EngineError::LengthMismatch {
                expected: len,
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(EngineError::NonFiniteValue { index });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of elements (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: fields are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable row-major values.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Value at `(x, y)`, or `None` out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.values[y * self.width + x])
        } else {
            None
        }
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.width)
    }

    /// Smallest and largest element. Any NaN makes both bounds NaN.
    pub fn min_max(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in &self.values {
            if v.is_nan() {
                return (f64::NAN, f64::NAN);
            }
            lo = lo.min(v);
            hi = hi.max(v);
        }
        (lo, hi)
    }

    /// Arithmetic mean of all elements.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Element-wise `self += other`. Lengths must match.
    pub(crate) fn add_assign(&mut self, increments: &[f64]) {
        debug_assert_eq!(self.values.len(), increments.len());
        for (v, inc) in self.values.iter_mut().zip(increments) {
            *v += inc;
        }
    }

    /// Rescale every element to `(e - min) / (max - min)`.
    ///
    /// Afterwards the minimum is exactly `0` and the maximum `1`. A flat
    /// field (zero or non-finite range, including any NaN element) is
    /// filled with [`DEGENERATE_FILL`] instead; the return value is `false`
    /// in that case.
    pub fn normalize(&mut self) -> bool {
        let (min, max) = self.min_max();
        let range = max - min;
        if !(range > 0.0 && range.is_finite()) {
            self.values.fill(DEGENERATE_FILL);
            return false;
        }
        for v in &mut self.values {
            *v = (*v - min) / range;
        }
        true
    }
}
