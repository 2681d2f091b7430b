#![forbid(unsafe_code)]

//! Scale configuration.
//!
//! A [`Scale`] is one spatial frequency band: an activator radius, an
//! inhibitor radius, and the increment applied to pixels this scale wins.
//! A [`ScaleSet`] is the ordered list the engine walks every step. Order
//! matters only for ties: the first scale to reach the smallest variation
//! at a pixel keeps it.

use crate::error::EngineError;

/// One activator/inhibitor band.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    /// Blur radius of the activator (short-range reinforcement).
    pub activator_radius: usize,
    /// Blur radius of the inhibitor (long-range suppression).
    pub inhibitor_radius: usize,
    /// Amount added to or subtracted from a pixel this scale wins.
    pub increment: f64,
}

impl Scale {
    /// Create a scale.
    pub const fn new(activator_radius: usize, inhibitor_radius: usize, increment: f64) -> Self {
        Self {
            activator_radius,
            inhibitor_radius,
            increment,
        }
    }

    /// Largest of the two radii.
    #[inline]
    pub fn max_radius(&self) -> usize {
        self.activator_radius.max(self.inhibitor_radius)
    }

    fn validate(&self, index: usize) -> Result<(), EngineError> {
        if !self.increment.is_finite() {
            return Err(EngineError::InvalidScale {
                index,
                reason: "increment must be finite",
            });
        }
        if self.increment <= 0.0 {
            return Err(EngineError::InvalidScale {
                index,
                reason: "increment must be positive",
            });
        }
        Ok(())
    }
}

/// Ordered, immutable list of scales.
///
/// An empty set is valid: stepping an engine with no scales leaves the
/// field untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Scale>", into = "Vec<Scale>"))]
pub struct ScaleSet {
    scales: Vec<Scale>,
}

impl ScaleSet {
    /// Build a set, rejecting scales with non-finite or non-positive
    /// increments.
    pub fn new(scales: Vec<Scale>) -> Result<Self, EngineError> {
        for (index, scale) in scales.iter().enumerate() {
            scale.validate(index)?;
        }
        Ok(Self { scales })
    }

    /// A set with no scales.
    pub const fn empty() -> Self {
        Self { scales: Vec::new() }
    }

    /// Three coarse-to-fine bands with wide radii.
    pub fn classic() -> Self {
        Self {
            scales: vec![
                Scale::new(100, 50, 0.05),
                Scale::new(50, 25, 0.04),
                Scale::new(25, 12, 0.03),
            ],
        }
    }

    /// Four bands at half the `classic` radii, for small fields.
    pub fn fine() -> Self {
        Self {
            scales: vec![
                Scale::new(50, 25, 0.05),
                Scale::new(25, 12, 0.04),
                Scale::new(12, 6, 0.03),
                Scale::new(6, 3, 0.02),
            ],
        }
    }

    /// Look up a preset by name (`"classic"` or `"fine"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "fine" => Some(Self::fine()),
            _ => None,
        }
    }

    /// Scales in processing order.
    #[inline]
    pub fn as_slice(&self) -> &[Scale] {
        &self.scales
    }

    /// Number of scales.
    #[inline]
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// `true` when there are no scales.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Iterate in processing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scale> {
        self.scales.iter()
    }
}

impl Default for ScaleSet {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<Vec<Scale>> for ScaleSet {
    type Error = EngineError;

    fn try_from(scales: Vec<Scale>) -> Result<Self, Self::Error> {
        Self::new(scales)
    }
}

impl From<ScaleSet> for Vec<Scale> {
    fn from(set: ScaleSet) -> Self {
        set.scales
    }
}

impl<'a> IntoIterator for &'a ScaleSet {
    type Item = &'a Scale;
    type IntoIter = std::slice::Iter<'a, Scale>;

    fn into_iter(self) -> Self::IntoIter {
        self.scales.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pass_validation() {
        for set in [ScaleSet::classic(), ScaleSet::fine()] {
            assert!(ScaleSet::new(set.as_slice().to_vec()).is_ok());
        }
        assert_eq!(ScaleSet::default(), ScaleSet::classic());
    }

    #[test]
    fn preset_lookup() {
        assert_eq!(ScaleSet::preset("fine"), Some(ScaleSet::fine()));
        assert_eq!(ScaleSet::preset("lumpy"), None);
    }

    #[test]
    fn rejects_non_positive_increment() {
        let err = ScaleSet::new(vec![Scale::new(2, 4, 0.1), Scale::new(1, 3, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidScale {
                index: 1,
                reason: "increment must be positive"
            }
        );
    }

    #[test]
    fn rejects_nan_increment() {
        assert!(ScaleSet::new(vec![Scale::new(1, 2, f64::NAN)]).is_err());
    }

    #[test]
    fn radius_order_is_not_enforced() {
        let set = ScaleSet::new(vec![Scale::new(10, 2, 0.05)]).unwrap();
        assert_eq!(set.as_slice()[0].max_radius(), 10);
    }

    #[test]
    fn empty_set() {
        assert!(ScaleSet::empty().is_empty());
        assert_eq!(ScaleSet::new(Vec::new()).unwrap().len(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_validates() {
        let json = r#"[{"activator_radius":4,"inhibitor_radius":8,"increment":0.02}]"#;
        let set: ScaleSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.as_slice(), &[Scale::new(4, 8, 0.02)]);

        let bad = r#"[{"activator_radius":4,"inhibitor_radius":8,"increment":-1.0}]"#;
        assert!(serde_json::from_str::<ScaleSet>(bad).is_err());
    }
}
