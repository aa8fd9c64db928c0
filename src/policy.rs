use crate::error::StrideVecError;

/// Lower bound for the capacity of an owned buffer.
pub const MIN_CAPACITY: usize = 1;

/// Growth and shrink parameters of a vector.
///
/// `growth_factor` multiplies the target size whenever storage has to be resized,
/// `shrink_threshold` is the fill ratio below which an owned buffer is shrunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPolicy {
    growth_factor: f32,
    shrink_threshold: f32,
}

impl GrowthPolicy {
    pub const DEFAULT_GROWTH_FACTOR: f32 = 2.0;
    pub const DEFAULT_SHRINK_THRESHOLD: f32 = 0.25;

    /// Policy of borrowed buffers: never grow beyond the request, never shrink.
    pub const FIXED: Self = Self {
        growth_factor: 1.0,
        shrink_threshold: 0.0,
    };

    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `growth_factor` is below `1.0`
    /// or `shrink_threshold` is outside `[0.0, 1.0]`. NaN is rejected for both.
    pub fn new(growth_factor: f32, shrink_threshold: f32) -> Result<Self, StrideVecError> {
        if growth_factor.is_nan() || growth_factor < 1.0 || growth_factor.is_infinite() {
            return Err(StrideVecError::InvalidArgument {
                reason: "growth factor must be a finite value >= 1.0",
            });
        }
        if !(0.0..=1.0).contains(&shrink_threshold) {
            return Err(StrideVecError::InvalidArgument {
                reason: "shrink threshold must be within [0.0, 1.0]",
            });
        }
        Ok(Self {
            growth_factor,
            shrink_threshold,
        })
    }

    #[must_use]
    pub fn growth_factor(&self) -> f32 {
        self.growth_factor
    }

    #[must_use]
    pub fn shrink_threshold(&self) -> f32 {
        self.shrink_threshold
    }

    /// Capacity to request when `required` slots are needed.
    ///
    /// Never less than `required`, never less than one.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub(crate) fn scaled(&self, required: usize) -> usize {
        let scaled = (required as f64 * f64::from(self.growth_factor)) as usize;
        scaled.max(required).max(1)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn should_shrink(&self, size: usize, capacity: usize) -> bool {
        (size as f64) < capacity as f64 * f64::from(self.shrink_threshold)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            shrink_threshold: Self::DEFAULT_SHRINK_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_parameters() {
        assert!(GrowthPolicy::new(0.5, 0.25).is_err());
        assert!(GrowthPolicy::new(f32::NAN, 0.25).is_err());
        assert!(GrowthPolicy::new(f32::INFINITY, 0.25).is_err());
        assert!(GrowthPolicy::new(2.0, -0.1).is_err());
        assert!(GrowthPolicy::new(2.0, 1.5).is_err());
        assert!(GrowthPolicy::new(2.0, f32::NAN).is_err());
        assert!(GrowthPolicy::new(1.0, 0.0).is_ok());
        assert!(GrowthPolicy::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_scaled_capacity() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.scaled(0), 1);
        assert_eq!(policy.scaled(3), 6);

        let policy = GrowthPolicy::new(1.5, 0.25).unwrap();
        assert_eq!(policy.scaled(3), 4);
        assert_eq!(GrowthPolicy::FIXED.scaled(7), 7);
    }

    #[test]
    fn test_scaled_never_below_request() {
        // f32 cannot represent this exactly; the result must still cover it
        let required = 16_777_217;
        assert!(GrowthPolicy::FIXED.scaled(required) >= required);
    }

    #[test]
    fn test_should_shrink() {
        let policy = GrowthPolicy::default();
        assert!(policy.should_shrink(1, 8));
        assert!(!policy.should_shrink(2, 8));
        assert!(!GrowthPolicy::FIXED.should_shrink(0, 8));
    }
}
