/// Parameters for building the linear approximations of a subpath.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FlattenOptions {
    /// Maximum allowed distance to the path when building an approximation.
    ///
    /// Straight segments are not affected.
    ///
    /// Default value: `FlattenOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,
}

impl FlattenOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f32 = 0.1;

    /// Smallest accepted tolerance.
    pub const MIN_TOLERANCE: f32 = 1e-4;

    pub const DEFAULT: Self = FlattenOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Whether the tolerance is finite and at least `MIN_TOLERANCE`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.tolerance.is_finite() && self.tolerance >= Self::MIN_TOLERANCE
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn tolerance_validation() {
    assert!(FlattenOptions::default().is_valid());
    assert_eq!(FlattenOptions::default().tolerance, 0.1);
    assert!(FlattenOptions::tolerance(0.001).is_valid());
    assert!(!FlattenOptions::tolerance(0.0).is_valid());
    assert!(!FlattenOptions::tolerance(-1.0).is_valid());
    assert!(!FlattenOptions::tolerance(f32::NAN).is_valid());
    assert!(!FlattenOptions::tolerance(f32::INFINITY).is_valid());

    assert!(FlattenOptions::tolerance(FlattenOptions::MIN_TOLERANCE).is_valid());
    assert!(!FlattenOptions::tolerance(1e-5).is_valid());
    assert!(!FlattenOptions::tolerance(1e-9).is_valid());
}
