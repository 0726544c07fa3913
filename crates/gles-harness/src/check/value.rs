use std::fmt::Display;

/// Tolerance used when comparing floating point GL state.
pub const FLOAT_EPSILON: f32 = 0.001;

/// A value that can be asserted against an expected GL state value.
pub trait CheckValue: Copy + Display {
    fn matches(self, expected: Self) -> bool;
}

impl CheckValue for i32 {
    #[inline]
    fn matches(self, expected: Self) -> bool {
        self == expected
    }
}

impl CheckValue for u32 {
    #[inline]
    fn matches(self, expected: Self) -> bool {
        self == expected
    }
}

impl CheckValue for bool {
    #[inline]
    fn matches(self, expected: Self) -> bool {
        self == expected
    }
}

impl CheckValue for f32 {
    #[inline]
    fn matches(self, expected: Self) -> bool {
        (self - expected).abs() < FLOAT_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_exact() {
        assert!(5i32.matches(5));
        assert!(!5i32.matches(6));
        assert!(i32::MIN.matches(i32::MIN));
    }

    #[test]
    fn floats_use_tolerance() {
        assert!(10497.0f32.matches(10497.0));
        assert!(1.0f32.matches(1.0005));
        assert!(!1.0f32.matches(1.002));
        assert!(!0.0f32.matches(-0.01));
    }

    #[test]
    fn nan_never_matches() {
        assert!(!f32::NAN.matches(f32::NAN));
    }
}
