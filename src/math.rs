//! Abstractions over numerical types.

use std::fmt::Debug;

use cgmath::BaseFloat;
use num_traits::{Float, Num, NumAssign};


/// Primitive numerical types, like `f64` and `u32`.
///
/// This trait is automatically implemented for all types that satisfy the
/// super-trait constraints.
pub trait PrimitiveNum: 'static + Copy + Debug + Num + PartialOrd + NumAssign {}

impl<T> PrimitiveNum for T
where
    T: 'static + Copy + Debug + Num + PartialOrd + NumAssign,
{}

/// Primitive floating point types: `f32` and `f64`.
pub trait PrimitiveFloat: PrimitiveNum + Float + BaseFloat {
    /// The tolerance used when comparing a derived quantity (like a signed
    /// area) against zero.
    ///
    /// This is a lot larger than the machine epsilon: the quantities fed
    /// into [`is_zero`] are results of several multiplications and
    /// subtractions, so the accumulated rounding error easily exceeds the
    /// epsilon of the type itself.
    fn zero_tolerance() -> Self;
}

impl PrimitiveFloat for f32 {
    fn zero_tolerance() -> Self {
        1e-5
    }
}

impl PrimitiveFloat for f64 {
    fn zero_tolerance() -> Self {
        1e-10
    }
}

/// Checks whether `x` is zero, up to [`PrimitiveFloat::zero_tolerance`].
#[inline(always)]
pub fn is_zero<F: PrimitiveFloat>(x: F) -> bool {
    x.abs() < F::zero_tolerance()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_zero_tolerance() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-12));
        assert!(is_zero(-1e-12));
        assert!(!is_zero(1e-9));
        assert!(!is_zero(-1.0));

        assert!(is_zero(1e-6_f32));
        assert!(!is_zero(1e-4_f32));
    }
}
