use std::ops::Mul;

use rust_decimal::Decimal;

use crate::{AverageMass, Count, MonoisotopicMass};

impl Count {
    #[must_use]
    pub const fn new(count: i64) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

// NOTE: These are what let `Composition::mass()` weigh each element with `mass * count`, so any mass type used there
// needs one of these impls
impl Mul<Count> for Decimal {
    type Output = Self;

    fn mul(self, rhs: Count) -> Self::Output {
        self * Self::from(rhs.0)
    }
}

impl Mul<Count> for f64 {
    type Output = Self;

    // NOTE: Counts are far below 2^53, so this conversion is exact in practice
    #[allow(clippy::cast_precision_loss)]
    fn mul(self, rhs: Count) -> Self::Output {
        self * rhs.0 as Self
    }
}

macro_rules! mass_mul_impls {
    // NOTE: `$mass_type` is a `tt` so that it can be used as both a type and a tuple-struct constructor
    ($($mass_type:tt),+ $(,)?) => {
        $(
            impl Mul<Count> for $mass_type {
                type Output = $mass_type;

                fn mul(self, rhs: Count) -> Self::Output {
                    $mass_type(self.0 * rhs)
                }
            }
        )+
    };
}

mass_mul_impls!(MonoisotopicMass, AverageMass);
