//! Elemental compositions: parsing chemical formulas into canonical count vectors and weighing them

pub mod atoms;
pub mod errors;
pub mod parsers;

use std::sync::OnceLock;

// External Crate Imports
use ahash::HashMap;
use derive_more::{Add, Display, From, Into, Neg, Sub, Sum};
use rust_decimal::Decimal;
use serde::Serialize;
use static_assertions::assert_impl_all;

pub use atoms::element_table::DEFAULT_KDL;
pub use errors::{EmpiricalError, Result};
pub use parsers::{factor_list, parse, parse_simple, parse_with};

// NOTE: All of the types in this crate are defined here, and their `impl` blocks live in the `atoms` modules

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ElementTable {
    elements: Vec<Element>,
    indices: HashMap<String, usize>,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Element {
    symbol: String,
    name: String,
    monoisotopic_mass: Decimal,
    average_mass: Decimal,
}

// NOTE: `factors` never ends in a zero, so two compositions are equal exactly when their `factors` are equal
#[derive(Clone, Debug, Default, Serialize)]
pub struct Composition {
    factors: Vec<i64>,
    #[serde(skip)]
    monoisotopic_mass: OnceLock<MonoisotopicMass>,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From, Into, Serialize)]
pub struct Count(i64);

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Default,
    Display,
    From,
    Into,
    Add,
    Sub,
    Neg,
    Sum,
    Serialize,
)]
pub struct MonoisotopicMass(pub Decimal);

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Default,
    Display,
    From,
    Into,
    Add,
    Sub,
    Neg,
    Sum,
    Serialize,
)]
pub struct AverageMass(pub Decimal);

assert_impl_all!(ElementTable: Send, Sync);
assert_impl_all!(Element: Send, Sync);
assert_impl_all!(Composition: Send, Sync);

// =====================================================================================================================

pub trait Massive {
    fn monoisotopic_mass(&self) -> MonoisotopicMass;
    fn average_mass(&self) -> AverageMass;
}

// Blanket impls

macro_rules! massive_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: Massive> Massive for $ref_type {
                fn monoisotopic_mass(&self) -> MonoisotopicMass {
                    (**self).monoisotopic_mass()
                }

                fn average_mass(&self) -> AverageMass {
                    (**self).average_mass()
                }
            }
        )+
    };
}

massive_ref_impls!(&T, &mut T, Box<T>);
