// Standard Library Imports
use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    iter::Sum,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
    sync::OnceLock,
};

// External Crate Imports
use itertools::{EitherOrBoth, Itertools};

// Local Crate Imports
use crate::{
    AverageMass, Composition, Count, Element, ElementTable, EmpiricalError, Massive, MonoisotopicMass, Result,
    parsers,
};

// Public API ==========================================================================================================

impl Composition {
    /// Builds a composition from per-element counts, indexed like [`ElementTable`], dropping any trailing zeroes
    pub fn new(factors: impl Into<Vec<i64>>) -> Self {
        let mut factors = factors.into();
        let len = factors.iter().rposition(|&n| n != 0).map_or(0, |last| last + 1);
        factors.truncate(len);
        Self::from_normalized(factors)
    }

    /// Like [`Composition::new`], but missing slots count as zero
    pub fn from_sparse(slots: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::new(slots.into_iter().map(Option::unwrap_or_default).collect::<Vec<_>>())
    }

    pub fn parse(formula: impl AsRef<str>) -> Result<Self> {
        parsers::parse(formula)
    }

    pub fn parse_simple(formula: impl AsRef<str>) -> Result<Self> {
        parsers::parse_simple(formula)
    }

    #[must_use]
    pub fn factors(&self) -> &[i64] {
        &self.factors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// The count of a single element, which is zero for both absent and unknown symbols
    #[must_use]
    pub fn get(&self, symbol: &str) -> i64 {
        ElementTable::global()
            .index_of(symbol)
            .and_then(|index| self.factors.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// Non-zero entries in index order
    ///
    /// Indices beyond the end of the global [`ElementTable`] can only come from vectors passed directly to
    /// [`Composition::new`], and are skipped since they don't correspond to any element.
    pub fn iter(&self) -> impl Iterator<Item = (&'static Element, Count)> + '_ {
        let table = ElementTable::global();
        self.factors
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count != 0)
            .filter_map(|(index, &count)| Some((table.get(index)?, Count(count))))
    }

    /// Multiplies every count by `factor`, saturating at the bounds of `i64`
    #[must_use]
    pub fn scale(&self, factor: i64) -> Self {
        if factor == 0 {
            return Self::default();
        }
        Self::from_normalized(self.factors.iter().map(|count| count.saturating_mul(factor)).collect())
    }

    /// Like [`Composition::scale`], but returns `None` instead of saturating
    #[must_use]
    pub fn checked_scale(&self, factor: i64) -> Option<Self> {
        if factor == 0 {
            return Some(Self::default());
        }
        let factors = self.factors.iter().map(|count| count.checked_mul(factor)).collect::<Option<_>>()?;
        Some(Self::from_normalized(factors))
    }

    /// Like `self + other`, but returns `None` instead of saturating
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let factors: Option<Vec<_>> = self.zip_factors(other).map(|(lhs, rhs)| lhs.checked_add(rhs)).collect();
        factors.map(Self::new)
    }

    /// Like `self - other`, but returns `None` instead of saturating
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let factors: Option<Vec<_>> = self.zip_factors(other).map(|(lhs, rhs)| lhs.checked_sub(rhs)).collect();
        factors.map(Self::new)
    }

    /// Sums `mass_fn(element) * count` over every element, so any mass type (and any source of element masses) can be
    /// used
    pub fn mass<M>(&self, mass_fn: impl Fn(&Element) -> M) -> M
    where
        M: Sum + Mul<Count, Output = M>,
    {
        self.iter().map(|(element, count)| mass_fn(element) * count).sum()
    }
}

// Massive Trait Implementation ========================================================================================

impl Massive for Composition {
    fn monoisotopic_mass(&self) -> MonoisotopicMass {
        *self
            .monoisotopic_mass
            .get_or_init(|| self.mass(Element::monoisotopic_mass))
    }

    fn average_mass(&self) -> AverageMass {
        self.mass(Element::average_mass)
    }
}

// Arithmetic Trait Implementations ====================================================================================

// NOTE: Operators saturate at the bounds of `i64`; use the `checked_*` methods to detect overflow instead

impl Add for &Composition {
    type Output = Composition;

    fn add(self, rhs: Self) -> Self::Output {
        Composition::new(self.zip_factors(rhs).map(|(lhs, rhs)| lhs.saturating_add(rhs)).collect::<Vec<_>>())
    }
}

impl Sub for &Composition {
    type Output = Composition;

    fn sub(self, rhs: Self) -> Self::Output {
        Composition::new(self.zip_factors(rhs).map(|(lhs, rhs)| lhs.saturating_sub(rhs)).collect::<Vec<_>>())
    }
}

impl Mul<i64> for &Composition {
    type Output = Composition;

    fn mul(self, rhs: i64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Neg for &Composition {
    type Output = Composition;

    fn neg(self) -> Self::Output {
        self.scale(-1)
    }
}

macro_rules! owned_ops_impls {
    ($($op:ident :: $method:ident),+ $(,)?) => {
        $(
            impl $op for Composition {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self::Output {
                    (&self).$method(&rhs)
                }
            }

            impl $op<&Composition> for Composition {
                type Output = Self;

                fn $method(self, rhs: &Composition) -> Self::Output {
                    (&self).$method(rhs)
                }
            }
        )+
    };
}

owned_ops_impls!(Add::add, Sub::sub);

impl Mul<i64> for Composition {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Neg for Composition {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.scale(-1)
    }
}

impl Sum for Composition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |total, composition| total + composition)
    }
}

impl<'c> Sum<&'c Composition> for Composition {
    fn sum<I: Iterator<Item = &'c Composition>>(iter: I) -> Self {
        iter.fold(Self::default(), |total, composition| total + composition)
    }
}

// Display, Eq, Hash, and FromStr Trait Implementations ================================================================

impl Display for Composition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (element, count) in self.iter().sorted_by_key(|&(element, _)| element.symbol()) {
            write!(f, "{element}")?;
            if count != Count(1) {
                write!(f, "({count})")?;
            }
        }
        Ok(())
    }
}

impl PartialEq for Composition {
    fn eq(&self, other: &Self) -> bool {
        self.factors == other.factors
    }
}

impl Eq for Composition {}

impl Hash for Composition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.factors.hash(state);
    }
}

impl FromStr for Composition {
    type Err = EmpiricalError;

    fn from_str(s: &str) -> Result<Self> {
        parsers::parse(s)
    }
}

// Private Helper Methods ==============================================================================================

impl Composition {
    // NOTE: Callers must have already dropped any trailing zeroes from `factors`
    pub(crate) fn from_normalized(factors: Vec<i64>) -> Self {
        debug_assert_ne!(factors.last(), Some(&0));
        Self {
            factors,
            monoisotopic_mass: OnceLock::new(),
        }
    }

    // NOTE: Pairs up the counts of both compositions, padding the shorter one with zeroes
    fn zip_factors<'c>(&'c self, other: &'c Self) -> impl Iterator<Item = (i64, i64)> + 'c {
        self.factors
            .iter()
            .zip_longest(&other.factors)
            .map(|pair| match pair {
                EitherOrBoth::Both(&lhs, &rhs) => (lhs, rhs),
                EitherOrBoth::Left(&lhs) => (lhs, 0),
                EitherOrBoth::Right(&rhs) => (0, rhs),
            })
    }
}

// Module Tests ========================================================================================================
