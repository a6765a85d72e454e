// Standard Library Imports
use std::{str::FromStr, sync::LazyLock};

// External Crate Imports
use ahash::{HashMap, HashMapExt};
use knuffel::Decode;
use log::debug;
use miette::{Diagnostic, Result, miette};
use rust_decimal::Decimal;
use thiserror::Error;

// Local Crate Imports
use crate::{Element, ElementTable};

// Public API ==========================================================================================================

pub const DEFAULT_KDL: &str = include_str!("../../element_table.kdl");

/// Elements that are always given the first indices of a table (when the table defines them), in this order
pub const INDEX_PRIORITY: [&str; 9] = ["H", "O", "C", "N", "S", "P", "Fe", "Ni", "Se"];

static GLOBAL: LazyLock<ElementTable> = LazyLock::new(|| {
    // NOTE: The embedded table is checked by this module's tests, so this can only fail if `element_table.kdl` was
    // edited without running them
    let table = ElementTable::from_kdl("element_table.kdl", DEFAULT_KDL)
        .expect("the embedded element table failed to load");
    debug!("loaded the default element table ({} elements)", table.len());
    table
});

impl ElementTable {
    /// The process-wide table built from [`DEFAULT_KDL`]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    pub fn from_kdl(file_name: impl AsRef<str>, kdl_text: impl AsRef<str>) -> Result<Self> {
        let parsed_table: ElementTableKdl = knuffel::parse(file_name.as_ref(), kdl_text.as_ref())?;

        let mut elements: Vec<_> = parsed_table.elements.into_iter().map(Element::from).collect();
        // NOTE: This sort is stable, so everything outside of `INDEX_PRIORITY` keeps the order of the KDL document
        elements.sort_by_key(|element| {
            INDEX_PRIORITY
                .iter()
                .position(|&symbol| symbol == element.symbol)
                .unwrap_or(INDEX_PRIORITY.len())
        });

        let mut indices = HashMap::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            if indices.insert(element.symbol.clone(), index).is_some() {
                return Err(miette!(
                    "the element {:?} was defined more than once in {}",
                    element.symbol,
                    file_name.as_ref()
                ));
            }
        }

        Ok(Self { elements, indices })
    }

    #[must_use]
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.indices.get(symbol).copied()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    #[must_use]
    pub fn lookup(&self, symbol: &str) -> Option<&Element> {
        self.index_of(symbol).and_then(|index| self.get(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in index order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}

// KDL File Schema =====================================================================================================

#[derive(Debug, Decode)]
struct ElementTableKdl {
    #[knuffel(child, unwrap(children))]
    elements: Vec<ElementKdl>,
}

#[derive(Debug, Decode)]
struct ElementKdl {
    #[knuffel(node_name)]
    symbol: ElementSymbol,
    #[knuffel(argument)]
    name: String,
    #[knuffel(property(name = "monoisotopic"), str)]
    monoisotopic_mass: Decimal,
    #[knuffel(property(name = "average"), str)]
    average_mass: Decimal,
}

#[derive(Debug)]
struct ElementSymbol(String);

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(help(
    "element symbols are an uppercase ASCII letter, optionally followed by a lowercase one, like C or Fe"
))]
#[error("{0:?} is not a valid element symbol")]
struct InvalidSymbolError(String);

impl FromStr for ElementSymbol {
    type Err = InvalidSymbolError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.as_bytes() {
            [upper] | [upper, b'a'..=b'z'] if upper.is_ascii_uppercase() => Ok(Self(s.to_owned())),
            _ => Err(InvalidSymbolError(s.to_owned())),
        }
    }
}

impl From<ElementKdl> for Element {
    fn from(value: ElementKdl) -> Self {
        let ElementKdl {
            symbol: ElementSymbol(symbol),
            name,
            monoisotopic_mass,
            average_mass,
        } = value;
        Self {
            symbol,
            name,
            monoisotopic_mass,
            average_mass,
        }
    }
}

// Module Tests ========================================================================================================
