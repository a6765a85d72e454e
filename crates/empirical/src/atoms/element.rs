use std::fmt::{self, Display, Formatter};

use crate::{AverageMass, Element, Massive, MonoisotopicMass};

impl Element {
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Massive for Element {
    fn monoisotopic_mass(&self) -> MonoisotopicMass {
        MonoisotopicMass(self.monoisotopic_mass)
    }

    fn average_mass(&self) -> AverageMass {
        AverageMass(self.average_mass)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::ElementTable;

    use super::*;

    #[test]
    fn element_properties() {
        let table = ElementTable::global();
        let carbon = table.lookup("C").unwrap();
        assert_eq!(carbon.symbol(), "C");
        assert_eq!(carbon.name(), "Carbon");
        assert_eq!(carbon.to_string(), "C");
        assert_eq!(carbon.monoisotopic_mass(), MonoisotopicMass(dec!(12)));
        assert_eq!(carbon.average_mass(), AverageMass(dec!(12.0107)));

        let selenium = table.lookup("Se").unwrap();
        assert_eq!(selenium.to_string(), "Se");
        assert_eq!(selenium.monoisotopic_mass(), MonoisotopicMass(dec!(79.9165218)));
        // Boxes and references forward to the element itself
        assert_eq!(
            Box::new(selenium).average_mass(),
            AverageMass(dec!(78.96))
        );
    }

    #[test]
    fn serialization() {
        let hydrogen = ElementTable::global().lookup("H").unwrap();
        assert_eq!(
            serde_json::to_value(hydrogen).unwrap(),
            serde_json::json!({
                "symbol": "H",
                "name": "Hydrogen",
                "monoisotopic_mass": "1.0078250321",
                "average_mass": "1.00794",
            })
        );
    }
}
