use nom::{bytes::complete::take_till, multi::many0, sequence::pair};

use super::{
    errors::ParseResult,
    primitives::{OffsetKind, offset_kind},
};

/// Expression = Fragment , { Offset Kind , Fragment } ;
pub fn expression(i: &str) -> ParseResult<(&str, Vec<(OffsetKind, &str)>)> {
    pair(fragment, many0(pair(offset_kind, fragment)))(i)
}

/// Fragment = { ? any character except "+" or "-" ? } ;
fn fragment(i: &str) -> ParseResult<&str> {
    take_till(|c| c == '+' || c == '-')(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression() {
        // A single fragment
        assert_eq!(expression("H2O"), Ok(("", ("H2O", Vec::new()))));
        assert_eq!(expression(""), Ok(("", ("", Vec::new()))));
        // Multiple fragments
        assert_eq!(
            expression("C2H3NO-H2O+NH3"),
            Ok((
                "",
                (
                    "C2H3NO",
                    vec![(OffsetKind::Remove, "H2O"), (OffsetKind::Add, "NH3")]
                )
            ))
        );
        // Leading, trailing, and repeated operators produce empty fragments
        assert_eq!(
            expression("-H"),
            Ok(("", ("", vec![(OffsetKind::Remove, "H")])))
        );
        assert_eq!(
            expression("H+"),
            Ok(("", ("H", vec![(OffsetKind::Add, "")])))
        );
        assert_eq!(
            expression("H+-O"),
            Ok((
                "",
                ("H", vec![(OffsetKind::Add, ""), (OffsetKind::Remove, "O")])
            ))
        );
        // Fragments can contain anything else
        assert_eq!(
            expression("H2O+:PEPTIDE:"),
            Ok(("", ("H2O", vec![(OffsetKind::Add, ":PEPTIDE:")])))
        );
    }
}
