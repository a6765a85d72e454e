use nom::{
    character::complete::char,
    multi::separated_list0,
    sequence::delimited,
};

use super::{errors::ParseResult, final_parser, primitives::signed_count};
use crate::{Composition, Result};

/// Reads fragments like `[2,1]` as the raw factors of a [`Composition`], for use with [`parse_with`]
///
/// Anything that isn't a factor list is a no-match (`Ok(None)`), so this never returns an error.
///
/// [`parse_with`]: super::parse_with
pub fn factor_list(fragment: &str) -> Result<Option<Composition>> {
    let parsed = final_parser(factors)(fragment).ok();
    Ok(parsed.map(Composition::new))
}

/// Factors = "[" , [ Signed Count , { "," , Signed Count } ] , "]" ;
fn factors(i: &str) -> ParseResult<Vec<i64>> {
    delimited(char('['), separated_list0(char(','), signed_count), char(']'))(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors() {
        assert_eq!(factors("[2,1]"), Ok(("", vec![2, 1])));
        assert_eq!(factors("[-1,0,3]"), Ok(("", vec![-1, 0, 3])));
        assert_eq!(factors("[]"), Ok(("", Vec::new())));
        assert!(factors("2,1").is_err());
        assert!(factors("[2;1]").is_err());
    }

    #[test]
    fn test_factor_list() {
        assert_eq!(factor_list("[2,1]").unwrap(), Some(Composition::new([2, 1])));
        assert_eq!(factor_list("[0,0,1,0]").unwrap(), Some(Composition::new([0, 0, 1])));
        assert_eq!(factor_list("[]").unwrap(), Some(Composition::default()));
        // No-matches
        assert_eq!(factor_list("[2,1").unwrap(), None);
        assert_eq!(factor_list("[2,1]H").unwrap(), None);
        assert_eq!(factor_list("[2,,1]").unwrap(), None);
        assert_eq!(factor_list("H$").unwrap(), None);
    }
}
