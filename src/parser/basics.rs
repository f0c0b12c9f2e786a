// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::Id;
use nom::bytes::complete::{take_till1, take_while1};
use nom::character::complete::{char, digit1};
use nom::combinator::map_res;
use nom::{sequence::delimited, IResult};

pub(crate) fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-')(input)
}

pub(crate) fn parse_string(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_till1(|c: char| c == '\''), char('\''))(input)
}

pub(crate) fn parse_number(input: &str) -> IResult<&str, Id> {
    map_res(digit1, |s: &str| s.parse::<Id>())(input)
}

/// Wraps a parser between parentheses, ex. `(3)`
pub(crate) fn parens<'a, O, F>(inner: F) -> impl Fn(&'a str) -> IResult<&'a str, O>
where
    F: Fn(&'a str) -> IResult<&'a str, O>,
{
    delimited(char('('), inner, char(')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idents() {
        let parsed = parse_ident("library");
        let expected = ("", "library");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_ident("this is not ok");
        let expected = (" is not ok", "this");

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_string() {
        let parsed = parse_string("'Cien años de soledad'");
        let expected = ("", "Cien años de soledad");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_string("'test@gmail.com')");
        let expected = (")", "test@gmail.com");

        assert_eq!(parsed, Ok(expected));

        assert!(parse_string("''").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        let parsed = parse_number("12345");
        let expected = ("", 12345);

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_number("12c3");
        let expected = ("c3", 12);
        assert_eq!(parsed, Ok(expected));

        // Doesn't fit an id
        assert!(parse_number("99999999999").is_err());
    }

    #[test]
    fn test_parens() {
        let parsed = parens(parse_number)("(42)");
        assert_eq!(parsed, Ok(("", 42)));

        assert!(parens(parse_number)("(42").is_err());
    }
}
