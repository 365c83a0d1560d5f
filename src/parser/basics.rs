// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use nom::bytes::complete::{tag, take_till1, take_while, take_while1};
use nom::character::complete::{char, digit1};
use nom::combinator::{map_res, opt, recognize};
use nom::sequence::{delimited, pair};
use nom::IResult;
use std::str::FromStr;

pub(crate) fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')(input)
}

pub(crate) fn parse_string(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_till1(|c: char| c == '\''), char('\''))(input)
}

pub(crate) fn parse_number(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

pub(crate) fn parse_unsigned<T: FromStr>(input: &str) -> IResult<&str, T> {
    map_res(digit1, |s: &str| s.parse::<T>())(input)
}

pub(crate) fn parse_separator(input: &str) -> IResult<&str, &str> {
    delimited(
        take_while(|c: char| c == ' '),
        tag(","),
        take_while(|c: char| c == ' '),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idents() {
        let parsed = parse_ident("fmercury_1946");
        let expected = ("", "fmercury_1946");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_ident("this is not ok");
        let expected = (" is not ok", "this");

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_string() {
        let parsed = parse_string("'Dune: Part One'");
        let expected = ("", "Dune: Part One");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_string("'Drama, War')");
        let expected = (")", "Drama, War");

        assert_eq!(parsed, Ok(expected));
        assert!(parse_string("''").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        let parsed = parse_number("12345");
        let expected = ("", 12345);

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_number("-3, ");
        let expected = (", ", -3);
        assert_eq!(parsed, Ok(expected));

        let parsed = parse_number("12c3");
        let expected = ("c3", 12);
        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_unsigned() {
        assert_eq!(parse_unsigned::<u16>("2016)"), Ok((")", 2016)));
        assert!(parse_unsigned::<u16>("99999").is_err());
        assert!(parse_unsigned::<usize>("-1").is_err());
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator(" ,  x"), Ok(("x", ",")));
        assert!(parse_separator("x").is_err());
    }
}
