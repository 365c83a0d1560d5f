// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

mod basics;

use crate::parser::basics::{
    parse_ident, parse_number, parse_separator, parse_string, parse_unsigned,
};
use catalog::{Rank, SearchKind, Year};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::combinator::{map, map_res, opt};
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    Years,
    Movie(Rank),
    Browse(Year, usize),
    First,
    Last,
    Search(SearchKind, String, usize),
    Login(String, String),
    Review(Rank, i64, String),
    Reviews(Rank),
    Watch(Rank),
    Unwatch(Rank),
    Watchlist,
    Random(usize),
}

/// `name(<args>)`
fn call<'a, O, F>(name: &'static str, args: F) -> impl Fn(&'a str) -> IResult<&'a str, O>
where
    F: Fn(&'a str) -> IResult<&'a str, O>,
{
    preceded(tag(name), delimited(char('('), args, char(')')))
}

fn parse_search_kind(input: &str) -> IResult<&str, SearchKind> {
    map_res(parse_ident, |kind: &str| kind.parse::<SearchKind>())(input)
}

fn parse_cursor(input: &str) -> IResult<&str, usize> {
    map(opt(preceded(parse_separator, parse_unsigned::<usize>)), |cursor| {
        cursor.unwrap_or(0)
    })(input)
}

fn parse_listing(input: &str) -> IResult<&str, Statement> {
    alt((
        map(call("movie", parse_unsigned::<Rank>), Statement::Movie),
        map(
            call("browse", tuple((parse_unsigned::<Year>, parse_cursor))),
            |(year, cursor)| Statement::Browse(year, cursor),
        ),
        map(
            call(
                "search",
                tuple((parse_search_kind, parse_separator, parse_string, parse_cursor)),
            ),
            |(kind, _, query, cursor)| Statement::Search(kind, query.into(), cursor),
        ),
        map(call("random", parse_unsigned::<usize>), Statement::Random),
        map(tag("years"), |_| Statement::Years),
        map(tag("first"), |_| Statement::First),
        map(tag("last"), |_| Statement::Last),
    ))(input)
}

fn parse_session(input: &str) -> IResult<&str, Statement> {
    alt((
        map(
            call("login", tuple((parse_ident, parse_separator, parse_string))),
            |(user, _, password)| Statement::Login(user.into(), password.into()),
        ),
        map(
            call(
                "review",
                tuple((
                    parse_unsigned::<Rank>,
                    parse_separator,
                    parse_number,
                    parse_separator,
                    parse_string,
                )),
            ),
            |(rank, _, rating, _, text)| Statement::Review(rank, rating, text.into()),
        ),
        map(call("reviews", parse_unsigned::<Rank>), Statement::Reviews),
        map(call("watch", parse_unsigned::<Rank>), Statement::Watch),
        map(call("unwatch", parse_unsigned::<Rank>), Statement::Unwatch),
        map(tag("watchlist"), |_| Statement::Watchlist),
    ))(input)
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    alt((parse_listing, parse_session))(input)
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_statements() {
        assert_eq!(parse_line("years"), Some(Statement::Years));
        assert_eq!(parse_line("first"), Some(Statement::First));
        assert_eq!(parse_line(" last "), Some(Statement::Last));
        assert_eq!(parse_line("watchlist"), Some(Statement::Watchlist));
    }

    #[test]
    fn movie_statement() {
        let parsed = parse_statement("movie(42)");
        let expected = ("", Statement::Movie(42));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn browse_statement() {
        let parsed = parse_statement("browse(2016)");
        let expected = ("", Statement::Browse(2016, 0));

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("browse(2016, 20)");
        let expected = ("", Statement::Browse(2016, 20));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn search_statement() {
        let parsed = parse_statement("search(genre, 'Drama, War')");
        let expected = (
            "",
            Statement::Search(SearchKind::Genre, "Drama, War".into(), 0),
        );

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("search(actor, 'Tom Hardy', 10)");
        let expected = (
            "",
            Statement::Search(SearchKind::Actor, "Tom Hardy".into(), 10),
        );

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn session_statements() {
        let parsed = parse_statement("login(ella, 'lady of the lake')");
        let expected = (
            "",
            Statement::Login("ella".into(), "lady of the lake".into()),
        );

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("review(3, 9, 'Creepy and great')");
        let expected = ("", Statement::Review(3, 9, "Creepy and great".into()));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn similar_prefixes() {
        assert_eq!(parse_line("reviews(3)"), Some(Statement::Reviews(3)));
        assert_eq!(parse_line("watch(3)"), Some(Statement::Watch(3)));
        assert_eq!(parse_line("unwatch(3)"), Some(Statement::Unwatch(3)));
        assert_eq!(parse_line("random(5)"), Some(Statement::Random(5)));
    }

    #[test]
    fn parse_invalid_line() {
        assert!(parse_line("movie()").is_none());
        assert!(parse_line("search(rating, 'ten')").is_none());
        assert!(parse_line("browse(2016);").is_none());
        assert!(parse_line("years please").is_none());
    }
}
