// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::models::Movie;
use crate::Rank;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SearchKind {
    Actor,
    Director,
    Genre,
    Title,
}

impl FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "actor" => Ok(Self::Actor),
            "director" => Ok(Self::Director),
            "genre" | "genres" => Ok(Self::Genre),
            "title" | "movie" => Ok(Self::Title),
            other => Err(format!("Unknown search kind '{}'", other)),
        }
    }
}

impl Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Actor => write!(f, "actor"),
            SearchKind::Director => write!(f, "director"),
            SearchKind::Genre => write!(f, "genre"),
            SearchKind::Title => write!(f, "title"),
        }
    }
}

/// A normalized search. Actor, director and genre terms match as
/// case-insensitive substrings while titles must match exactly (ignoring
/// case), so "dune" finds "Dune" but not "Dune: Part Two".
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Query {
    Actor(String),
    Director(String),
    Genres(Vec<String>),
    Title(String),
}

impl Query {
    pub fn new(query: &str, kind: SearchKind) -> Self {
        let normalized = query.trim().to_lowercase();

        match kind {
            SearchKind::Actor => Self::Actor(normalized),
            SearchKind::Director => Self::Director(normalized),
            SearchKind::Genre => Self::Genres(
                normalized
                    .split(',')
                    .map(str::trim)
                    .filter(|term| !term.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            SearchKind::Title => Self::Title(normalized),
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            Query::Actor(name) => movie
                .actors
                .iter()
                .any(|actor| actor.name().to_lowercase().contains(name.as_str())),

            Query::Director(name) => movie
                .director
                .name()
                .to_lowercase()
                .contains(name.as_str()),

            // Every listed term has to be present
            Query::Genres(terms) => terms.iter().all(|term| {
                movie
                    .genres
                    .iter()
                    .any(|genre| genre.name().to_lowercase().contains(term.as_str()))
            }),

            Query::Title(title) => movie.title.to_lowercase() == *title,
        }
    }
}

/// Filter movies keeping their incoming order.
pub fn find_by_type<'a, I>(movies: I, query: &str, kind: SearchKind) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let query = Query::new(query, kind);
    movies.into_iter().filter(|m| query.matches(m)).collect()
}

pub fn ranks<'a, I>(movies: I) -> Vec<Rank>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies.into_iter().map(|m| m.rank).collect()
}
