// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::people::{Actor, Director, Genre};
use super::reviews::ReviewId;
use crate::{Rank, Year};
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// Earliest accepted release year.
pub const MIN_RELEASE_YEAR: Year = 1900;

/// A catalog movie. Identity is the `(title, release_date)` pair, the rank is
/// only an external handle and doesn't take part in equality or ordering.
#[derive(Debug, Clone, Default)]
pub struct Movie {
    pub rank: Rank,
    pub title: String,
    pub release_date: Year,
    pub description: String,
    pub director: Director,
    pub actors: Vec<Actor>,
    pub genres: Vec<Genre>,
    pub reviews: Vec<ReviewId>,
    pub poster: Option<String>,
}

impl Movie {
    pub fn new(rank: Rank, title: &str, release_date: Year) -> Self {
        Self {
            rank,
            title: title.trim().into(),
            release_date,
            ..Default::default()
        }
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().into();
    }

    pub fn set_director(&mut self, director: Director) {
        self.director = director;
    }

    pub fn set_poster(&mut self, poster: &str) {
        self.poster = Some(poster.into());
    }

    pub fn add_actor(&mut self, actor: Actor) {
        if !self.actors.contains(&actor) {
            self.actors.push(actor);
        }
    }

    pub fn remove_actor(&mut self, actor: &Actor) {
        self.actors.retain(|a| a != actor);
    }

    pub fn add_genre(&mut self, genre: Genre) {
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
        }
    }

    pub fn remove_genre(&mut self, genre: &Genre) {
        self.genres.retain(|g| g != genre);
    }

    pub fn add_review(&mut self, review: ReviewId) {
        self.reviews.push(review);
    }

    pub fn number_of_reviews(&self) -> usize {
        self.reviews.len()
    }

    pub fn actor_names(&self) -> Vec<&str> {
        self.actors.iter().map(Actor::name).collect()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(Genre::name).collect()
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.release_date == other.release_date
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.release_date.hash(state);
    }
}

impl PartialOrd for Movie {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Title first (case-sensitive), then release date ascending.
impl Ord for Movie {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then(self.release_date.cmp(&other.release_date))
    }
}

impl Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Movie {}, {}>", self.title, self.release_date)
    }
}
