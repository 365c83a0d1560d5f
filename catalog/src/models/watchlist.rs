// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::movies::Movie;
use std::iter::FromIterator;
use std::slice::Iter;

/// Ordered set of movies a user marked for later, deduplicated by movie
/// identity (title and release date).
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    movies: Vec<Movie>,
}

impl Watchlist {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns false if the movie was already present.
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(&movie) {
            return false;
        }

        self.movies.push(movie);
        true
    }

    pub fn remove(&mut self, movie: &Movie) -> bool {
        let len = self.movies.len();
        self.movies.retain(|m| m != movie);
        self.movies.len() != len
    }

    pub fn contains(&self, movie: &Movie) -> bool {
        self.movies.contains(movie)
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn first(&self) -> Option<&Movie> {
        self.movies.first()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Movie> {
        self.movies.iter()
    }

    pub fn as_slice(&self) -> &[Movie] {
        &self.movies
    }
}

impl FromIterator<Movie> for Watchlist {
    fn from_iter<T: IntoIterator<Item = Movie>>(iter: T) -> Self {
        let mut watchlist = Watchlist::new();
        for movie in iter {
            watchlist.add(movie);
        }

        watchlist
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a Movie;
    type IntoIter = Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
