// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod state;

use crate::state::CatalogState;
use anyhow::Error;
use catalog::{
    Direction, ErrorKind, Movie, Rank, Repository, Review, SearchKind, User, Watchlist,
    Year,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory catalog. Reads share the lock, writes (movies, users, reviews
/// and watchlist entries) are serialized behind it.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<CatalogState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build a populated catalog, any rejected movie or user aborts the whole
    /// load and nothing is returned.
    pub fn with_data(movies: Vec<Movie>, users: Vec<User>) -> Result<Self, Error> {
        let mut state = CatalogState::new();
        let (n_movies, n_users) = (movies.len(), users.len());

        for movie in movies {
            state.add_movie(movie)?;
        }

        for user in users {
            state.add_user(user)?;
        }

        log::info!("Loaded {} movies and {} users", n_movies, n_users);
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogState>, Error> {
        self.state.read().map_err(|_| ErrorKind::Poisoned.into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogState>, Error> {
        self.state.write().map_err(|_| ErrorKind::Poisoned.into())
    }
}

fn owned(movies: Vec<&Movie>) -> Vec<Movie> {
    movies.into_iter().cloned().collect()
}

impl Repository for MemoryRepository {
    fn add_user(&self, user: User) -> Result<(), Error> {
        log::debug!("Adding user {}", user.username);
        self.write()?.add_user(user)?;
        Ok(())
    }

    fn user(&self, username: &str) -> Result<Option<User>, Error> {
        Ok(self.read()?.user(username).cloned())
    }

    fn add_movie(&self, movie: Movie) -> Result<(), Error> {
        log::debug!("Adding movie {}", movie);
        self.write()?.add_movie(movie)?;
        Ok(())
    }

    fn movie(&self, rank: Rank) -> Result<Option<Movie>, Error> {
        Ok(self.read()?.movie(rank).cloned())
    }

    fn movies(&self) -> Result<Vec<Movie>, Error> {
        Ok(self.read()?.movies().cloned().collect())
    }

    fn movies_by_rank(&self, ranks: &[Rank]) -> Result<Vec<Movie>, Error> {
        Ok(owned(self.read()?.movies_by_rank(ranks)))
    }

    fn movies_by_date(&self, year: Year) -> Result<Vec<Movie>, Error> {
        Ok(owned(self.read()?.movies_by_date(year)))
    }

    fn movie_count(&self) -> Result<usize, Error> {
        Ok(self.read()?.count())
    }

    fn first_movie(&self) -> Result<Option<Movie>, Error> {
        Ok(self.read()?.first_movie().cloned())
    }

    fn last_movie(&self) -> Result<Option<Movie>, Error> {
        Ok(self.read()?.last_movie().cloned())
    }

    fn first_movie_by_date(&self) -> Result<Option<Movie>, Error> {
        Ok(self.read()?.first_movie_by_date().cloned())
    }

    fn last_movie_by_date(&self) -> Result<Option<Movie>, Error> {
        Ok(self.read()?.last_movie_by_date().cloned())
    }

    fn adjacent_date(&self, movie: &Movie, direction: Direction) -> Result<Option<Year>, Error> {
        Ok(self.read()?.adjacent_date(movie, direction))
    }

    fn years(&self) -> Result<Vec<Year>, Error> {
        Ok(self.read()?.years())
    }

    // Scan under the read lock instead of cloning the whole catalog first
    fn find_by_type(&self, query: &str, kind: SearchKind) -> Result<Vec<Movie>, Error> {
        Ok(owned(self.read()?.find(query, kind)))
    }

    fn add_review(
        &self,
        rank: Rank,
        text: &str,
        username: &str,
        rating: i64,
    ) -> Result<Review, Error> {
        let review = self
            .write()?
            .add_review(rank, text, username, rating)
            .map_err(|e| {
                log::warn!("Rejected review by {} on {}: {}", username, rank, e);
                e
            })?;

        log::debug!("Registered review {} by {} on {}", review.id, username, rank);
        Ok(review)
    }

    fn reviews(&self) -> Result<Vec<Review>, Error> {
        Ok(self.read()?.reviews().to_vec())
    }

    fn reviews_for_movie(&self, rank: Rank) -> Result<Vec<Review>, Error> {
        Ok(self
            .read()?
            .reviews_for_movie(rank)
            .into_iter()
            .cloned()
            .collect())
    }

    fn reviews_by_user(&self, username: &str) -> Result<Vec<Review>, Error> {
        Ok(self
            .read()?
            .reviews_by_user(username)
            .into_iter()
            .cloned()
            .collect())
    }

    fn add_to_watchlist(&self, username: &str, rank: Rank) -> Result<bool, Error> {
        let added = self.write()?.add_to_watchlist(username, rank)?;
        log::debug!("Watchlist of {} with {}: added={}", username, rank, added);
        Ok(added)
    }

    fn remove_from_watchlist(&self, username: &str, rank: Rank) -> Result<bool, Error> {
        Ok(self.write()?.remove_from_watchlist(username, rank)?)
    }

    fn watchlist(&self, username: &str) -> Result<Watchlist, Error> {
        Ok(self.read()?.watchlist(username))
    }

    fn is_in_watchlist(&self, username: &str, rank: Rank) -> Result<bool, Error> {
        Ok(self.read()?.is_in_watchlist(username, rank))
    }
}
