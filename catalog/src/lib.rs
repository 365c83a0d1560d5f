// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;
pub mod models;
pub mod pagination;
pub mod password;
pub mod records;
pub mod search;

use anyhow::Error;
use rand::{seq::SliceRandom, RngCore};

pub use entity::{Entity, ToTable};
pub use error::ErrorKind;
pub use models::{Actor, Director, Genre, Movie, Rating, Review, ReviewId, User, Watchlist};
pub use pagination::{Page, Pager};
pub use search::{Query, SearchKind};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Stable external identifier of a movie, unrelated to its sort position.
pub type Rank = u32;
pub type Year = u16;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Previous,
    Next,
}

/// The catalog contract shared by every store. Lookups by rank or username
/// answer `None` (or an empty list) on a miss, only writes against unknown
/// references fail.
pub trait Repository {
    /// Register a user, usernames are unique
    fn add_user(&self, user: User) -> Result<()>;

    /// Get a user by username
    fn user(&self, username: &str) -> Result<Option<User>>;

    /// Insert a movie keeping the (title, release date) order
    fn add_movie(&self, movie: Movie) -> Result<()>;

    /// Get a movie by rank
    fn movie(&self, rank: Rank) -> Result<Option<Movie>>;

    /// Get all movies in store order
    fn movies(&self) -> Result<Vec<Movie>>;

    /// Get the movies for the requested ranks, in the requested order,
    /// unknown ranks are skipped
    fn movies_by_rank(&self, ranks: &[Rank]) -> Result<Vec<Movie>>;

    /// Get the movies released on the given year, in store order
    fn movies_by_date(&self, year: Year) -> Result<Vec<Movie>>;

    /// Number of movies in the store
    fn movie_count(&self) -> Result<usize>;

    /// First movie by (title, release date)
    fn first_movie(&self) -> Result<Option<Movie>>;

    /// Last movie by (title, release date)
    fn last_movie(&self) -> Result<Option<Movie>>;

    /// Earliest release, ties go to the first in store order
    fn first_movie_by_date(&self) -> Result<Option<Movie>>;

    /// Latest release, ties go to the first in store order
    fn last_movie_by_date(&self) -> Result<Option<Movie>>;

    /// Nearest populated year strictly before or after the movie's year,
    /// `None` if the movie isn't stored or there's no such year
    fn adjacent_date(&self, movie: &Movie, direction: Direction) -> Result<Option<Year>>;

    /// Distinct release years, ascending
    fn years(&self) -> Result<Vec<Year>>;

    /// Search movies by actor, director, genres or title, in store order
    fn find_by_type(&self, query: &str, kind: SearchKind) -> Result<Vec<Movie>> {
        let movies = self.movies()?;
        Ok(search::find_by_type(&movies, query, kind)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Pick up to `quantity` distinct movies at random
    fn random_movies(&self, quantity: usize, rng: &mut dyn RngCore) -> Result<Vec<Movie>> {
        let movies = self.movies()?;
        Ok(movies.choose_multiple(rng, quantity).cloned().collect())
    }

    /// Create a review and attach it to both its movie and its author
    fn add_review(&self, rank: Rank, text: &str, username: &str, rating: i64) -> Result<Review>;

    /// Get all reviews in registration order
    fn reviews(&self) -> Result<Vec<Review>>;

    /// Get the reviews of a movie, empty if the rank is unknown
    fn reviews_for_movie(&self, rank: Rank) -> Result<Vec<Review>>;

    /// Get the reviews written by a user, empty if the user is unknown
    fn reviews_by_user(&self, username: &str) -> Result<Vec<Review>>;

    /// Add a movie to a user's watchlist, adding it twice is a no-op.
    /// Returns whether the watchlist changed
    fn add_to_watchlist(&self, username: &str, rank: Rank) -> Result<bool>;

    /// Remove a movie from a user's watchlist. Returns whether it was there
    fn remove_from_watchlist(&self, username: &str, rank: Rank) -> Result<bool>;

    /// Get a user's watchlist, empty if the user is unknown
    fn watchlist(&self, username: &str) -> Result<Watchlist>;

    /// Check if a movie is in a user's watchlist
    fn is_in_watchlist(&self, username: &str, rank: Rank) -> Result<bool>;
}
