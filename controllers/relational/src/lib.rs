// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod models;
pub mod schema;

use crate::models::{
    movies::{MovieRow, NewMovie},
    reviews::{NewReview, ReviewRow},
    users::{NewUser, UserRow},
    watchlist::{NewWatchlistEntry, WatchlistEntry},
};
use crate::schema::{movies, reviews, users, watchlist};
use anyhow::Error;
use catalog::models::check_attachment;
use catalog::{
    Direction, ErrorKind, Movie, Rank, Repository, Review, ReviewId, User, Watchlist, Year,
};
use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use diesel::{delete, insert_into, prelude::*};
use std::collections::HashMap;

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS movies (
    "rank" INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    release_date INTEGER NOT NULL,
    description TEXT NOT NULL,
    director TEXT NOT NULL,
    actors TEXT NOT NULL,
    genres TEXT NOT NULL,
    poster TEXT,
    UNIQUE (title, release_date)
);

CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY NOT NULL,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY NOT NULL,
    author TEXT NOT NULL REFERENCES users (username),
    movie INTEGER NOT NULL REFERENCES movies ("rank"),
    body TEXT NOT NULL,
    rating INTEGER,
    created_at TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS watchlist (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    username TEXT NOT NULL REFERENCES users (username),
    movie INTEGER NOT NULL REFERENCES movies ("rank"),
    UNIQUE (username, movie)
);
"#;

/// Open a connection and make sure the catalog tables exist.
pub fn establish_connection(url: &str) -> Result<SqliteConnection, Error> {
    let conn = SqliteConnection::establish(url)?;
    conn.batch_execute(SCHEMA)?;
    Ok(conn)
}

/// Catalog persisted in SQLite. Store order is `(title, release_date)`, which
/// SQLite's binary collation sorts the same way `Movie` does.
pub struct RelationalRepository {
    conn: SqliteConnection,
}

impl RelationalRepository {
    pub fn with_url(url: &str) -> Result<Self, Error> {
        let conn = establish_connection(url)?;
        Ok(Self { conn })
    }

    /// Open the database and load every movie and user in one transaction,
    /// a rejected row leaves the database as it was.
    pub fn with_data(url: &str, movies: Vec<Movie>, users: Vec<User>) -> Result<Self, Error> {
        let repo = Self::with_url(url)?;
        repo.populate(&movies, &users)?;
        Ok(repo)
    }

    pub fn populate(&self, movies: &[Movie], users: &[User]) -> Result<(), Error> {
        self.conn.transaction::<_, Error, _>(|| {
            for movie in movies {
                self.insert_movie(movie)?;
            }

            for user in users {
                self.insert_user(user)?;
            }

            Ok(())
        })?;

        log::info!("Loaded {} movies and {} users", movies.len(), users.len());
        Ok(())
    }

    fn insert_movie(&self, movie: &Movie) -> Result<(), Error> {
        let rank = i64::from(movie.rank);

        let taken: i64 = movies::table
            .filter(movies::rank.eq(rank))
            .count()
            .get_result(&self.conn)?;

        if taken > 0 {
            return Err(ErrorKind::DuplicateKey(format!("rank({})", movie.rank)).into());
        }

        let same: i64 = movies::table
            .filter(movies::title.eq(&movie.title))
            .filter(movies::release_date.eq(i32::from(movie.release_date)))
            .count()
            .get_result(&self.conn)?;

        if same > 0 {
            return Err(ErrorKind::DuplicateKey(movie.to_string()).into());
        }

        insert_into(movies::table)
            .values(&NewMovie::from(movie))
            .execute(&self.conn)?;

        Ok(())
    }

    fn insert_user(&self, user: &User) -> Result<(), Error> {
        let taken: i64 = users::table
            .filter(users::username.eq(&user.username))
            .count()
            .get_result(&self.conn)?;

        if taken > 0 {
            return Err(ErrorKind::DuplicateKey(format!("username({})", user.username)).into());
        }

        insert_into(users::table)
            .values(&NewUser::from(user))
            .execute(&self.conn)?;

        Ok(())
    }

    /// Review ids of the given movies, grouped by rank in registration order.
    fn review_ids(&self, ranks: Vec<i64>) -> Result<HashMap<i64, Vec<ReviewId>>, Error> {
        let pairs: Vec<(i64, i64)> = reviews::table
            .select((reviews::movie, reviews::id))
            .filter(reviews::movie.eq_any(ranks))
            .order(reviews::id.asc())
            .load(&self.conn)?;

        let mut grouped: HashMap<i64, Vec<ReviewId>> = HashMap::new();
        for (movie, id) in pairs {
            grouped.entry(movie).or_default().push(ReviewId(id as u64));
        }

        Ok(grouped)
    }

    fn complete(&self, rows: Vec<MovieRow>) -> Result<Vec<Movie>, Error> {
        let mut grouped = self.review_ids(rows.iter().map(|row| row.rank).collect())?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let reviews = grouped.remove(&row.rank).unwrap_or_default();
                row.into_movie(reviews)
            })
            .collect())
    }

    fn complete_one(&self, row: Option<MovieRow>) -> Result<Option<Movie>, Error> {
        let movies = self.complete(row.into_iter().collect())?;
        Ok(movies.into_iter().next())
    }

    fn user_exists(&self, username: &str) -> Result<bool, Error> {
        let count: i64 = users::table
            .filter(users::username.eq(username))
            .count()
            .get_result(&self.conn)?;

        Ok(count > 0)
    }

    fn require(&self, username: &str, rank: Rank) -> Result<(), Error> {
        let count: i64 = movies::table
            .filter(movies::rank.eq(i64::from(rank)))
            .count()
            .get_result(&self.conn)?;

        if count == 0 {
            return Err(ErrorKind::NoSuchMovie(rank).into());
        }

        if !self.user_exists(username)? {
            return Err(ErrorKind::NoSuchUser(username.into()).into());
        }

        Ok(())
    }

    fn watchlist_entry(&self, username: &str, rank: Rank) -> Result<Option<WatchlistEntry>, Error> {
        Ok(watchlist::table
            .filter(watchlist::username.eq(username))
            .filter(watchlist::movie.eq(i64::from(rank)))
            .first::<WatchlistEntry>(&self.conn)
            .optional()?)
    }
}

impl Repository for RelationalRepository {
    fn add_user(&self, user: User) -> Result<(), Error> {
        log::debug!("Adding user {}", user.username);
        self.insert_user(&user)
    }

    fn user(&self, username: &str) -> Result<Option<User>, Error> {
        let row = users::table
            .find(username)
            .first::<UserRow>(&self.conn)
            .optional()?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let reviews = reviews::table
            .select(reviews::id)
            .filter(reviews::author.eq(username))
            .order(reviews::id.asc())
            .load::<i64>(&self.conn)?
            .into_iter()
            .map(|id| ReviewId(id as u64))
            .collect();

        Ok(Some(row.into_user(reviews)))
    }

    fn add_movie(&self, movie: Movie) -> Result<(), Error> {
        log::debug!("Adding movie {}", movie);
        self.conn
            .transaction::<_, Error, _>(|| self.insert_movie(&movie))
    }

    fn movie(&self, rank: Rank) -> Result<Option<Movie>, Error> {
        let row = movies::table
            .find(i64::from(rank))
            .first::<MovieRow>(&self.conn)
            .optional()?;

        self.complete_one(row)
    }

    fn movies(&self) -> Result<Vec<Movie>, Error> {
        let rows = movies::table
            .order((movies::title.asc(), movies::release_date.asc()))
            .load::<MovieRow>(&self.conn)?;

        self.complete(rows)
    }

    fn movies_by_rank(&self, ranks: &[Rank]) -> Result<Vec<Movie>, Error> {
        let wanted: Vec<i64> = ranks.iter().map(|&rank| i64::from(rank)).collect();
        let rows = movies::table
            .filter(movies::rank.eq_any(wanted))
            .load::<MovieRow>(&self.conn)?;

        let found: HashMap<Rank, Movie> = self
            .complete(rows)?
            .into_iter()
            .map(|movie| (movie.rank, movie))
            .collect();

        Ok(ranks
            .iter()
            .filter_map(|rank| found.get(rank))
            .cloned()
            .collect())
    }

    fn movies_by_date(&self, year: Year) -> Result<Vec<Movie>, Error> {
        let rows = movies::table
            .filter(movies::release_date.eq(i32::from(year)))
            .order(movies::title.asc())
            .load::<MovieRow>(&self.conn)?;

        self.complete(rows)
    }

    fn movie_count(&self) -> Result<usize, Error> {
        let count: i64 = movies::table.count().get_result(&self.conn)?;
        Ok(count as usize)
    }

    fn first_movie(&self) -> Result<Option<Movie>, Error> {
        let row = movies::table
            .order((movies::title.asc(), movies::release_date.asc()))
            .first::<MovieRow>(&self.conn)
            .optional()?;

        self.complete_one(row)
    }

    fn last_movie(&self) -> Result<Option<Movie>, Error> {
        let row = movies::table
            .order((movies::title.desc(), movies::release_date.desc()))
            .first::<MovieRow>(&self.conn)
            .optional()?;

        self.complete_one(row)
    }

    fn first_movie_by_date(&self) -> Result<Option<Movie>, Error> {
        let row = movies::table
            .order((movies::release_date.asc(), movies::title.asc()))
            .first::<MovieRow>(&self.conn)
            .optional()?;

        self.complete_one(row)
    }

    // Latest year, but ties still resolve to the first one in store order
    fn last_movie_by_date(&self) -> Result<Option<Movie>, Error> {
        let row = movies::table
            .order((movies::release_date.desc(), movies::title.asc()))
            .first::<MovieRow>(&self.conn)
            .optional()?;

        self.complete_one(row)
    }

    fn adjacent_date(&self, movie: &Movie, direction: Direction) -> Result<Option<Year>, Error> {
        let year = i32::from(movie.release_date);
        let stored: i64 = movies::table
            .filter(movies::title.eq(&movie.title))
            .filter(movies::release_date.eq(year))
            .count()
            .get_result(&self.conn)?;

        if stored == 0 {
            return Ok(None);
        }

        let adjacent = match direction {
            Direction::Previous => movies::table
                .select(movies::release_date)
                .filter(movies::release_date.lt(year))
                .order(movies::release_date.desc())
                .first::<i32>(&self.conn)
                .optional()?,
            Direction::Next => movies::table
                .select(movies::release_date)
                .filter(movies::release_date.gt(year))
                .order(movies::release_date.asc())
                .first::<i32>(&self.conn)
                .optional()?,
        };

        Ok(adjacent.map(|year| year as Year))
    }

    fn years(&self) -> Result<Vec<Year>, Error> {
        let years = movies::table
            .select(movies::release_date)
            .distinct()
            .order(movies::release_date.asc())
            .load::<i32>(&self.conn)?;

        Ok(years.into_iter().map(|year| year as Year).collect())
    }

    fn add_review(
        &self,
        rank: Rank,
        text: &str,
        username: &str,
        rating: i64,
    ) -> Result<Review, Error> {
        let review = self.conn.transaction::<_, Error, _>(|| {
            self.require(username, rank)?;

            let next: i64 = reviews::table.count().get_result(&self.conn)?;
            let review = Review::new(ReviewId(next as u64), username, rank, text, rating);

            insert_into(reviews::table)
                .values(&NewReview::from(&review))
                .execute(&self.conn)?;

            // Both sides are read back through the review table
            let user = self
                .user(username)?
                .ok_or(ErrorKind::InvalidReviewAttachment("User"))?;
            let movie = self
                .movie(rank)?
                .ok_or(ErrorKind::InvalidReviewAttachment("Movie"))?;

            check_attachment(&review, &user, &movie)?;
            Ok(review)
        });

        match review {
            Ok(review) => {
                log::debug!("Registered review {} by {} on {}", review.id, username, rank);
                Ok(review)
            }
            Err(e) => {
                log::warn!("Rejected review by {} on {}: {}", username, rank, e);
                Err(e)
            }
        }
    }

    fn reviews(&self) -> Result<Vec<Review>, Error> {
        let rows = reviews::table
            .order(reviews::id.asc())
            .load::<ReviewRow>(&self.conn)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn reviews_for_movie(&self, rank: Rank) -> Result<Vec<Review>, Error> {
        let rows = reviews::table
            .filter(reviews::movie.eq(i64::from(rank)))
            .order(reviews::id.asc())
            .load::<ReviewRow>(&self.conn)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn reviews_by_user(&self, username: &str) -> Result<Vec<Review>, Error> {
        let rows = reviews::table
            .filter(reviews::author.eq(username))
            .order(reviews::id.asc())
            .load::<ReviewRow>(&self.conn)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn add_to_watchlist(&self, username: &str, rank: Rank) -> Result<bool, Error> {
        let added = self.conn.transaction::<_, Error, _>(|| {
            self.require(username, rank)?;

            if self.watchlist_entry(username, rank)?.is_some() {
                return Ok(false);
            }

            let entry = NewWatchlistEntry {
                username,
                movie: i64::from(rank),
            };

            insert_into(watchlist::table)
                .values(&entry)
                .execute(&self.conn)?;

            Ok(true)
        })?;

        log::debug!("Watchlist of {} with {}: added={}", username, rank, added);
        Ok(added)
    }

    fn remove_from_watchlist(&self, username: &str, rank: Rank) -> Result<bool, Error> {
        self.require(username, rank)?;

        let removed = delete(
            watchlist::table
                .filter(watchlist::username.eq(username))
                .filter(watchlist::movie.eq(i64::from(rank))),
        )
        .execute(&self.conn)?;

        Ok(removed > 0)
    }

    fn watchlist(&self, username: &str) -> Result<Watchlist, Error> {
        let rows = watchlist::table
            .inner_join(movies::table)
            .filter(watchlist::username.eq(username))
            .order(watchlist::id.asc())
            .select(movies::all_columns)
            .load::<MovieRow>(&self.conn)?;

        Ok(self.complete(rows)?.into_iter().collect())
    }

    fn is_in_watchlist(&self, username: &str, rank: Rank) -> Result<bool, Error> {
        Ok(self.watchlist_entry(username, rank)?.is_some())
    }
}
