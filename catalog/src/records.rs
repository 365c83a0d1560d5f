// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use crate::models::{Actor, Director, Genre, Movie, User, MIN_RELEASE_YEAR};
use crate::{Rank, Result, Year};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// One row of the movies table, numeric fields are still raw text so a
/// malformed value can be reported with its line.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct MovieRecord {
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Genre")]
    pub genres: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Year")]
    pub year: String,
}

impl MovieRecord {
    pub fn into_movie(self, line: usize) -> std::result::Result<Movie, ErrorKind> {
        let rank: Rank = self
            .rank
            .trim()
            .parse::<Rank>()
            .map_err(|_| ErrorKind::MalformedField {
                line,
                field: "Rank",
                value: self.rank.clone(),
            })?;

        let release_date: Year = self
            .year
            .trim()
            .parse::<Year>()
            .ok()
            .filter(|year| *year >= MIN_RELEASE_YEAR)
            .ok_or_else(|| ErrorKind::MalformedField {
                line,
                field: "Year",
                value: self.year.clone(),
            })?;

        let mut movie = Movie::new(rank, &self.title, release_date);
        movie.set_description(&self.description);
        movie.set_director(Director::new(&self.director));

        for actor in split_list(&self.actors) {
            movie.add_actor(Actor::new(actor));
        }

        for genre in split_list(&self.genres) {
            movie.add_genre(Genre::new(genre));
        }

        Ok(movie)
    }
}

/// A user row, the password is expected to be hashed by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

impl UserRecord {
    pub fn into_user(self) -> User {
        User::new(&self.username, &self.password)
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Convert every record or none, the first malformed row aborts the load.
/// Line numbers account for the header row.
pub fn movies_from_records<I>(records: I) -> std::result::Result<Vec<Movie>, ErrorKind>
where
    I: IntoIterator<Item = MovieRecord>,
{
    let mut ranks = HashSet::new();
    let mut movies = HashSet::new();
    let mut loaded = Vec::new();

    for (i, record) in records.into_iter().enumerate() {
        let movie = record.into_movie(i + 2)?;

        if !ranks.insert(movie.rank) {
            return Err(ErrorKind::DuplicateKey(format!("rank({})", movie.rank)));
        }

        if !movies.insert((movie.title.clone(), movie.release_date)) {
            return Err(ErrorKind::DuplicateKey(movie.to_string()));
        }

        loaded.push(movie);
    }

    Ok(loaded)
}

pub fn read_movie_records<R: Read>(reader: R) -> Result<Vec<MovieRecord>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv.deserialize() {
        records.push(record?);
    }

    log::debug!("Read {} movie records", records.len());
    Ok(records)
}

pub fn read_user_records<R: Read>(reader: R) -> Result<Vec<UserRecord>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv.records() {
        let record = record?;

        let username = record.get(0).unwrap_or_default();
        let password = record.get(1).unwrap_or_default();

        records.push(UserRecord {
            username: username.into(),
            password: password.into(),
        });
    }

    log::debug!("Read {} user records", records.len());
    Ok(records)
}
