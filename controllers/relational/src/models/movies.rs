// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::movies;
use catalog::{Actor, Director, Genre, Movie, Rank, ReviewId, Year};

// Actors and genres are kept as comma separated lists, names never contain
// commas since they come split from the same kind of list.
const SEPARATOR: &str = ",";

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[primary_key(rank)]
#[table_name = "movies"]
pub struct MovieRow {
    pub rank: i64,
    pub title: String,
    pub release_date: i32,
    pub description: String,
    pub director: String,
    pub actors: String,
    pub genres: String,
    pub poster: Option<String>,
}

impl MovieRow {
    pub fn into_movie(self, reviews: Vec<ReviewId>) -> Movie {
        let mut movie = Movie::new(self.rank as Rank, &self.title, self.release_date as Year);
        movie.set_description(&self.description);
        movie.set_director(Director::new(&self.director));

        for actor in split(&self.actors) {
            movie.add_actor(Actor::new(actor));
        }

        for genre in split(&self.genres) {
            movie.add_genre(Genre::new(genre));
        }

        if let Some(poster) = &self.poster {
            movie.set_poster(poster);
        }

        movie.reviews = reviews;
        movie
    }
}

fn split(list: &str) -> impl Iterator<Item = &str> {
    list.split(SEPARATOR).map(str::trim).filter(|s| !s.is_empty())
}

// To insert a new movie into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "movies"]
pub struct NewMovie<'a> {
    pub rank: i64,
    pub title: &'a str,
    pub release_date: i32,
    pub description: &'a str,
    pub director: &'a str,
    pub actors: String,
    pub genres: String,
    pub poster: Option<&'a str>,
}

impl<'a> From<&'a Movie> for NewMovie<'a> {
    fn from(movie: &'a Movie) -> Self {
        Self {
            rank: movie.rank.into(),
            title: &movie.title,
            release_date: movie.release_date.into(),
            description: &movie.description,
            director: movie.director.name(),
            actors: movie.actor_names().join(SEPARATOR),
            genres: movie.genre_names().join(SEPARATOR),
            poster: movie.poster.as_deref(),
        }
    }
}
