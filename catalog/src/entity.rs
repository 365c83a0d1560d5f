// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::models::{Movie, Review, User};
use crate::pagination::Page;
use common_macros::hash_map;
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, table, Table};
use std::collections::HashMap;

pub trait Entity {
    type Id;

    fn get_id(&self) -> Self::Id;
    fn get_data(&self) -> HashMap<String, String> {
        Default::default()
    }
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<I: ToString, E: Entity<Id = I>> ToTable for E {
    fn to_table(&self) -> Table {
        let mut table = table![["id", self.get_id()]];

        let mut data: Vec<_> = self.get_data().into_iter().collect();
        data.sort();

        for (key, val) in data {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

impl Entity for Movie {
    type Id = crate::Rank;

    fn get_id(&self) -> Self::Id {
        self.rank
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "title".into() => self.title.clone(),
            "year".into() => self.release_date.to_string(),
            "director".into() => self.director.name().into(),
            "actors".into() => self.actor_names().join(", "),
            "genres".into() => self.genre_names().join(", "),
            "reviews".into() => self.number_of_reviews().to_string(),
        }
    }
}

impl Entity for User {
    type Id = String;

    fn get_id(&self) -> Self::Id {
        self.username.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "reviews".into() => self.reviews.len().to_string(),
        }
    }
}

impl Entity for Review {
    type Id = crate::models::ReviewId;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "author".into() => self.author.clone(),
            "movie".into() => self.movie.to_string(),
            "rating".into() => self.rating.to_string(),
            "text".into() => self.text.clone(),
            "timestamp".into() => self.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// One row per movie of a result page.
pub fn movies_table<'a, I>(movies: I) -> Table
where
    I: IntoIterator<Item = &'a Movie>,
{
    let mut table = table![["rank", "title", "year", "director", "genres"]];

    for movie in movies {
        table.add_row(row![
            movie.rank,
            movie.title,
            movie.release_date,
            movie.director,
            movie.genre_names().join(", ")
        ]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

/// Navigation cursors of a page, only the ones that exist.
pub fn navigation<T>(page: &Page<'_, T>) -> HashMap<&'static str, usize> {
    let mut links = HashMap::new();

    if let Some(cursor) = page.first_cursor() {
        links.insert("first", cursor);
    }
    if let Some(cursor) = page.prev_cursor() {
        links.insert("prev", cursor);
    }
    if let Some(cursor) = page.next_cursor() {
        links.insert("next", cursor);
    }
    if let Some(cursor) = page.last_cursor() {
        links.insert("last", cursor);
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Director, Genre, ReviewId};
    use crate::pagination::Pager;

    #[test]
    fn movie_entity() {
        let mut movie = Movie::new(7, "Split", 2016);
        movie.set_director(Director::new("M. Night Shyamalan"));
        movie.add_genre(Genre::new("Horror"));
        movie.add_genre(Genre::new("Thriller"));

        assert_eq!(movie.get_id(), 7);

        let data = movie.get_data();
        assert_eq!(data["title"], "Split");
        assert_eq!(data["genres"], "Horror, Thriller");
        assert_eq!(data["reviews"], "0");

        let rendered = movie.to_table().to_string();
        assert!(rendered.contains("M. Night Shyamalan"));
    }

    #[test]
    fn render_movies_table() {
        let split = Movie::new(1, "Split", 2016);
        let mut sing = Movie::new(2, "Sing", 2016);
        sing.add_genre(Genre::new("Animation"));
        sing.add_genre(Genre::new("Comedy"));

        let rendered = movies_table(vec![&split, &sing]).to_string();
        assert!(rendered.contains("rank"));
        assert!(rendered.contains("Split"));
        assert!(rendered.contains("Animation, Comedy"));
        assert_eq!(rendered.lines().filter(|l| l.contains("2016")).count(), 2);

        let review = Review::new(ReviewId(0), "ella", 1, "Creepy", 9);
        assert!(review.to_table().to_string().contains("Creepy"));
    }

    #[test]
    fn navigation_links() {
        let ranks: Vec<u32> = (1..=23).collect();
        let pager = Pager::new(10).unwrap();

        let links = navigation(&pager.page(&ranks, 10));
        assert_eq!(
            links,
            hash_map! { "first" => 0, "prev" => 0, "next" => 20, "last" => 20 }
        );

        let links = navigation(&pager.page(&ranks, 20));
        assert_eq!(links, hash_map! { "first" => 0, "prev" => 10 });
    }
}
