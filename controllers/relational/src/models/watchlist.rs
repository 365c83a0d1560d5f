// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::watchlist;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[table_name = "watchlist"]
pub struct WatchlistEntry {
    pub id: i32,
    pub username: String,
    pub movie: i64,
}

// To insert a new entry into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "watchlist"]
pub struct NewWatchlistEntry<'a> {
    pub username: &'a str,
    pub movie: i64,
}
