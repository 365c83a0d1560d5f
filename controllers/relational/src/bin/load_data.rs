// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use catalog::records::{movies_from_records, read_movie_records, read_user_records};
use catalog::password::hash_password;
use catalog::User;
use indicatif::ProgressIterator;
use relational_catalog::RelationalRepository;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

fn collect_users(path: &str) -> Result<Vec<User>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let records = read_user_records(reader)?;

    println!("Hashing passwords for {} users...", records.len());
    let mut users = Vec::new();
    for record in records.into_iter().progress() {
        let hash = hash_password(&record.password)?;
        users.push(User::new(&record.username, &hash));
    }

    Ok(users)
}

fn main() -> Result<(), Error> {
    let vars: HashMap<String, String> = dotenv::vars().collect();
    let url = vars
        .get("DATABASE_URL")
        .map(String::as_str)
        .unwrap_or("cineflix.db");
    let movies_path = vars
        .get("MOVIES_PATH")
        .map(String::as_str)
        .unwrap_or("data/movies.csv");
    let users_path = vars
        .get("USERS_PATH")
        .map(String::as_str)
        .unwrap_or("data/users.csv");

    println!("Collecting records for movies...");
    let reader = BufReader::new(File::open(movies_path)?);
    let movies = movies_from_records(read_movie_records(reader)?.into_iter().progress())?;
    let users = collect_users(users_path)?;

    println!("Pushing {} movies and {} users to {}", movies.len(), users.len(), url);
    RelationalRepository::with_data(url, movies, users)?;

    Ok(())
}
