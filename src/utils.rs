// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use catalog::entity::{movies_table, navigation};
use catalog::password::hash_password;
use catalog::records::{movies_from_records, read_movie_records, read_user_records};
use catalog::{Direction, Movie, Pager, Rank, Repository, User};
use config::{Backend, Config};
use memory_catalog::MemoryRepository;
use relational_catalog::RelationalRepository;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn read_movies(path: &Path) -> Result<Vec<Movie>, Error> {
    let reader = BufReader::new(File::open(path)?);
    Ok(movies_from_records(read_movie_records(reader)?)?)
}

// Passwords in the users file are plain text, only their hashes are kept
fn read_users(path: &Path) -> Result<Vec<User>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut users = Vec::new();

    for record in read_user_records(reader)? {
        let hash = hash_password(&record.password)?;
        users.push(User::new(&record.username, &hash));
    }

    Ok(users)
}

pub(crate) fn open_repository(config: &Config) -> Result<Box<dyn Repository>, Error> {
    let catalog = &config.catalog;

    match config.database.backend {
        Backend::Memory => {
            let movies = read_movies(&catalog.movies_path)?;
            let users = read_users(&catalog.users_path)?;
            Ok(Box::new(MemoryRepository::with_data(movies, users)?))
        }

        Backend::Sqlite => {
            let repo = RelationalRepository::with_url(&config.database.url)?;

            if repo.movie_count()? == 0 {
                log::info!("Empty database at {}, loading the catalog files", config.database.url);
                let movies = read_movies(&catalog.movies_path)?;
                let users = read_users(&catalog.users_path)?;
                repo.populate(&movies, &users)?;
            }

            Ok(Box::new(repo))
        }
    }
}

/// Print one page of `ranks` followed by the cursors to reach the others.
pub(crate) fn print_page(
    repo: &dyn Repository,
    pager: &Pager,
    ranks: &[Rank],
    cursor: usize,
) -> Result<(), Error> {
    let page = pager.page(ranks, cursor);

    if page.items.is_empty() {
        println!("Nothing to show at cursor {}", cursor);
        return Ok(());
    }

    let movies = repo.movies_by_rank(page.items)?;
    println!("{}", movies_table(&movies));
    println!(
        "Showing {}-{} of {} ({} pages)",
        page.cursor + 1,
        page.cursor + page.items.len(),
        page.total,
        pager.pages(ranks).count()
    );

    let links = navigation(&page);
    let links: Vec<_> = ["first", "prev", "next", "last"]
        .iter()
        .filter_map(|name| links.get(name).map(|cursor| format!("{}: {}", name, cursor)))
        .collect();

    if !links.is_empty() {
        println!("{}", links.join(" | "));
    }

    Ok(())
}

/// Print the years around the one being browsed.
pub(crate) fn print_adjacent_years(repo: &dyn Repository, movie: &Movie) -> Result<(), Error> {
    let prev = repo.adjacent_date(movie, Direction::Previous)?;
    let next = repo.adjacent_date(movie, Direction::Next)?;

    match (prev, next) {
        (Some(prev), Some(next)) => println!("Previous year: {} | Next year: {}", prev, next),
        (Some(prev), None) => println!("Previous year: {}", prev),
        (None, Some(next)) => println!("Next year: {}", next),
        (None, None) => {}
    }

    Ok(())
}
