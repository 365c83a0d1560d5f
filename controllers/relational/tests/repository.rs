// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use catalog::records::{movies_from_records, read_movie_records};
use catalog::search::ranks;
use catalog::{Direction, ErrorKind, Movie, Rating, Repository, SearchKind, User};
use rand::{rngs::StdRng, SeedableRng};
use relational_catalog::RelationalRepository;
use std::collections::HashSet;

const MOVIES: &str = "\
Rank,Title,Genre,Description,Director,Actors,Year
1,Guardians of the Galaxy,\"Action,Adventure,Sci-Fi\",Criminals in space.,James Gunn,\"Chris Pratt, Vin Diesel, Bradley Cooper, Zoe Saldana\",2014
2,Prometheus,\"Adventure,Mystery,Sci-Fi\",Origin of mankind.,Ridley Scott,\"Noomi Rapace, Logan Marshall-Green, Michael Fassbender\",2012
3,Split,\"Horror,Thriller\",Three girls are kidnapped.,M. Night Shyamalan,\"James McAvoy, Anya Taylor-Joy\",2016
4,Sing,\"Animation,Comedy,Family\",A singing competition.,Christophe Lourdelet,\"Matthew McConaughey, Reese Witherspoon\",2016
5,Suicide Squad,\"Action,Adventure,Fantasy\",Supervillains on a mission.,David Ayer,\"Will Smith, Jared Leto, Margot Robbie\",2016
6,Dune,\"Action,Adventure,Drama\",A noble family on Arrakis.,David Lynch,\"Kyle MacLachlan, Virginia Madsen\",1984
7,Dunkirk,\"Action,Drama,History,War\",Allied soldiers are evacuated.,Christopher Nolan,\"Fionn Whitehead, Tom Hardy, Mark Rylance\",2017
8,Hacksaw Ridge,\"Biography,Drama,History,War\",A medic refuses to kill.,Mel Gibson,\"Andrew Garfield, Sam Worthington\",2016
9,Dune: Part One,\"Action,Adventure,Drama\",Paul Atreides arrives on Arrakis.,Denis Villeneuve,\"Timothee Chalamet, Rebecca Ferguson\",2021
10,Legend,\"Biography,Crime,Drama\",The Kray twins.,Brian Helgeland,\"Tom Hardy, Emily Browning\",2015
";

fn repository() -> Result<RelationalRepository, Error> {
    let movies = movies_from_records(read_movie_records(MOVIES.as_bytes())?)?;
    let users = vec![User::new("ella", "hashed-one"), User::new("fmercury", "hashed-two")];

    RelationalRepository::with_data(":memory:", movies, users)
}

fn kind(err: &Error) -> Option<&ErrorKind> {
    err.downcast_ref::<ErrorKind>()
}

#[test]
fn get_movie_by_rank() -> Result<(), Error> {
    let repo = repository()?;

    let movie = repo.movie(7)?.unwrap();
    assert_eq!(movie.title, "Dunkirk");
    assert_eq!(movie.release_date, 2017);
    assert_eq!(movie.director.name(), "Christopher Nolan");
    assert_eq!(movie.actor_names(), vec!["Fionn Whitehead", "Tom Hardy", "Mark Rylance"]);
    assert_eq!(movie.genre_names(), vec!["Action", "Drama", "History", "War"]);

    assert!(repo.movie(1001)?.is_none());
    assert_eq!(repo.movie_count()?, 10);

    Ok(())
}

#[test]
fn store_order_matches_memory_order() -> Result<(), Error> {
    let repo = repository()?;
    let movies = repo.movies()?;

    let mut sorted = movies.clone();
    sorted.sort();
    assert_eq!(ranks(&movies), ranks(&sorted));

    assert_eq!(repo.first_movie()?.map(|m| m.rank), Some(6));
    assert_eq!(repo.last_movie()?.map(|m| m.rank), Some(5));

    Ok(())
}

#[test]
fn duplicates_are_rejected() -> Result<(), Error> {
    let repo = repository()?;

    let err = repo.add_movie(Movie::new(11, "Split", 2016)).unwrap_err();
    assert!(matches!(kind(&err), Some(ErrorKind::DuplicateKey(_))));

    let err = repo.add_movie(Movie::new(2, "Moana", 2016)).unwrap_err();
    assert!(matches!(kind(&err), Some(ErrorKind::DuplicateKey(_))));

    let err = repo.add_user(User::new("ella", "again")).unwrap_err();
    assert!(matches!(kind(&err), Some(ErrorKind::DuplicateKey(_))));

    assert_eq!(repo.movie_count()?, 10);
    Ok(())
}

#[test]
fn failed_load_leaves_nothing_behind() -> Result<(), Error> {
    let repo = RelationalRepository::with_url(":memory:")?;
    let movies = vec![Movie::new(1, "Split", 2016), Movie::new(1, "Sing", 2016)];

    assert!(repo.populate(&movies, &[]).is_err());
    assert_eq!(repo.movie_count()?, 0);

    Ok(())
}

#[test]
fn by_rank_and_by_date() -> Result<(), Error> {
    let repo = repository()?;

    assert_eq!(ranks(&repo.movies_by_rank(&[7, 404, 3, 1])?), vec![7, 3, 1]);
    assert_eq!(ranks(&repo.movies_by_date(2016)?), vec![8, 4, 3, 5]);
    assert!(repo.movies_by_date(2002)?.is_empty());

    let mut seen = HashSet::new();
    for year in repo.years()? {
        for movie in repo.movies_by_date(year)? {
            assert!(seen.insert(movie.rank));
        }
    }
    assert_eq!(seen.len(), 10);

    Ok(())
}

#[test]
fn dates() -> Result<(), Error> {
    let repo = repository()?;

    assert_eq!(repo.years()?, vec![1984, 2012, 2014, 2015, 2016, 2017, 2021]);
    assert_eq!(repo.first_movie_by_date()?.map(|m| m.rank), Some(6));
    assert_eq!(repo.last_movie_by_date()?.map(|m| m.rank), Some(9));

    let dunkirk = repo.movie(7)?.unwrap();
    assert_eq!(repo.adjacent_date(&dunkirk, Direction::Previous)?, Some(2016));
    assert_eq!(repo.adjacent_date(&dunkirk, Direction::Next)?, Some(2021));

    let unknown = Movie::new(99, "Unknown", 2000);
    assert_eq!(repo.adjacent_date(&unknown, Direction::Next)?, None);

    Ok(())
}

#[test]
fn search() -> Result<(), Error> {
    let repo = repository()?;

    assert_eq!(ranks(&repo.find_by_type("Tom Hardy", SearchKind::Actor)?), vec![7, 10]);
    assert_eq!(ranks(&repo.find_by_type("lynch", SearchKind::Director)?), vec![6]);
    assert_eq!(ranks(&repo.find_by_type("Drama, War", SearchKind::Genre)?), vec![7, 8]);
    assert_eq!(ranks(&repo.find_by_type("dune", SearchKind::Title)?), vec![6]);

    Ok(())
}

#[test]
fn reviews() -> Result<(), Error> {
    let repo = repository()?;

    let first = repo.add_review(3, "Creepy and great", "ella", 9)?;
    let second = repo.add_review(3, "Off the scale", "fmercury", 0)?;
    assert_eq!(first.id.0, 0);
    assert_eq!(second.id.0, 1);
    assert_eq!(second.rating, Rating::NotApplicable);

    let movie = repo.movie(3)?.unwrap();
    assert_eq!(movie.reviews, vec![first.id, second.id]);
    assert_eq!(repo.user("ella")?.unwrap().reviews, vec![first.id]);

    let texts: Vec<_> = repo
        .reviews_for_movie(3)?
        .into_iter()
        .map(|r| r.text)
        .collect();
    assert_eq!(texts, vec!["Creepy and great", "Off the scale"]);

    let by_ella = repo.reviews_by_user("ella")?;
    assert_eq!(by_ella.len(), 1);
    assert_eq!(by_ella[0].rating, Rating::Score(9));
    assert_eq!(repo.reviews()?.len(), 2);

    Ok(())
}

#[test]
fn review_errors() -> Result<(), Error> {
    let repo = repository()?;

    let err = repo.add_review(1001, "?", "ella", 5).unwrap_err();
    assert_eq!(kind(&err), Some(&ErrorKind::NoSuchMovie(1001)));

    let err = repo.add_review(1, "?", "ghost", 5).unwrap_err();
    assert_eq!(kind(&err), Some(&ErrorKind::NoSuchUser("ghost".into())));

    assert!(repo.reviews()?.is_empty());
    Ok(())
}

#[test]
fn watchlist() -> Result<(), Error> {
    let repo = repository()?;

    assert!(repo.add_to_watchlist("ella", 7)?);
    assert!(!repo.add_to_watchlist("ella", 7)?);
    assert!(repo.add_to_watchlist("ella", 3)?);

    let watchlist = repo.watchlist("ella")?;
    assert_eq!(watchlist.len(), 2);
    assert_eq!(watchlist.get(0).map(|m| m.rank), Some(7));
    assert_eq!(watchlist.get(1).map(|m| m.rank), Some(3));

    assert!(repo.is_in_watchlist("ella", 7)?);
    assert!(!repo.is_in_watchlist("fmercury", 7)?);
    assert!(repo.watchlist("ghost")?.is_empty());

    assert!(repo.remove_from_watchlist("ella", 7)?);
    assert!(!repo.remove_from_watchlist("ella", 7)?);

    let err = repo.add_to_watchlist("ghost", 7).unwrap_err();
    assert_eq!(kind(&err), Some(&ErrorKind::NoSuchUser("ghost".into())));

    let err = repo.add_to_watchlist("ella", 404).unwrap_err();
    assert_eq!(kind(&err), Some(&ErrorKind::NoSuchMovie(404)));

    Ok(())
}

#[test]
fn random_movies() -> Result<(), Error> {
    let repo = repository()?;
    let mut rng = StdRng::seed_from_u64(7);

    let picked = repo.random_movies(3, &mut rng)?;
    let unique: HashSet<_> = ranks(&picked).into_iter().collect();
    assert_eq!(unique.len(), 3);

    Ok(())
}
