// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod parser;
mod utils;

use anyhow::{anyhow, Error};
use catalog::password::verify_password;
use catalog::search::ranks;
use catalog::{Pager, Repository, ToTable};
use clap::{App, Arg};
use config::Config;
use parser::Statement;
use rand::thread_rng;
use simplelog::{LevelFilter, TermLogger, TerminalMode};
use std::path::Path;
use std::str::FromStr;

macro_rules! prompt {
    ($ed:ident, $user:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = match $user {
            Some(user) => format!("({}) {}", user, PROMPT),
            None => format!("{}", PROMPT),
        };

        match $ed.readline(&msg) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

/// What the REPL remembers between statements.
#[derive(Debug, Default)]
struct Session {
    username: Option<String>,
}

impl Session {
    fn username(&self) -> Result<&str, Error> {
        self.username
            .as_deref()
            .ok_or_else(|| anyhow!("You have to login first"))
    }
}

fn execute(
    repo: &dyn Repository,
    pager: &Pager,
    session: &mut Session,
    statement: Statement,
) -> Result<(), Error> {
    match statement {
        Statement::Years => {
            let years: Vec<_> = repo.years()?.iter().map(ToString::to_string).collect();
            println!("{}", years.join(", "));
        }

        Statement::Movie(rank) => match repo.movie(rank)? {
            Some(movie) => {
                println!("{}", movie.to_table());
                println!("{}", movie.description);
            }
            None => println!("Couldn't find a movie with rank {}", rank),
        },

        Statement::Browse(year, cursor) => {
            let movies = repo.movies_by_date(year)?;
            utils::print_page(repo, pager, &ranks(&movies), cursor)?;

            if let Some(movie) = movies.first() {
                utils::print_adjacent_years(repo, movie)?;
            }
        }

        Statement::First | Statement::Last => {
            let movie = if statement == Statement::First {
                repo.first_movie_by_date()?
            } else {
                repo.last_movie_by_date()?
            };

            match movie {
                Some(movie) => execute(
                    repo,
                    pager,
                    session,
                    Statement::Browse(movie.release_date, 0),
                )?,
                None => println!("The catalog is empty"),
            }
        }

        Statement::Search(kind, query, cursor) => {
            let found = repo.find_by_type(&query, kind)?;
            log::debug!("Search by {} '{}' found {} movies", kind, query, found.len());
            utils::print_page(repo, pager, &ranks(&found), cursor)?;
        }

        Statement::Login(username, password) => {
            let verified = match repo.user(&username)? {
                Some(user) => verify_password(&password, &user.password_hash)?,
                None => false,
            };

            if verified {
                println!("Welcome back {}!", username);
                session.username = Some(username);
            } else {
                log::warn!("Failed login for {}", username);
                println!("Wrong username or password");
            }
        }

        Statement::Review(rank, rating, text) => {
            let review = repo.add_review(rank, &text, session.username()?, rating)?;
            println!("{}", review.to_table());
        }

        Statement::Reviews(rank) => {
            let reviews = repo.reviews_for_movie(rank)?;
            if reviews.is_empty() {
                println!("No reviews for rank {}", rank);
            }

            for review in reviews {
                println!("{}", review.to_table());
            }
        }

        Statement::Watch(rank) => {
            if repo.add_to_watchlist(session.username()?, rank)? {
                println!("Added {} to your watchlist", rank);
            } else {
                println!("{} was already in your watchlist", rank);
            }
        }

        Statement::Unwatch(rank) => {
            if repo.remove_from_watchlist(session.username()?, rank)? {
                println!("Removed {} from your watchlist", rank);
            } else {
                println!("{} wasn't in your watchlist", rank);
            }
        }

        Statement::Watchlist => {
            let watchlist = repo.watchlist(session.username()?)?;
            if watchlist.is_empty() {
                println!("Your watchlist is empty");
            } else {
                println!("{}", catalog::entity::movies_table(&watchlist));
            }
        }

        Statement::Random(quantity) => {
            let movies = repo.random_movies(quantity, &mut thread_rng())?;
            println!("{}", catalog::entity::movies_table(&movies));
        }
    }

    Ok(())
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";
const DEFAULT_CONFIG: &str = "cineflix.toml";

fn main() -> Result<(), Error> {
    let matches = App::new("cineflix")
        .version(VERSION)
        .about("Browse, search and review a movie catalog")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .takes_value(true)
                .default_value(DEFAULT_CONFIG),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log debug messages regardless of the configured level"),
        )
        .get_matches();

    let path = matches.value_of("config").unwrap_or(DEFAULT_CONFIG);
    let config = if Path::new(path).exists() {
        Config::load(path)?
    } else {
        Config::default()
    };

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::from_str(&config.log.level).unwrap_or(LevelFilter::Info)
    };

    TermLogger::init(level, simplelog::Config::default(), TerminalMode::Mixed)
        .map_err(|e| anyhow!("Couldn't start the logger: {}", e))?;
    log::debug!("Using configuration {:?}", config);

    let pager = Pager::new(config.browse.movies_per_page)?;
    let repo = utils::open_repository(&config)?;
    let mut session = Session::default();

    println!("Welcome to cineflix {}", VERSION);
    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl, session.username.as_deref())?;

        match opt.trim() {
            "?" | "h" | "help" => {
                println!("Main help:");
                println!("h | help                              Shows this help");
                println!("q | quit                              Quit");
                println!("years                                 Years with movies");
                println!("movie(<rank>)                         Show a movie");
                println!("browse(<year>[, <cursor>])            Movies of a year");
                println!("first | last                          Browse the first or last year");
                println!("search(<kind>, '<query>'[, <cursor>]) Search by actor, director, genre or title");
                println!("random(<n>)                           Pick n random movies");
                println!("login(<user>, '<password>')           Start a session");
                println!("review(<rank>, <rating>, '<text>')    Review a movie");
                println!("reviews(<rank>)                       Reviews of a movie");
                println!("watch(<rank>) | unwatch(<rank>)       Edit your watchlist");
                println!("watchlist                             Show your watchlist");
            }

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(statement) => {
                    if let Err(e) = execute(repo.as_ref(), &pager, &mut session, statement) {
                        println!("{}", e);
                    }
                }

                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}
