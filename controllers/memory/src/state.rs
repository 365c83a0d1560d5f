// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use catalog::models::check_attachment;
use catalog::search::find_by_type;
use catalog::{
    Direction, ErrorKind, Movie, Rank, Review, ReviewId, SearchKind, User, Watchlist, Year,
};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound::{Excluded, Unbounded};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MovieId(usize);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UserId(usize);

/// Arena backed catalog. Movies, users and reviews are only ever appended, so
/// their slots double as ids; `order` keeps movie ids sorted by
/// (title, release date) and is maintained on every insert.
#[derive(Debug, Default)]
pub struct CatalogState {
    movies: Vec<Movie>,
    order: Vec<MovieId>,
    by_rank: HashMap<Rank, MovieId>,
    years: BTreeMap<Year, usize>,

    users: Vec<User>,
    by_username: HashMap<String, UserId>,

    reviews: Vec<Review>,
    watchlists: HashMap<UserId, Watchlist>,
}

impl CatalogState {
    pub fn new() -> Self {
        Default::default()
    }

    fn position(&self, movie: &Movie) -> Result<usize, usize> {
        self.order
            .binary_search_by(|id| self.movies[id.0].cmp(movie))
    }

    fn get(&self, id: MovieId) -> &Movie {
        &self.movies[id.0]
    }

    pub fn add_movie(&mut self, movie: Movie) -> Result<MovieId, ErrorKind> {
        if self.by_rank.contains_key(&movie.rank) {
            return Err(ErrorKind::DuplicateKey(format!("rank({})", movie.rank)));
        }

        let pos = match self.position(&movie) {
            Ok(_) => return Err(ErrorKind::DuplicateKey(movie.to_string())),
            Err(pos) => pos,
        };

        let id = MovieId(self.movies.len());
        *self.years.entry(movie.release_date).or_insert(0) += 1;
        self.by_rank.insert(movie.rank, id);
        self.order.insert(pos, id);
        self.movies.push(movie);

        Ok(id)
    }

    pub fn contains(&self, movie: &Movie) -> bool {
        self.position(movie).is_ok()
    }

    pub fn movie(&self, rank: Rank) -> Option<&Movie> {
        self.by_rank.get(&rank).map(|id| self.get(*id))
    }

    pub fn movies(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.order.iter().map(move |id| self.get(*id))
    }

    pub fn movies_by_rank(&self, ranks: &[Rank]) -> Vec<&Movie> {
        ranks.iter().filter_map(|rank| self.movie(*rank)).collect()
    }

    pub fn movies_by_date(&self, year: Year) -> Vec<&Movie> {
        if !self.years.contains_key(&year) {
            return Vec::new();
        }

        self.movies().filter(|m| m.release_date == year).collect()
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn first_movie(&self) -> Option<&Movie> {
        self.order.first().map(|id| self.get(*id))
    }

    pub fn last_movie(&self) -> Option<&Movie> {
        self.order.last().map(|id| self.get(*id))
    }

    // Strict comparisons keep the first movie found for each year
    pub fn first_movie_by_date(&self) -> Option<&Movie> {
        self.movies().fold(None, |found: Option<&Movie>, m| match found {
            Some(f) if f.release_date <= m.release_date => Some(f),
            _ => Some(m),
        })
    }

    pub fn last_movie_by_date(&self) -> Option<&Movie> {
        self.movies().fold(None, |found: Option<&Movie>, m| match found {
            Some(f) if f.release_date >= m.release_date => Some(f),
            _ => Some(m),
        })
    }

    /// Walk the populated years, empty years never show up in the histogram
    /// so they are skipped for free.
    pub fn adjacent_date(&self, movie: &Movie, direction: Direction) -> Option<Year> {
        if !self.contains(movie) {
            return None;
        }

        let year = movie.release_date;
        match direction {
            Direction::Previous => self.years.range(..year).next_back().map(|(y, _)| *y),
            Direction::Next => self
                .years
                .range((Excluded(year), Unbounded))
                .next()
                .map(|(y, _)| *y),
        }
    }

    pub fn years(&self) -> Vec<Year> {
        self.years.keys().copied().collect()
    }

    pub fn find(&self, query: &str, kind: SearchKind) -> Vec<&Movie> {
        find_by_type(self.movies(), query, kind)
    }

    pub fn add_user(&mut self, user: User) -> Result<UserId, ErrorKind> {
        if self.by_username.contains_key(&user.username) {
            return Err(ErrorKind::DuplicateKey(format!("username({})", user.username)));
        }

        let id = UserId(self.users.len());
        self.by_username.insert(user.username.clone(), id);
        self.users.push(user);

        Ok(id)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.by_username.get(username).map(|id| &self.users[id.0])
    }

    /// Build a detached review for an existing movie and user, it still has
    /// to be attached and registered.
    pub fn new_review(
        &self,
        rank: Rank,
        text: &str,
        username: &str,
        rating: i64,
    ) -> Result<Review, ErrorKind> {
        if !self.by_rank.contains_key(&rank) {
            return Err(ErrorKind::NoSuchMovie(rank));
        }

        if !self.by_username.contains_key(username) {
            return Err(ErrorKind::NoSuchUser(username.into()));
        }

        let id = ReviewId(self.reviews.len() as u64);
        Ok(Review::new(id, username, rank, text, rating))
    }

    /// Link the review from both its author and its movie.
    pub fn attach_review(&mut self, review: &Review) -> Result<(), ErrorKind> {
        let user = *self
            .by_username
            .get(&review.author)
            .ok_or_else(|| ErrorKind::NoSuchUser(review.author.clone()))?;

        let movie = *self
            .by_rank
            .get(&review.movie)
            .ok_or_else(|| ErrorKind::NoSuchMovie(review.movie))?;

        self.users[user.0].add_review(review.id);
        self.movies[movie.0].add_review(review.id);

        Ok(())
    }

    /// Store an attached review. Fails if either side doesn't link it yet or
    /// if its id isn't the next free slot.
    pub fn register_review(&mut self, review: Review) -> Result<ReviewId, ErrorKind> {
        let user = self
            .user(&review.author)
            .ok_or(ErrorKind::InvalidReviewAttachment("User"))?;
        let movie = self
            .movie(review.movie)
            .ok_or(ErrorKind::InvalidReviewAttachment("Movie"))?;

        check_attachment(&review, user, movie)?;

        if review.id.0 != self.reviews.len() as u64 {
            return Err(ErrorKind::DuplicateKey(format!("review({})", review.id)));
        }

        let id = review.id;
        self.reviews.push(review);

        Ok(id)
    }

    pub fn add_review(
        &mut self,
        rank: Rank,
        text: &str,
        username: &str,
        rating: i64,
    ) -> Result<Review, ErrorKind> {
        let review = self.new_review(rank, text, username, rating)?;
        self.attach_review(&review)?;
        self.register_review(review.clone())?;

        Ok(review)
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    fn resolve_reviews(&self, ids: &[ReviewId]) -> Vec<&Review> {
        ids.iter()
            .filter_map(|id| self.reviews.get(id.0 as usize))
            .collect()
    }

    pub fn reviews_for_movie(&self, rank: Rank) -> Vec<&Review> {
        self.movie(rank)
            .map(|m| self.resolve_reviews(&m.reviews))
            .unwrap_or_default()
    }

    pub fn reviews_by_user(&self, username: &str) -> Vec<&Review> {
        self.user(username)
            .map(|u| self.resolve_reviews(&u.reviews))
            .unwrap_or_default()
    }

    fn lookup(&self, username: &str, rank: Rank) -> Result<(UserId, &Movie), ErrorKind> {
        let movie = self.movie(rank).ok_or(ErrorKind::NoSuchMovie(rank))?;
        let user = *self
            .by_username
            .get(username)
            .ok_or_else(|| ErrorKind::NoSuchUser(username.into()))?;

        Ok((user, movie))
    }

    pub fn add_to_watchlist(&mut self, username: &str, rank: Rank) -> Result<bool, ErrorKind> {
        let (user, movie) = self.lookup(username, rank)?;
        let movie = movie.clone();

        Ok(self.watchlists.entry(user).or_default().add(movie))
    }

    pub fn remove_from_watchlist(&mut self, username: &str, rank: Rank) -> Result<bool, ErrorKind> {
        let (user, movie) = self.lookup(username, rank)?;
        let movie = movie.clone();

        Ok(self
            .watchlists
            .get_mut(&user)
            .map_or(false, |watchlist| watchlist.remove(&movie)))
    }

    /// Snapshot of the watchlist with up to date movies.
    pub fn watchlist(&self, username: &str) -> Watchlist {
        let watchlist = self
            .by_username
            .get(username)
            .and_then(|user| self.watchlists.get(user));

        match watchlist {
            Some(watchlist) => watchlist
                .iter()
                .filter_map(|m| self.movie(m.rank))
                .cloned()
                .collect(),
            None => Watchlist::new(),
        }
    }

    pub fn is_in_watchlist(&self, username: &str, rank: Rank) -> bool {
        let movie = match self.movie(rank) {
            Some(movie) => movie,
            None => return false,
        };

        self.by_username
            .get(username)
            .and_then(|user| self.watchlists.get(user))
            .map_or(false, |watchlist| watchlist.contains(movie))
    }
}
