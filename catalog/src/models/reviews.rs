// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::movies::Movie;
use super::users::User;
use crate::error::ErrorKind;
use crate::Rank;
use chrono::{NaiveDateTime, Utc};
use std::fmt::{self, Display};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ReviewId(pub u64);

impl Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 10;

/// A review score, anything outside `[1, 10]` is kept as not applicable
/// instead of being rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rating {
    Score(u8),
    NotApplicable,
}

impl Rating {
    pub fn new(raw: i64) -> Self {
        if (MIN_RATING..=MAX_RATING).contains(&raw) {
            Self::Score(raw as u8)
        } else {
            Self::NotApplicable
        }
    }

    pub fn score(&self) -> Option<u8> {
        match self {
            Self::Score(score) => Some(*score),
            Self::NotApplicable => None,
        }
    }
}

impl From<Option<i32>> for Rating {
    fn from(raw: Option<i32>) -> Self {
        raw.map_or(Self::NotApplicable, |raw| Self::new(raw.into()))
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(score) => write!(f, "{}", score),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub author: String,
    pub movie: Rank,
    pub text: String,
    pub rating: Rating,
    pub timestamp: NaiveDateTime,
}

impl Review {
    pub fn new(id: ReviewId, author: &str, movie: Rank, text: &str, rating: i64) -> Self {
        Self {
            id,
            author: author.into(),
            movie,
            text: text.into(),
            rating: Rating::new(rating),
            timestamp: Utc::now().naive_utc(),
        }
    }
}

/// A review is only valid once both its author and its movie list it.
pub fn check_attachment(review: &Review, user: &User, movie: &Movie) -> Result<(), ErrorKind> {
    if user.username != review.author || !user.reviews.contains(&review.id) {
        return Err(ErrorKind::InvalidReviewAttachment("User"));
    }

    if movie.rank != review.movie || !movie.reviews.contains(&review.id) {
        return Err(ErrorKind::InvalidReviewAttachment("Movie"));
    }

    Ok(())
}
