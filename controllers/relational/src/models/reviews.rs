// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::reviews;
use catalog::{Rank, Rating, Review, ReviewId};
use chrono::NaiveDateTime;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[table_name = "reviews"]
pub struct ReviewRow {
    pub id: i64,
    pub author: String,
    pub movie: i64,
    pub body: String,
    pub rating: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId(row.id as u64),
            author: row.author,
            movie: row.movie as Rank,
            text: row.body,
            rating: Rating::from(row.rating),
            timestamp: row.created_at,
        }
    }
}

// To insert a new review into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "reviews"]
pub struct NewReview<'a> {
    pub id: i64,
    pub author: &'a str,
    pub movie: i64,
    pub body: &'a str,
    pub rating: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl<'a> From<&'a Review> for NewReview<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            id: review.id.0 as i64,
            author: &review.author,
            movie: review.movie.into(),
            body: &review.text,
            rating: review.rating.score().map(i32::from),
            created_at: review.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_applicable_is_stored_as_null() {
        let review = Review::new(ReviewId(0), "ella", 3, "Off the scale", 11);
        let new = NewReview::from(&review);
        assert_eq!(new.rating, None);

        let row = ReviewRow {
            id: new.id,
            author: new.author.into(),
            movie: new.movie,
            body: new.body.into(),
            rating: new.rating,
            created_at: new.created_at,
        };

        assert_eq!(Review::from(row), review);
    }

    #[test]
    fn score_survives_the_row() {
        let review = Review::new(ReviewId(4), "fmercury", 8, "Moving", 8);
        let new = NewReview::from(&review);

        assert_eq!(new.rating, Some(8));
        assert_eq!(new.id, 4);
        assert_eq!(new.movie, 8);
    }
}
