// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::reviews::ReviewId;

// Password is stored already hashed, the catalog never sees plain text
#[derive(Debug, Clone, Default)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub reviews: Vec<ReviewId>,
}

impl User {
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            username: username.trim().into(),
            password_hash: password_hash.into(),
            reviews: Vec::new(),
        }
    }

    pub fn add_review(&mut self, review: ReviewId) {
        self.reviews.push(review);
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}

impl Eq for User {}
