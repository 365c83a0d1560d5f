// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::users;
use catalog::{ReviewId, User};

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable, Default)]
#[primary_key(username)]
#[table_name = "users"]
pub struct UserRow {
    pub username: String,
    pub password_hash: String,
}

impl UserRow {
    pub fn into_user(self, reviews: Vec<ReviewId>) -> User {
        let mut user = User::new(&self.username, &self.password_hash);
        for review in reviews {
            user.add_review(review);
        }

        user
    }
}

// To insert a new user into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a User> for NewUser<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: &user.username,
            password_hash: &user.password_hash,
        }
    }
}
