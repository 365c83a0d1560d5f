// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::Rank;
use thiserror::Error as DError;

#[derive(Debug, Clone, PartialEq, Eq, DError)]
pub enum ErrorKind {
    #[error("Couldn't found movie with rank({0})")]
    NoSuchMovie(Rank),

    #[error("Couldn't found user with username({0})")]
    NoSuchUser(String),

    #[error("Entity with key {0} already exists")]
    DuplicateKey(String),

    #[error("Review not correctly attached to a {0}")]
    InvalidReviewAttachment(&'static str),

    #[error("Malformed field {field} on line {line}: '{value}'")]
    MalformedField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    #[error("Catalog lock was poisoned")]
    Poisoned,
}
