// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod movies;
pub mod people;
pub mod reviews;
pub mod users;
pub mod watchlist;

pub use movies::{Movie, MIN_RELEASE_YEAR};
pub use people::{Actor, Director, Genre};
pub use reviews::{check_attachment, Rating, Review, ReviewId};
pub use users::User;
pub use watchlist::Watchlist;
