// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod movies;
pub mod reviews;
pub mod users;
pub mod watchlist;
