table! {
    movies (rank) {
        rank -> BigInt,
        title -> Text,
        release_date -> Integer,
        description -> Text,
        director -> Text,
        actors -> Text,
        genres -> Text,
        poster -> Nullable<Text>,
    }
}

table! {
    reviews (id) {
        id -> BigInt,
        author -> Text,
        movie -> BigInt,
        body -> Text,
        rating -> Nullable<Integer>,
        created_at -> Timestamp,
    }
}

table! {
    users (username) {
        username -> Text,
        password_hash -> Text,
    }
}

table! {
    watchlist (id) {
        id -> Integer,
        username -> Text,
        movie -> BigInt,
    }
}

joinable!(reviews -> movies (movie));
joinable!(reviews -> users (author));
joinable!(watchlist -> movies (movie));
joinable!(watchlist -> users (username));

allow_tables_to_appear_in_same_query!(
    movies,
    reviews,
    users,
    watchlist,
);
