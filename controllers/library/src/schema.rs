table! {
    books (id) {
        id -> Int4,
        title -> Varchar,
        author -> Varchar,
    }
}

table! {
    reviews (id) {
        id -> Int4,
        user_id -> Int4,
        book_id -> Int4,
        rating -> Int4,
        content -> Nullable<Varchar>,
    }
}

table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        banned -> Bool,
    }
}

joinable!(reviews -> books (book_id));
joinable!(reviews -> users (user_id));

allow_tables_to_appear_in_same_query!(
    books,
    reviews,
    users,
);
