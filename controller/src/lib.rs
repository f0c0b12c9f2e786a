// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod drafts;
pub mod entity;
pub mod error;
pub mod searchby;
pub mod values;

use anyhow::Error;

pub use drafts::{BookDraft, NewBook, NewReview, NewUser, ReviewDraft, UserDraft};
pub use entity::{BookEntity, Entity, ReviewEntity, ToTable, UserEntity};
pub use searchby::SearchBy;
pub use values::{Field, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;

/// Every stored record is addressed by a serial integer
pub type Id = i32;

/// Ratings a stored review may carry, both ends included
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Storage collaborator for users, books and reviews.
///
/// Implementations only store and retrieve records, none of them decides
/// which reviews count or how removals cascade, that's done by the engine.
pub trait Controller {
    type User: UserEntity + Clone;
    type Book: BookEntity + Clone;
    type Review: ReviewEntity + Clone;

    /// Get all users
    fn users(&self) -> Result<Vec<Self::User>>;

    /// Get users that matched the search criteria by id or email
    fn users_by(&self, by: &SearchBy) -> Result<Vec<Self::User>>;

    /// Get all books
    fn books(&self) -> Result<Vec<Self::Book>>;

    /// Get books that matched the search criteria by id, title or author
    fn books_by(&self, by: &SearchBy) -> Result<Vec<Self::Book>>;

    /// Look up a single user, `None` if there's no such user
    fn resolve_user(&self, user_id: Id) -> Result<Option<Self::User>>;

    /// Look up a single book, `None` if there's no such book
    fn resolve_book(&self, book_id: Id) -> Result<Option<Self::Book>>;

    /// Look up the user owning an email (emails are unique)
    fn user_by_email(&self, email: &str) -> Result<Option<Self::User>>;

    /// Get every review attached to a book
    fn reviews_for_book(&self, book_id: Id) -> Result<Vec<Self::Review>>;

    /// Get every review written by a user
    fn reviews_for_user(&self, user_id: Id) -> Result<Vec<Self::Review>>;

    /// Insert an already validated user
    fn insert_user(&self, user: &NewUser) -> Result<Self::User>;

    /// Insert an already validated book
    fn insert_book(&self, book: &NewBook) -> Result<Self::Book>;

    /// Insert an already validated review
    fn insert_review(&self, review: &NewReview) -> Result<Self::Review>;

    /// Change the banned state of a user
    fn update_banned(&self, user_id: Id, banned: bool) -> Result<Self::User>;

    /// Delete a single review, returns the removed review
    fn delete_review(&self, review_id: Id) -> Result<Self::Review>;

    /// Delete the book row only, dependents are not touched
    fn delete_book_record(&self, book_id: Id) -> Result<Self::Book>;

    /// Delete the user row only, dependents are not touched
    fn delete_user_record(&self, user_id: Id) -> Result<Self::User>;

    /// Run `f` isolated from other readers, if it fails every change made
    /// inside is rolled back
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>;

    /// Return a list of fields required to insert a new user
    fn fields_for_users(&self) -> Vec<Field<'static>> {
        vec![
            Field::Required("email", Type::String),
            Field::Optional("banned", Type::Bool),
        ]
    }

    /// Return a list of fields required to insert a new book
    fn fields_for_books(&self) -> Vec<Field<'static>> {
        vec![
            Field::Required("title", Type::String),
            Field::Required("author", Type::String),
        ]
    }

    /// Return a list of fields required to insert a new review
    fn fields_for_reviews(&self) -> Vec<Field<'static>> {
        vec![
            Field::Required("user_id", Type::Int32),
            Field::Required("book_id", Type::Int32),
            Field::Required("rating", Type::Int32),
            Field::Optional("content", Type::String),
        ]
    }
}
