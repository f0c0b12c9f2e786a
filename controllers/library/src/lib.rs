// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod models;
pub mod schema;

use crate::models::{
    books::{self, Book},
    reviews::{self, Review},
    users::{self, User},
};
use crate::schema::{books as books_sc, reviews as reviews_sc, users as users_sc};
use anyhow::Error;
use config::Config;
use controller::{error::ErrorKind, Controller, Id, NewBook, NewReview, NewUser, SearchBy};
use diesel::pg::PgConnection;
use diesel::{delete, insert_into, prelude::*, update};
use std::collections::HashMap;

pub fn establish_connection(url: &str) -> Result<PgConnection, Error> {
    Ok(PgConnection::establish(&url)?)
}

fn found<T>(rows: Vec<T>, by: &SearchBy) -> Result<Vec<T>, Error> {
    if !rows.is_empty() {
        return Ok(rows);
    }

    match by {
        SearchBy::Id(id) => Err(ErrorKind::NotFoundById(id.clone()).into()),
        by => Err(ErrorKind::NotFoundByCustom(by.key().into(), by.value().into()).into()),
    }
}

/// Postgres backed storage, the schema lives under `migrations/`
pub struct LibraryController {
    pg_conn: PgConnection,
}

impl LibraryController {
    pub fn new() -> Result<Self, Error> {
        let cfg = Config::default();

        Self::from_config(&cfg, "library")
    }

    pub fn from_config(config: &Config, name: &str) -> Result<Self, Error> {
        let db = config
            .databases
            .get(name)
            .ok_or_else(|| ErrorKind::DbConfigError(name.into()))?;

        Self::with_url(&db.psql_url)
    }

    pub fn with_url(url: &str) -> Result<Self, Error> {
        let pg_conn = establish_connection(url)?;
        Ok(Self { pg_conn })
    }

    /// Connect using `DATABASE_URL`, read from the environment or a `.env` file
    pub fn from_env() -> Result<Self, Error> {
        let vars: HashMap<String, String> = dotenv::vars().collect();

        let url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ErrorKind::DbConfigError("DATABASE_URL".into()))?;

        Self::with_url(url)
    }

    pub fn connection(&self) -> &PgConnection {
        &self.pg_conn
    }
}

impl Controller for LibraryController {
    type User = User;
    type Book = Book;
    type Review = Review;

    fn users(&self) -> Result<Vec<User>, Error> {
        let users = users_sc::table
            .order(users_sc::id)
            .load::<User>(&self.pg_conn)?;

        Ok(users)
    }

    fn users_by(&self, by: &SearchBy) -> Result<Vec<User>, Error> {
        let users: Vec<User> = match by {
            SearchBy::Id(id) => {
                let id: Id = id.parse()?;
                users_sc::table
                    .filter(users_sc::id.eq(id))
                    .load(&self.pg_conn)?
            }

            SearchBy::Email(email) => users_sc::table
                .filter(users_sc::email.eq(email))
                .load(&self.pg_conn)?,

            by => return Err(ErrorKind::InvalidSearch("users", by.to_string()).into()),
        };

        found(users, by)
    }

    fn books(&self) -> Result<Vec<Book>, Error> {
        let books = books_sc::table
            .order(books_sc::id)
            .load::<Book>(&self.pg_conn)?;

        Ok(books)
    }

    fn books_by(&self, by: &SearchBy) -> Result<Vec<Book>, Error> {
        let books: Vec<Book> = match by {
            SearchBy::Id(id) => {
                let id: Id = id.parse()?;
                books_sc::table
                    .filter(books_sc::id.eq(id))
                    .load(&self.pg_conn)?
            }

            SearchBy::Title(title) => books_sc::table
                .filter(books_sc::title.eq(title))
                .order(books_sc::id)
                .load(&self.pg_conn)?,

            SearchBy::Author(author) => books_sc::table
                .filter(books_sc::author.eq(author))
                .order(books_sc::id)
                .load(&self.pg_conn)?,

            by => return Err(ErrorKind::InvalidSearch("books", by.to_string()).into()),
        };

        found(books, by)
    }

    fn resolve_user(&self, user_id: Id) -> Result<Option<User>, Error> {
        let user = users_sc::table
            .find(user_id)
            .first::<User>(&self.pg_conn)
            .optional()?;

        Ok(user)
    }

    fn resolve_book(&self, book_id: Id) -> Result<Option<Book>, Error> {
        let book = books_sc::table
            .find(book_id)
            .first::<Book>(&self.pg_conn)
            .optional()?;

        Ok(book)
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = users_sc::table
            .filter(users_sc::email.eq(email))
            .first::<User>(&self.pg_conn)
            .optional()?;

        Ok(user)
    }

    fn reviews_for_book(&self, book_id: Id) -> Result<Vec<Review>, Error> {
        let reviews = reviews_sc::table
            .filter(reviews_sc::book_id.eq(book_id))
            .order(reviews_sc::id)
            .load::<Review>(&self.pg_conn)?;

        Ok(reviews)
    }

    fn reviews_for_user(&self, user_id: Id) -> Result<Vec<Review>, Error> {
        let reviews = reviews_sc::table
            .filter(reviews_sc::user_id.eq(user_id))
            .order(reviews_sc::id)
            .load::<Review>(&self.pg_conn)?;

        Ok(reviews)
    }

    fn insert_user(&self, user: &NewUser) -> Result<User, Error> {
        let user = users::NewUser::from(user);

        Ok(insert_into(users_sc::table)
            .values(&user)
            .get_result(&self.pg_conn)?)
    }

    fn insert_book(&self, book: &NewBook) -> Result<Book, Error> {
        let book = books::NewBook::from(book);

        Ok(insert_into(books_sc::table)
            .values(&book)
            .get_result(&self.pg_conn)?)
    }

    fn insert_review(&self, review: &NewReview) -> Result<Review, Error> {
        let review = reviews::NewReview::from(review);

        Ok(insert_into(reviews_sc::table)
            .values(&review)
            .get_result(&self.pg_conn)?)
    }

    fn update_banned(&self, user_id: Id, banned: bool) -> Result<User, Error> {
        let user = update(users_sc::table.find(user_id))
            .set(users_sc::banned.eq(banned))
            .get_result::<User>(&self.pg_conn)
            .optional()?;

        user.ok_or_else(|| ErrorKind::UpdateFailed("user", user_id.to_string()).into())
    }

    fn delete_review(&self, review_id: Id) -> Result<Review, Error> {
        let review = delete(reviews_sc::table.find(review_id))
            .get_result::<Review>(&self.pg_conn)
            .optional()?;

        review.ok_or_else(|| ErrorKind::DeleteFailed("review", review_id.to_string()).into())
    }

    fn delete_book_record(&self, book_id: Id) -> Result<Book, Error> {
        let book = delete(books_sc::table.find(book_id))
            .get_result::<Book>(&self.pg_conn)
            .optional()?;

        book.ok_or_else(|| ErrorKind::DeleteFailed("book", book_id.to_string()).into())
    }

    fn delete_user_record(&self, user_id: Id) -> Result<User, Error> {
        let user = delete(users_sc::table.find(user_id))
            .get_result::<User>(&self.pg_conn)
            .optional()?;

        user.ok_or_else(|| ErrorKind::DeleteFailed("user", user_id.to_string()).into())
    }

    fn transaction<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        self.pg_conn.transaction::<T, Error, _>(f)
    }
}
