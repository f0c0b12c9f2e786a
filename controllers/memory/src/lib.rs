// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod models;

use crate::models::{Book, Review, User};
use anyhow::Error;
use controller::{
    error::ErrorKind, Controller, Id, NewBook, NewReview, NewUser, SearchBy, MAX_RATING, MIN_RATING,
};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<Id, User>,
    books: BTreeMap<Id, Book>,
    reviews: BTreeMap<Id, Review>,
    last_id: Id,
}

impl Tables {
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        self.last_id
    }
}

/// Keeps everything in memory, handy for tests and for trying the shell out.
///
/// Like a bare key-value store it knows nothing about foreign keys, deleting
/// a user or book row never touches the reviews pointing at it. Email
/// uniqueness and the rating range are enforced the way the table
/// constraints would.
#[derive(Debug, Default)]
pub struct MemoryController {
    tables: RefCell<Tables>,
}

impl MemoryController {
    pub fn new() -> Self {
        Default::default()
    }

    fn not_found(by: &SearchBy) -> Error {
        match by {
            SearchBy::Id(id) => ErrorKind::NotFoundById(id.clone()).into(),
            by => ErrorKind::NotFoundByCustom(by.key().into(), by.value().into()).into(),
        }
    }

    fn found<T>(found: Vec<T>, by: &SearchBy) -> Result<Vec<T>, Error> {
        if found.is_empty() {
            Err(Self::not_found(by))
        } else {
            Ok(found)
        }
    }
}

impl Controller for MemoryController {
    type User = User;
    type Book = Book;
    type Review = Review;

    fn users(&self) -> Result<Vec<User>, Error> {
        Ok(self.tables.borrow().users.values().cloned().collect())
    }

    fn users_by(&self, by: &SearchBy) -> Result<Vec<User>, Error> {
        let tables = self.tables.borrow();

        let users: Vec<User> = match by {
            SearchBy::Id(id) => {
                let id: Id = id.parse()?;
                tables.users.get(&id).cloned().into_iter().collect()
            }

            SearchBy::Email(email) => tables
                .users
                .values()
                .filter(|user| &user.email == email)
                .cloned()
                .collect(),

            by => return Err(ErrorKind::InvalidSearch("users", by.to_string()).into()),
        };

        Self::found(users, by)
    }

    fn books(&self) -> Result<Vec<Book>, Error> {
        Ok(self.tables.borrow().books.values().cloned().collect())
    }

    fn books_by(&self, by: &SearchBy) -> Result<Vec<Book>, Error> {
        let tables = self.tables.borrow();

        let books: Vec<Book> = match by {
            SearchBy::Id(id) => {
                let id: Id = id.parse()?;
                tables.books.get(&id).cloned().into_iter().collect()
            }

            SearchBy::Title(title) => tables
                .books
                .values()
                .filter(|book| &book.title == title)
                .cloned()
                .collect(),

            SearchBy::Author(author) => tables
                .books
                .values()
                .filter(|book| &book.author == author)
                .cloned()
                .collect(),

            by => return Err(ErrorKind::InvalidSearch("books", by.to_string()).into()),
        };

        Self::found(books, by)
    }

    fn resolve_user(&self, user_id: Id) -> Result<Option<User>, Error> {
        Ok(self.tables.borrow().users.get(&user_id).cloned())
    }

    fn resolve_book(&self, book_id: Id) -> Result<Option<Book>, Error> {
        Ok(self.tables.borrow().books.get(&book_id).cloned())
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let tables = self.tables.borrow();
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    fn reviews_for_book(&self, book_id: Id) -> Result<Vec<Review>, Error> {
        let tables = self.tables.borrow();

        Ok(tables
            .reviews
            .values()
            .filter(|review| review.book_id == book_id)
            .cloned()
            .collect())
    }

    fn reviews_for_user(&self, user_id: Id) -> Result<Vec<Review>, Error> {
        let tables = self.tables.borrow();

        Ok(tables
            .reviews
            .values()
            .filter(|review| review.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_user(&self, user: &NewUser) -> Result<User, Error> {
        let mut tables = self.tables.borrow_mut();

        if tables.users.values().any(|u| u.email == user.email) {
            let reason = format!("email {} taken", user.email);
            return Err(ErrorKind::InsertFailed("user", reason).into());
        }

        let id = tables.next_id();
        let user = User {
            id,
            email: user.email.clone(),
            banned: user.banned,
        };

        tables.users.insert(id, user.clone());
        Ok(user)
    }

    fn insert_book(&self, book: &NewBook) -> Result<Book, Error> {
        let mut tables = self.tables.borrow_mut();

        let id = tables.next_id();
        let book = Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
        };

        tables.books.insert(id, book.clone());
        Ok(book)
    }

    fn insert_review(&self, review: &NewReview) -> Result<Review, Error> {
        if review.rating < MIN_RATING || review.rating > MAX_RATING {
            let reason = format!("rating {} out of range", review.rating);
            return Err(ErrorKind::InsertFailed("review", reason).into());
        }

        let mut tables = self.tables.borrow_mut();

        let id = tables.next_id();
        let review = Review {
            id,
            user_id: review.user_id,
            book_id: review.book_id,
            rating: review.rating,
            content: review.content.clone(),
        };

        tables.reviews.insert(id, review.clone());
        Ok(review)
    }

    fn update_banned(&self, user_id: Id, banned: bool) -> Result<User, Error> {
        let mut tables = self.tables.borrow_mut();

        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ErrorKind::UpdateFailed("user", user_id.to_string()))?;

        user.banned = banned;
        Ok(user.clone())
    }

    fn delete_review(&self, review_id: Id) -> Result<Review, Error> {
        self.tables
            .borrow_mut()
            .reviews
            .remove(&review_id)
            .ok_or_else(|| ErrorKind::DeleteFailed("review", review_id.to_string()).into())
    }

    fn delete_book_record(&self, book_id: Id) -> Result<Book, Error> {
        self.tables
            .borrow_mut()
            .books
            .remove(&book_id)
            .ok_or_else(|| ErrorKind::DeleteFailed("book", book_id.to_string()).into())
    }

    fn delete_user_record(&self, user_id: Id) -> Result<User, Error> {
        self.tables
            .borrow_mut()
            .users
            .remove(&user_id)
            .ok_or_else(|| ErrorKind::DeleteFailed("user", user_id.to_string()).into())
    }

    fn transaction<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        let snapshot = self.tables.borrow().clone();

        let result = f();
        if result.is_err() {
            log::debug!("Rolling back in-memory transaction");
            *self.tables.borrow_mut() = snapshot;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;
    use controller::{Entity, ReviewEntity};

    fn seeded() -> Result<MemoryController, Error> {
        let controller = MemoryController::new();

        let user = controller.insert_user(&NewUser {
            email: "user1@test.com".into(),
            banned: false,
        })?;
        let book = controller.insert_book(&NewBook {
            title: "Book 1".into(),
            author: "Author 1".into(),
        })?;

        for rating in 1..=3 {
            controller.insert_review(&NewReview {
                user_id: user.id,
                book_id: book.id,
                rating,
                content: None,
            })?;
        }

        Ok(controller)
    }

    #[test]
    fn query_user_by_id_and_email() -> Result<(), Error> {
        let controller = seeded()?;

        let users = controller.users_by(&SearchBy::id("1"))?;
        assert_eq!(users[0].get_id(), 1);

        let users = controller.users_by(&SearchBy::email("user1@test.com"))?;
        assert_eq!(users.len(), 1);

        assert!(controller.users_by(&SearchBy::email("nobody@test.com")).is_err());
        assert!(controller.users_by(&SearchBy::title("Book 1")).is_err());

        Ok(())
    }

    #[test]
    fn query_book_by_title() -> Result<(), Error> {
        let controller = seeded()?;

        let books = controller.books_by(&SearchBy::title("Book 1"))?;
        assert_eq!(books[0].get_id(), 2);

        let books = controller.books_by(&SearchBy::author("Author 1"))?;
        assert_eq!(books.len(), 1);

        Ok(())
    }

    #[test]
    fn unique_email_index() -> Result<(), Error> {
        let controller = seeded()?;

        let duplicate = controller.insert_user(&NewUser {
            email: "user1@test.com".into(),
            banned: true,
        });
        assert!(duplicate.is_err());
        assert_eq!(controller.users()?.len(), 1);

        Ok(())
    }

    #[test]
    fn rating_range_is_enforced() -> Result<(), Error> {
        let controller = seeded()?;

        for &rating in &[0, 6, 9] {
            let stored = controller.insert_review(&NewReview {
                user_id: 1,
                book_id: 2,
                rating,
                content: None,
            });
            assert!(stored.is_err());
        }

        let ratings: Vec<_> = controller
            .reviews_for_book(2)?
            .iter()
            .map(|r| r.rating())
            .collect();
        assert_eq!(ratings, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn deleting_parent_rows_does_not_cascade() -> Result<(), Error> {
        let controller = seeded()?;

        controller.delete_book_record(2)?;
        assert!(controller.resolve_book(2)?.is_none());
        assert_eq!(controller.reviews_for_book(2)?.len(), 3);

        Ok(())
    }

    #[test]
    fn failed_transaction_rolls_back() -> Result<(), Error> {
        let controller = seeded()?;

        let result: Result<(), Error> = controller.transaction(|| {
            for review in controller.reviews_for_user(1)? {
                controller.delete_review(review.get_id())?;
            }
            controller.delete_review(404)?;
            Ok(())
        });

        assert!(result.is_err());
        let ratings: Vec<_> = controller
            .reviews_for_user(1)?
            .iter()
            .map(|r| r.rating())
            .collect();
        assert_eq!(ratings, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn successful_transaction_is_kept() -> Result<(), Error> {
        let controller = seeded()?;

        let removed = controller.transaction(|| controller.delete_review(3))?;
        assert_eq!(removed.rating, 1);
        assert_eq!(controller.reviews_for_book(2)?.len(), 2);

        Ok(())
    }
}
