// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use crate::Engine;
use anyhow::{Context, Error};
use controller::{Controller, Entity, Id};

impl<'a, C> Engine<'a, C>
where
    C: Controller,
{
    // Deletes every dependent review, makes sure none is left and only then
    // deletes the parent. Runs inside a single controller transaction so a
    // failure anywhere leaves everything as it was.
    fn cascade<T, D, P>(
        &self,
        parent: &'static str,
        parent_id: Id,
        dependents: D,
        delete_parent: P,
    ) -> Result<T, Error>
    where
        D: Fn() -> Result<Vec<C::Review>, Error>,
        P: FnOnce() -> Result<T, Error>,
    {
        let controller = self.controller;

        let failure = |review_id| ErrorKind::CascadeFailure(parent, parent_id, review_id);

        let result = controller.transaction(|| {
            let reviews = dependents().with_context(|| failure(None))?;
            let removed = reviews.len();

            for review in reviews {
                let review_id = review.get_id();
                controller
                    .delete_review(review_id)
                    .with_context(|| failure(Some(review_id)))?;
            }

            let left = dependents().with_context(|| failure(None))?;
            if let Some(left) = left.first() {
                return Err(failure(Some(left.get_id())).into());
            }

            let removed_parent = delete_parent()?;
            log::info!(
                "Removed {}({}) along with {} review(s)",
                parent,
                parent_id,
                removed
            );

            Ok(removed_parent)
        });

        if let Err(e) = &result {
            log::warn!("Removal of {}({}) rolled back: {:#}", parent, parent_id, e);
        }

        result
    }

    /// Remove a book and every review attached to it
    pub fn remove_book(&self, book_id: Id) -> Result<C::Book, Error> {
        self.require_book(book_id)?;

        let controller = self.controller;
        self.cascade(
            "book",
            book_id,
            || controller.reviews_for_book(book_id),
            || controller.delete_book_record(book_id),
        )
    }

    /// Remove a user and every review written by them
    pub fn remove_user(&self, user_id: Id) -> Result<C::User, Error> {
        self.require_user(user_id)?;

        let controller = self.controller;
        self.cascade(
            "user",
            user_id,
            || controller.reviews_for_user(user_id),
            || controller.delete_user_record(user_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use controller::{BookDraft, NewBook, NewReview, NewUser, ReviewDraft, SearchBy, UserDraft};
    use memory::models::{Book, Review, User};
    use memory::MemoryController;
    use std::cell::Cell;

    fn library() -> Result<(MemoryController, Vec<Id>, Vec<Id>), Error> {
        let controller = MemoryController::new();
        let engine = Engine::with_controller(&controller);

        let users = vec![
            engine.create_user(&UserDraft::new("user1@test.com"))?.id,
            engine.create_user(&UserDraft::banned("user2@test.com"))?.id,
        ];
        let books = vec![
            engine.create_book(&BookDraft::new("Book 1", "Author 1"))?.id,
            engine.create_book(&BookDraft::new("Book 2", "Author 2"))?.id,
        ];

        for &user in &users {
            for &book in &books {
                engine.add_review(&ReviewDraft::new(user, book, 4))?;
                engine.add_review(&ReviewDraft::new(user, book, 2))?;
            }
        }

        Ok((controller, users, books))
    }

    #[test]
    fn removing_book_removes_its_reviews() -> Result<(), Error> {
        let (controller, users, books) = library()?;
        let engine = Engine::with_controller(&controller);

        assert_eq!(controller.reviews_for_book(books[0])?.len(), 4);
        engine.remove_book(books[0])?;

        assert!(controller.resolve_book(books[0])?.is_none());
        assert!(controller.reviews_for_book(books[0])?.is_empty());

        // Reviews of the other book stay
        assert_eq!(controller.reviews_for_book(books[1])?.len(), 4);
        assert_eq!(controller.reviews_for_user(users[0])?.len(), 2);

        Ok(())
    }

    #[test]
    fn removing_user_removes_their_reviews() -> Result<(), Error> {
        let (controller, users, books) = library()?;
        let engine = Engine::with_controller(&controller);

        engine.remove_user(users[0])?;

        assert!(controller.resolve_user(users[0])?.is_none());
        assert!(controller.reviews_for_user(users[0])?.is_empty());
        for book in books {
            assert_eq!(controller.reviews_for_book(book)?.len(), 2);
        }

        Ok(())
    }

    #[test]
    fn removing_unknown_parent() -> Result<(), Error> {
        let (controller, _, _) = library()?;
        let engine = Engine::with_controller(&controller);

        let err = engine.remove_book(404).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::NotFound("book", 404))
        );

        let err = engine.remove_user(404).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::NotFound("user", 404))
        );

        Ok(())
    }

    // Behaves like the wrapped controller but refuses to delete one review,
    // or silently keeps every review when `sticky` is set
    struct Stubborn {
        inner: MemoryController,
        refuse: Option<Id>,
        sticky: bool,
        unlisted: bool,
        deletes: Cell<usize>,
    }

    impl Controller for Stubborn {
        type User = User;
        type Book = Book;
        type Review = Review;

        fn users(&self) -> controller::Result<Vec<User>> {
            self.inner.users()
        }

        fn users_by(&self, by: &SearchBy) -> controller::Result<Vec<User>> {
            self.inner.users_by(by)
        }

        fn books(&self) -> controller::Result<Vec<Book>> {
            self.inner.books()
        }

        fn books_by(&self, by: &SearchBy) -> controller::Result<Vec<Book>> {
            self.inner.books_by(by)
        }

        fn resolve_user(&self, user_id: Id) -> controller::Result<Option<User>> {
            self.inner.resolve_user(user_id)
        }

        fn resolve_book(&self, book_id: Id) -> controller::Result<Option<Book>> {
            self.inner.resolve_book(book_id)
        }

        fn user_by_email(&self, email: &str) -> controller::Result<Option<User>> {
            self.inner.user_by_email(email)
        }

        fn reviews_for_book(&self, book_id: Id) -> controller::Result<Vec<Review>> {
            if self.unlisted {
                let kind = controller::error::ErrorKind::NotFoundById(book_id.to_string());
                return Err(kind.into());
            }

            self.inner.reviews_for_book(book_id)
        }

        fn reviews_for_user(&self, user_id: Id) -> controller::Result<Vec<Review>> {
            self.inner.reviews_for_user(user_id)
        }

        fn insert_user(&self, user: &NewUser) -> controller::Result<User> {
            self.inner.insert_user(user)
        }

        fn insert_book(&self, book: &NewBook) -> controller::Result<Book> {
            self.inner.insert_book(book)
        }

        fn insert_review(&self, review: &NewReview) -> controller::Result<Review> {
            self.inner.insert_review(review)
        }

        fn update_banned(&self, user_id: Id, banned: bool) -> controller::Result<User> {
            self.inner.update_banned(user_id, banned)
        }

        fn delete_review(&self, review_id: Id) -> controller::Result<Review> {
            self.deletes.set(self.deletes.get() + 1);

            if self.refuse == Some(review_id) {
                return Err(controller::error::ErrorKind::DeleteFailed(
                    "review",
                    review_id.to_string(),
                )
                .into());
            }

            if self.sticky {
                return Ok(Review {
                    id: review_id,
                    user_id: 0,
                    book_id: 0,
                    rating: 1,
                    content: None,
                });
            }

            self.inner.delete_review(review_id)
        }

        fn delete_book_record(&self, book_id: Id) -> controller::Result<Book> {
            self.inner.delete_book_record(book_id)
        }

        fn delete_user_record(&self, user_id: Id) -> controller::Result<User> {
            self.inner.delete_user_record(user_id)
        }

        fn transaction<T, F>(&self, f: F) -> controller::Result<T>
        where
            F: FnOnce() -> controller::Result<T>,
        {
            self.inner.transaction(f)
        }
    }

    fn stubborn(
        refuse_nth: Option<usize>,
        sticky: bool,
    ) -> Result<(Stubborn, Vec<Id>, Vec<Id>), Error> {
        let (inner, users, books) = library()?;

        let refuse = match refuse_nth {
            Some(n) => Some(inner.reviews_for_book(books[0])?[n].id),
            None => None,
        };

        let controller = Stubborn {
            inner,
            refuse,
            sticky,
            unlisted: false,
            deletes: Cell::new(0),
        };

        Ok((controller, users, books))
    }

    #[test]
    fn failed_cascade_keeps_book_and_reviews() -> Result<(), Error> {
        let (controller, _, books) = stubborn(Some(2), false)?;
        let engine = Engine::with_controller(&controller);

        let err = engine.remove_book(books[0]).unwrap_err();
        let refused = controller.refuse.unwrap();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::CascadeFailure("book", books[0], Some(refused)))
        );

        // The first deletes were rolled back along with the rest
        assert_eq!(controller.deletes.get(), 3);
        assert!(controller.resolve_book(books[0])?.is_some());
        assert_eq!(controller.reviews_for_book(books[0])?.len(), 4);

        Ok(())
    }

    #[test]
    fn failed_cascade_keeps_user() -> Result<(), Error> {
        let (controller, users, _) = stubborn(Some(0), false)?;
        let engine = Engine::with_controller(&controller);

        let refused = controller.refuse.unwrap();
        let owner = controller
            .reviews_for_user(users[0])?
            .iter()
            .any(|review| review.id == refused);
        assert!(owner);

        let err = engine.remove_user(users[0]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::CascadeFailure("user", users[0], Some(refused)))
        );
        assert!(controller.resolve_user(users[0])?.is_some());
        assert_eq!(controller.reviews_for_user(users[0])?.len(), 4);

        Ok(())
    }

    #[test]
    fn surviving_dependents_stop_removal() -> Result<(), Error> {
        let (controller, _, books) = stubborn(None, true)?;
        let engine = Engine::with_controller(&controller);

        let err = engine.remove_book(books[0]).unwrap_err();
        match err.downcast_ref::<ErrorKind>() {
            Some(ErrorKind::CascadeFailure("book", id, _)) => assert_eq!(*id, books[0]),
            other => panic!("unexpected error {:?}", other),
        }

        assert!(controller.resolve_book(books[0])?.is_some());

        Ok(())
    }

    #[test]
    fn listing_failure_is_a_cascade_failure() -> Result<(), Error> {
        let (mut controller, _, books) = stubborn(None, false)?;
        controller.unlisted = true;
        let engine = Engine::with_controller(&controller);

        let err = engine.remove_book(books[0]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::CascadeFailure("book", books[0], None))
        );

        assert_eq!(controller.deletes.get(), 0);
        assert!(controller.resolve_book(books[0])?.is_some());

        Ok(())
    }
}
