// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod eligibility;
pub mod error;
pub mod integrity;
pub mod rating;
pub mod validation;

use anyhow::Error;
use config::ReviewsConfig;
use controller::{BookDraft, Controller, Id, ReviewDraft, UserDraft};
use error::ErrorKind;

pub use eligibility::counts_for_average;
pub use error::ValidationErrors;
pub use rating::{BookStatus, RatingAverage};

/// Review rules applied on top of a storage controller.
///
/// The engine never caches anything, every query reads fresh records from
/// the controller.
pub struct Engine<'a, C>
where
    C: Controller,
{
    controller: &'a C,
    config: ReviewsConfig,
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
{
    pub fn with_controller(controller: &'a C) -> Self {
        Self::with_config(controller, ReviewsConfig::default())
    }

    pub fn with_config(controller: &'a C, config: ReviewsConfig) -> Self {
        Self { controller, config }
    }

    pub fn controller(&self) -> &C {
        self.controller
    }

    /// Validate and store a new user
    pub fn create_user(&self, draft: &UserDraft) -> Result<C::User, Error> {
        let user = self.validate_user(draft)?.map_err(Error::from)?;
        self.controller.insert_user(&user)
    }

    /// Validate and store a new book
    pub fn create_book(&self, draft: &BookDraft) -> Result<C::Book, Error> {
        let book = self.validate_book(draft).map_err(Error::from)?;
        self.controller.insert_book(&book)
    }

    /// Validate a review and attach it to its book
    pub fn add_review(&self, draft: &ReviewDraft) -> Result<C::Review, Error> {
        let review = self.validate_review(draft)?.map_err(Error::from)?;
        let stored = self.controller.insert_review(&review)?;

        log::debug!(
            "Attached review from user({}) to book({}) rated {}",
            review.user_id,
            review.book_id,
            review.rating
        );

        Ok(stored)
    }

    /// Ban or unban an existing user
    pub fn set_banned(&self, user_id: Id, banned: bool) -> Result<C::User, Error> {
        self.require_user(user_id)?;
        let user = self.controller.update_banned(user_id, banned)?;

        log::info!("User({}) banned state set to {}", user_id, banned);
        Ok(user)
    }

    pub(crate) fn require_user(&self, user_id: Id) -> Result<C::User, Error> {
        self.controller
            .resolve_user(user_id)?
            .ok_or_else(|| ErrorKind::NotFound("user", user_id).into())
    }

    pub(crate) fn require_book(&self, book_id: Id) -> Result<C::Book, Error> {
        self.controller
            .resolve_book(book_id)?
            .ok_or_else(|| ErrorKind::NotFound("book", book_id).into())
    }
}
