// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::Engine;
use anyhow::Error;
use controller::{Controller, Entity, Id, ReviewEntity, UserEntity};

/// The one rule deciding whether a review counts toward its book's average:
/// its author must exist and must not be banned.
pub fn counts_for_average<U: UserEntity>(author: Option<&U>) -> bool {
    author.map_or(false, |user| !user.is_banned())
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
{
    // Lookup failures are reported as an unknown author
    fn author_of(&self, review: &C::Review) -> Option<C::User> {
        match self.controller.resolve_user(review.user_id()) {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                log::warn!(
                    "Review({}) references missing user({})",
                    review.get_id(),
                    review.user_id()
                );
                None
            }
            Err(e) => {
                log::warn!(
                    "Couldn't resolve author of review({}): {}",
                    review.get_id(),
                    e
                );
                None
            }
        }
    }

    /// Whether a review counts toward its book's average
    pub fn is_eligible(&self, review: &C::Review) -> bool {
        counts_for_average(self.author_of(review).as_ref())
    }

    /// True only when the author is known and banned
    pub fn from_banned_user(&self, review: &C::Review) -> bool {
        self.author_of(review)
            .map_or(false, |user| user.is_banned())
    }

    /// Reviews of a book that count toward its average
    pub fn eligible_reviews(&self, book_id: Id) -> Result<Vec<C::Review>, Error> {
        let reviews = self.controller.reviews_for_book(book_id)?;

        Ok(reviews
            .into_iter()
            .filter(|review| self.is_eligible(review))
            .collect())
    }
}
