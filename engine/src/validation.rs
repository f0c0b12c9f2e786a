// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::{ErrorKind, ValidationErrors};
use crate::Engine;
use anyhow::Error;
use config::{ReviewsConfig, MAX_CONTENT_LENGTH};
use controller::{
    BookDraft, Controller, NewBook, NewReview, NewUser, ReviewDraft, UserDraft, MAX_RATING,
    MIN_RATING,
};

fn required<'d>(
    value: &'d Option<String>,
    field: &'static str,
    errors: &mut Vec<ErrorKind>,
) -> Option<&'d str> {
    match value.as_deref() {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            errors.push(ErrorKind::MissingField(field));
            None
        }
    }
}

fn finish<T>(value: Option<T>, errors: Vec<ErrorKind>) -> Result<T, ValidationErrors> {
    match value {
        Some(value) if errors.is_empty() => Ok(value),
        _ => Err(ValidationErrors(errors)),
    }
}

/// Checks a book draft, both title and author must be present
pub fn check_book(draft: &BookDraft) -> Result<NewBook, ValidationErrors> {
    let mut errors = Vec::new();

    let title = required(&draft.title, "title", &mut errors);
    let author = required(&draft.author, "author", &mut errors);

    let book = title.zip(author).map(|(title, author)| NewBook {
        title: title.into(),
        author: author.into(),
    });

    finish(book, errors)
}

/// Checks the rating and content of a review, references are left to the
/// engine since they need a lookup. The rating range is fixed, only the
/// content length follows the config.
pub fn check_review_fields(draft: &ReviewDraft, config: &ReviewsConfig) -> Vec<ErrorKind> {
    let mut errors = Vec::new();

    match draft.rating {
        None => errors.push(ErrorKind::MissingRating),
        Some(rating) if rating < MIN_RATING || rating > MAX_RATING => {
            errors.push(ErrorKind::RatingOutOfRange(rating, MIN_RATING, MAX_RATING))
        }
        Some(_) => {}
    }

    // Never above what the stores can hold
    let max_length = config.max_content_length.min(MAX_CONTENT_LENGTH);
    if let Some(content) = &draft.content {
        let length = content.chars().count();
        if length > max_length {
            errors.push(ErrorKind::ContentTooLong(length, max_length));
        }
    }

    errors
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
{
    /// Validate a user draft. The outer result carries storage failures from
    /// the uniqueness lookup, the inner one the broken rules.
    pub fn validate_user(
        &self,
        draft: &UserDraft,
    ) -> Result<Result<NewUser, ValidationErrors>, Error> {
        let mut errors = Vec::new();

        let email = required(&draft.email, "email", &mut errors);
        if let Some(email) = email {
            if self.controller.user_by_email(email)?.is_some() {
                errors.push(ErrorKind::DuplicateEmail(email.into()));
            }
        }

        if draft.banned.is_none() {
            errors.push(ErrorKind::InvalidBanned);
        }

        let user = email.zip(draft.banned).map(|(email, banned)| NewUser {
            email: email.into(),
            banned,
        });

        Ok(finish(user, errors))
    }

    pub fn validate_book(&self, draft: &BookDraft) -> Result<NewBook, ValidationErrors> {
        check_book(draft)
    }

    /// Validate a review draft, references must point to stored records
    pub fn validate_review(
        &self,
        draft: &ReviewDraft,
    ) -> Result<Result<NewReview, ValidationErrors>, Error> {
        let mut errors = check_review_fields(draft, &self.config);

        let user_id = match draft.user_id {
            Some(id) if self.controller.resolve_user(id)?.is_some() => Some(id),
            _ => {
                errors.push(ErrorKind::MissingUser);
                None
            }
        };

        let book_id = match draft.book_id {
            Some(id) if self.controller.resolve_book(id)?.is_some() => Some(id),
            _ => {
                errors.push(ErrorKind::MissingBook);
                None
            }
        };

        let review = match (user_id, book_id, draft.rating) {
            (Some(user_id), Some(book_id), Some(rating)) => Some(NewReview {
                user_id,
                book_id,
                rating,
                content: draft.content.clone(),
            }),
            _ => None,
        };

        Ok(finish(review, errors))
    }
}
