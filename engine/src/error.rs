// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::Id;
use std::fmt::{self, Display};
use thiserror::Error as DError;

#[derive(Debug, Clone, PartialEq, Eq, DError)]
pub enum ErrorKind {
    #[error("{0} can't be blank")]
    MissingField(&'static str),

    #[error("Email {0} has already been taken")]
    DuplicateEmail(String),

    #[error("Banned must be either true or false")]
    InvalidBanned,

    #[error("Rating can't be blank")]
    MissingRating,

    #[error("Rating {0} is not included in {1}..={2}")]
    RatingOutOfRange(i32, i32, i32),

    #[error("Content is too long ({0} characters, maximum is {1})")]
    ContentTooLong(usize, usize),

    #[error("Review must belong to an existing user")]
    MissingUser,

    #[error("Review must belong to an existing book")]
    MissingBook,

    /// Carries the blocking review when one is known
    #[error("Couldn't remove {0}({1}) along with its reviews")]
    CascadeFailure(&'static str, Id, Option<Id>),

    #[error("Couldn't found {0} with id({1})")]
    NotFound(&'static str, Id),
}

/// Every rule a draft broke, in the order they were checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ErrorKind>);

impl ValidationErrors {
    pub fn kinds(&self) -> &[ErrorKind] {
        &self.0
    }

    pub fn contains(&self, kind: &ErrorKind) -> bool {
        self.0.contains(kind)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: ")?;

        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_list_every_kind() {
        let errors = ValidationErrors(vec![
            ErrorKind::MissingRating,
            ErrorKind::ContentTooLong(1001, 1000),
        ]);

        assert_eq!(
            errors.to_string(),
            "Validation failed: Rating can't be blank, \
             Content is too long (1001 characters, maximum is 1000)"
        );
        assert!(errors.contains(&ErrorKind::MissingRating));
        assert!(!errors.contains(&ErrorKind::MissingUser));
    }
}
