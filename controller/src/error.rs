// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Couldn't found entity with id({0})")]
    NotFoundById(String),

    #[error("Couldn't found entity with {0}({1})")]
    NotFoundByCustom(String, String),

    #[error("Can't search {0} by {1}")]
    InvalidSearch(&'static str, String),

    #[error("Failed to cast to some value ({0})")]
    ValueConvert(String),

    #[error("Couldn't cast value to {0}")]
    CastingValue(&'static str),

    #[error("Couldn't insert {0}: {1}")]
    InsertFailed(&'static str, String),

    #[error("Couldn't update {0} with id({1})")]
    UpdateFailed(&'static str, String),

    #[error("Couldn't delete {0} with id({1})")]
    DeleteFailed(&'static str, String),

    #[error("Couldn't find configuration for database {0}")]
    DbConfigError(String),
}
