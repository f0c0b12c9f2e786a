// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! Unchecked input (`*Draft`) and the checked records (`New*`) a controller
//! accepts for insertion.
//!
//! Drafts keep every field optional so that a missing value can be reported
//! instead of being defaulted, `New*` records only come out of validation.

use crate::{Id, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub email: Option<String>,
    pub banned: Option<bool>,
}

impl UserDraft {
    /// A regular, not banned, user
    pub fn new(email: &str) -> Self {
        Self {
            email: Some(email.into()),
            banned: Some(false),
        }
    }

    pub fn banned(email: &str) -> Self {
        Self {
            email: Some(email.into()),
            banned: Some(true),
        }
    }

    /// Build a draft from a prompt prototype. An omitted `banned` takes the
    /// column default (`false`), a `banned` that isn't a bool is left empty
    /// so validation rejects it.
    pub fn from_prototype(proto: &HashMap<&str, Value>) -> Self {
        let email = proto
            .get("email")
            .and_then(|v| v.as_string().ok())
            .map(ToOwned::to_owned);

        let banned = match proto.get("banned") {
            None => Some(false),
            Some(value) => value.as_bool().ok(),
        };

        Self { email, banned }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookDraft {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }

    pub fn from_prototype(proto: &HashMap<&str, Value>) -> Self {
        let field = |name: &str| {
            proto
                .get(name)
                .and_then(|v: &Value| v.as_string().ok())
                .map(ToOwned::to_owned)
        };

        Self {
            title: field("title"),
            author: field("author"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub user_id: Option<Id>,
    pub book_id: Option<Id>,
    pub rating: Option<i32>,
    pub content: Option<String>,
}

impl ReviewDraft {
    pub fn new(user_id: Id, book_id: Id, rating: i32) -> Self {
        Self {
            user_id: Some(user_id),
            book_id: Some(book_id),
            rating: Some(rating),
            content: None,
        }
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn from_prototype(proto: &HashMap<&str, Value>) -> Self {
        let int = |name: &str| proto.get(name).and_then(|v: &Value| v.as_i32().ok());

        Self {
            user_id: int("user_id"),
            book_id: int("book_id"),
            rating: int("rating"),
            content: proto
                .get("content")
                .and_then(|v| v.as_string().ok())
                .map(ToOwned::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub banned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub user_id: Id,
    pub book_id: Id,
    pub rating: i32,
    pub content: Option<String>,
}
