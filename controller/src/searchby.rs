// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::fmt::{self, Display};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SearchBy {
    Id(String),
    Email(String),
    Title(String),
    Author(String),
}

impl SearchBy {
    pub fn id(id: &str) -> Self {
        Self::Id(id.into())
    }

    pub fn email(email: &str) -> Self {
        Self::Email(email.into())
    }

    pub fn title(title: &str) -> Self {
        Self::Title(title.into())
    }

    pub fn author(author: &str) -> Self {
        Self::Author(author.into())
    }

    /// Name of the searched attribute, ex. `email`
    pub fn key(&self) -> &'static str {
        match self {
            SearchBy::Id(_) => "id",
            SearchBy::Email(_) => "email",
            SearchBy::Title(_) => "title",
            SearchBy::Author(_) => "author",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SearchBy::Id(v) | SearchBy::Email(v) | SearchBy::Title(v) | SearchBy::Author(v) => v,
        }
    }
}

impl Display for SearchBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.key(), self.value())
    }
}
