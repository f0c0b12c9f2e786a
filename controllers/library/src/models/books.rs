// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::books;
use common_macros::hash_map;
use controller::{BookEntity, Entity, Id};
use std::collections::HashMap;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
pub struct Book {
    pub id: Id,
    pub title: String,
    pub author: String,
}

impl Entity for Book {
    fn get_id(&self) -> Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "title".into() => self.title.clone(),
            "author".into() => self.author.clone(),
        }
    }
}

impl BookEntity for Book {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }
}

// To insert a new book into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "books"]
pub struct NewBook<'a> {
    pub title: &'a str,
    pub author: &'a str,
}

impl<'a> From<&'a controller::NewBook> for NewBook<'a> {
    fn from(book: &'a controller::NewBook) -> Self {
        Self {
            title: &book.title,
            author: &book.author,
        }
    }
}
