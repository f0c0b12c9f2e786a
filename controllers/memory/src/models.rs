// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use common_macros::hash_map;
use controller::{BookEntity, Entity, Id, ReviewEntity, UserEntity};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub banned: bool,
}

impl Entity for User {
    fn get_id(&self) -> Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "email".into() => self.email.clone(),
            "banned".into() => self.banned.to_string(),
        }
    }
}

impl UserEntity for User {
    fn email(&self) -> &str {
        &self.email
    }

    fn is_banned(&self) -> bool {
        self.banned
    }
}

#[derive(Debug, Clone, PartialEq)]
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

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Id,
    pub user_id: Id,
    pub book_id: Id,
    pub rating: i32,
    pub content: Option<String>,
}

impl Entity for Review {
    fn get_id(&self) -> Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = hash_map! {
            "user_id".into() => self.user_id.to_string(),
            "book_id".into() => self.book_id.to_string(),
            "rating".into() => self.rating.to_string(),
        };

        if let Some(content) = &self.content {
            map.insert("content".into(), content.clone());
        }

        map
    }
}

impl ReviewEntity for Review {
    fn user_id(&self) -> Id {
        self.user_id
    }

    fn book_id(&self) -> Id {
        self.book_id
    }

    fn rating(&self) -> i32 {
        self.rating
    }

    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}
