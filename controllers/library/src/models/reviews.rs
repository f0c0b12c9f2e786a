// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::books::Book;
use super::users::User;
use crate::schema::reviews;
use common_macros::hash_map;
use controller::{Entity, Id, ReviewEntity};
use std::collections::HashMap;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[belongs_to(User)]
#[belongs_to(Book)]
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

// To insert a new review into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "reviews"]
pub struct NewReview<'a> {
    pub user_id: Id,
    pub book_id: Id,
    pub rating: i32,
    pub content: Option<&'a str>,
}

impl<'a> From<&'a controller::NewReview> for NewReview<'a> {
    fn from(review: &'a controller::NewReview) -> Self {
        Self {
            user_id: review.user_id,
            book_id: review.book_id,
            rating: review.rating,
            content: review.content.as_deref(),
        }
    }
}
