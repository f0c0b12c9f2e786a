// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::users;
use common_macros::hash_map;
use controller::{Entity, Id, UserEntity};
use std::collections::HashMap;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
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

// To insert a new user into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub banned: bool,
}

impl<'a> From<&'a controller::NewUser> for NewUser<'a> {
    fn from(user: &'a controller::NewUser) -> Self {
        Self {
            email: &user.email,
            banned: user.banned,
        }
    }
}
