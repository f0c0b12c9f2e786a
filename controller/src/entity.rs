// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::Id;
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, table, Table};
use std::collections::HashMap;

pub trait Entity {
    fn get_id(&self) -> Id;
    fn get_data(&self) -> HashMap<String, String> {
        Default::default()
    }
}

pub trait UserEntity: Entity {
    fn email(&self) -> &str;
    fn is_banned(&self) -> bool;
}

pub trait BookEntity: Entity {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
}

pub trait ReviewEntity: Entity {
    fn user_id(&self) -> Id;
    fn book_id(&self) -> Id;
    fn rating(&self) -> i32;
    fn content(&self) -> Option<&str>;
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<E: Entity> ToTable for E {
    fn to_table(&self) -> Table {
        let mut table = table![["id", self.get_id()]];

        let mut data: Vec<_> = self.get_data().into_iter().collect();
        data.sort();

        for (key, val) in data {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}
