// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

mod basics;

use basics::{parens, parse_ident, parse_number, parse_string};
use controller::{Id, SearchBy};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{map, map_opt};
use nom::sequence::preceded;
use nom::IResult;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Database {
    Memory,
    Library,
}

impl Database {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "memory" => Some(Self::Memory),
            "library" => Some(Self::Library),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Library => "library",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    Connect(Database),
    QueryUser(SearchBy),
    QueryBook(SearchBy),
    QueryReviews(Id),
    Rating(Id),
    Status(Id),
    InsertUser,
    InsertBook,
    InsertReview,
    Ban(Id),
    Unban(Id),
    RemoveUser(Id),
    RemoveBook(Id),
}

fn parse_database(input: &str) -> IResult<&str, Database> {
    map_opt(parse_ident, Database::from_name)(input)
}

fn parse_id(input: &str) -> IResult<&str, Id> {
    preceded(tag("id"), parens(parse_number))(input)
}

fn parse_search_id(input: &str) -> IResult<&str, SearchBy> {
    map(parse_id, |id| SearchBy::Id(id.to_string()))(input)
}

fn parse_user_search(input: &str) -> IResult<&str, SearchBy> {
    alt((
        parse_search_id,
        map(preceded(tag("email"), parens(parse_string)), SearchBy::email),
    ))(input)
}

fn parse_book_search(input: &str) -> IResult<&str, SearchBy> {
    alt((
        parse_search_id,
        map(preceded(tag("title"), parens(parse_string)), SearchBy::title),
        map(preceded(tag("author"), parens(parse_string)), SearchBy::author),
    ))(input)
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    alt((
        map(
            preceded(tag("connect"), parens(parse_database)),
            Statement::Connect,
        ),
        map(
            preceded(tag("query_user"), parens(parse_user_search)),
            Statement::QueryUser,
        ),
        map(
            preceded(tag("query_book"), parens(parse_book_search)),
            Statement::QueryBook,
        ),
        map(
            preceded(tag("query_reviews"), parens(parse_id)),
            Statement::QueryReviews,
        ),
        map(preceded(tag("rating"), parens(parse_id)), Statement::Rating),
        map(preceded(tag("status"), parens(parse_id)), Statement::Status),
        map(tag("insert_user"), |_| Statement::InsertUser),
        map(tag("insert_book"), |_| Statement::InsertBook),
        map(tag("insert_review"), |_| Statement::InsertReview),
        map(preceded(tag("ban"), parens(parse_id)), Statement::Ban),
        map(preceded(tag("unban"), parens(parse_id)), Statement::Unban),
        map(
            preceded(tag("remove_user"), parens(parse_id)),
            Statement::RemoveUser,
        ),
        map(
            preceded(tag("remove_book"), parens(parse_id)),
            Statement::RemoveBook,
        ),
    ))(input)
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}
