// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod parser;
mod utils;

use anyhow::Error;
use clap::{App, Arg};
use config::{Config, ReviewsConfig};
use controller::{BookDraft, Controller, Entity, ReviewDraft, ToTable, UserDraft};
use engine::Engine;
use library::LibraryController;
use memory::MemoryController;
use parser::{Database, Statement};
use simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use utils::prompt_prototype;

macro_rules! prompt {
    ($ed:ident) => {{
        prompt!($ed, "")
    }};

    ($ed:ident, $db:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = if $db.is_empty() {
            format!("{}", PROMPT)
        } else {
            format!("({}) {}", $db, PROMPT)
        };

        match $ed.readline(&msg) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                if $db.is_empty() {
                    println!("Exiting...Good bye!");
                } else {
                    println!("Disconnecting from {}", $db);
                }

                break;
            }

            Err(e) => Err(e),
        }
    }};
}

macro_rules! print_all {
    ($result:expr) => {{
        match $result {
            Ok(entities) => {
                for entity in entities {
                    println!("{}", entity.to_table());
                }
            }
            Err(e) => println!("{}", e),
        }
    }};
}

macro_rules! print_one {
    ($result:expr) => {{
        match $result {
            Ok(entity) => println!("{}", entity.to_table()),
            Err(e) => println!("{:#}", e),
        }
    }};
}

fn connected_help() {
    println!("Connected help:");
    println!("query_user(id(N) | email('..'))             Show users");
    println!("query_book(id(N) | title('..') | author('..'))  Show books");
    println!("query_reviews(id(N))                        Show the reviews of a book");
    println!("rating(id(N))                               Average rating of a book");
    println!("status(id(N))                               Whether a book has enough reviews");
    println!("insert_user | insert_book | insert_review   Insert a new record");
    println!("ban(id(N)) | unban(id(N))                   Change the banned state of a user");
    println!("remove_user(id(N)) | remove_book(id(N))     Remove a record and its reviews");
    println!("d | disconnect                              Leave this database");
    println!("q | quit                                    Quit");
}

fn database_connected_prompt<C>(
    controller: C,
    name: &str,
    config: &ReviewsConfig,
) -> Result<bool, Error>
where
    C: Controller,
{
    let engine = Engine::with_config(&controller, config.clone());
    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl, name)?;

        match opt.trim() {
            "?" | "h" | "help" => connected_help(),

            "q" | "quit" => {
                println!("Bye!");
                return Ok(true);
            }

            "d" | "disconnect" => {
                println!("Disconnecting from database {}", name);
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(stmt) => match stmt {
                    Statement::Connect(_) => println!("Invalid in this context!"),

                    Statement::QueryUser(searchby) => print_all!(controller.users_by(&searchby)),

                    Statement::QueryBook(searchby) => print_all!(controller.books_by(&searchby)),

                    Statement::QueryReviews(book_id) => match controller.resolve_book(book_id) {
                        Ok(Some(_)) => {
                            let reviews = match controller.reviews_for_book(book_id) {
                                Ok(reviews) => reviews,
                                Err(e) => {
                                    println!("{}", e);
                                    continue;
                                }
                            };

                            if reviews.is_empty() {
                                println!("No reviews found for id({})", book_id);
                            }

                            for review in reviews {
                                println!("{}", review.to_table());
                                println!("counts for average: {}", engine.is_eligible(&review));
                            }
                        }
                        Ok(None) => println!("Book id({}) not found", book_id),
                        Err(e) => println!("{}", e),
                    },

                    Statement::Rating(book_id) => match engine.rendered_rating(book_id) {
                        Ok(rating) => println!("Rating for id({}) is {}", book_id, rating),
                        Err(e) => println!("{}", e),
                    },

                    Statement::Status(book_id) => {
                        let status = engine.status(book_id);
                        let count = engine.eligible_review_count(book_id);

                        match (status, count) {
                            (Ok(status), Ok(count)) => {
                                println!("{} ({} eligible review(s))", status, count)
                            }
                            (Err(e), _) | (_, Err(e)) => println!("{}", e),
                        }
                    }

                    Statement::InsertUser => {
                        let fields = controller.fields_for_users();
                        if let Some(proto) = prompt_prototype(&mut rl, fields)? {
                            print_one!(engine.create_user(&UserDraft::from_prototype(&proto)));
                        }
                    }

                    Statement::InsertBook => {
                        let fields = controller.fields_for_books();
                        if let Some(proto) = prompt_prototype(&mut rl, fields)? {
                            print_one!(engine.create_book(&BookDraft::from_prototype(&proto)));
                        }
                    }

                    Statement::InsertReview => {
                        let fields = controller.fields_for_reviews();
                        if let Some(proto) = prompt_prototype(&mut rl, fields)? {
                            print_one!(engine.add_review(&ReviewDraft::from_prototype(&proto)));
                        }
                    }

                    Statement::Ban(user_id) => print_one!(engine.set_banned(user_id, true)),

                    Statement::Unban(user_id) => print_one!(engine.set_banned(user_id, false)),

                    Statement::RemoveUser(user_id) => match engine.remove_user(user_id) {
                        Ok(user) => println!("Removed user id({})", user.get_id()),
                        Err(e) => println!("{:#}", e),
                    },

                    Statement::RemoveBook(book_id) => match engine.remove_book(book_id) {
                        Ok(book) => println!("Removed book id({})", book.get_id()),
                        Err(e) => println!("{:#}", e),
                    },
                },

                None => println!("Invalid syntax"),
            },
        }
    }

    Ok(false)
}

fn connect(database: &Database, config: &Config) -> Result<bool, Error> {
    let name = database.name();

    match database {
        Database::Memory => {
            database_connected_prompt(MemoryController::new(), name, &config.reviews)
        }

        Database::Library => {
            let controller = LibraryController::from_env()
                .or_else(|_| LibraryController::from_config(config, name));

            match controller {
                Ok(controller) => database_connected_prompt(controller, name, &config.reviews),
                Err(e) => {
                    log::error!("Couldn't connect to {}: {}", name, e);
                    Ok(false)
                }
            }
        }
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";

fn main() -> Result<(), Error> {
    let matches = App::new("book-reviews")
        .version(VERSION)
        .about("Interactive shell over books, users and their reviews")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Show debug messages"),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(level, LogConfig::default(), TerminalMode::Mixed)?;

    let config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    println!("Welcome to book-reviews {}", VERSION);
    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl)?;

        match opt.trim() {
            "?" | "h" | "help" => {
                println!("Main help:");
                println!("h | help                       Shows this help");
                println!("q | quit                       Quit");
                println!("connect(memory | library)      Connect to a database");
            }

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(Statement::Connect(db)) => {
                    if connect(&db, &config)? {
                        break;
                    }
                }
                Some(_) => println!("Invalid statement in this context!"),
                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}
