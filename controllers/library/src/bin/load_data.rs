// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use controller::{BookDraft, Controller, Entity, ReviewDraft, SearchBy, UserDraft};
use engine::Engine;
use indicatif::ProgressIterator;
use library::LibraryController;
use simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

fn reader(path: &str) -> Result<csv::Reader<std::fs::File>, Error> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path(path)?)
}

fn insert_users(engine: &Engine<LibraryController>) -> Result<usize, Error> {
    let mut csv = reader("data/users.csv")?;

    println!("Collecting records for users...");
    let records: Vec<_> = csv.records().collect();

    let mut inserted = 0;
    for record in records.iter().progress() {
        if let Ok(record) = record {
            let draft = UserDraft {
                email: Some(record[0].to_string()),
                banned: record[1].trim().parse().ok(),
            };

            match engine.create_user(&draft) {
                Ok(_) => inserted += 1,
                Err(e) => log::warn!("Skipping user {:?}: {}", &record[0], e),
            }
        }
    }

    Ok(inserted)
}

fn insert_books(engine: &Engine<LibraryController>) -> Result<usize, Error> {
    let mut csv = reader("data/books.csv")?;

    println!("Collecting records for books...");
    let records: Vec<_> = csv.records().collect();

    let mut inserted = 0;
    for record in records.iter().progress() {
        if let Ok(record) = record {
            let draft = BookDraft::new(&record[0], &record[1]);

            match engine.create_book(&draft) {
                Ok(_) => inserted += 1,
                Err(e) => log::warn!("Skipping book {:?}: {}", &record[0], e),
            }
        }
    }

    Ok(inserted)
}

// Reviews reference their author by email and their book by title
fn insert_reviews(engine: &Engine<LibraryController>) -> Result<usize, Error> {
    let mut csv = reader("data/reviews.csv")?;
    let controller = engine.controller();

    println!("Collecting records for reviews...");
    let records: Vec<_> = csv.records().collect();

    let mut inserted = 0;
    for record in records.iter().progress() {
        if let Ok(record) = record {
            let user_id = controller.user_by_email(&record[0])?.map(|u| u.get_id());
            let book_id = controller
                .books_by(&SearchBy::title(&record[1]))
                .ok()
                .and_then(|books| books.first().map(|b| b.get_id()));

            let content = record.get(3).filter(|content| !content.is_empty());
            let draft = ReviewDraft {
                user_id,
                book_id,
                rating: record[2].trim().parse().ok(),
                content: content.map(Into::into),
            };

            match engine.add_review(&draft) {
                Ok(_) => inserted += 1,
                Err(e) => log::warn!(
                    "Skipping review of {:?} by {:?}: {}",
                    &record[1],
                    &record[0],
                    e
                ),
            }
        }
    }

    Ok(inserted)
}

fn main() -> Result<(), Error> {
    TermLogger::init(LevelFilter::Warn, LogConfig::default(), TerminalMode::Mixed)?;

    let controller = LibraryController::from_env()?;
    let engine = Engine::with_controller(&controller);

    let users = insert_users(&engine)?;
    let books = insert_books(&engine)?;
    let reviews = insert_reviews(&engine)?;

    println!(
        "Inserted {} users, {} books and {} reviews",
        users, books, reviews
    );

    Ok(())
}
