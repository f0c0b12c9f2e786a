// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::Engine;
use anyhow::Error;
use controller::{Controller, Id, ReviewEntity};
use std::fmt::{self, Display};

/// What a book shows as its rating
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RatingAverage {
    /// Not enough eligible reviews to show an average
    Insufficient,
    /// Mean of eligible ratings, rounded to one decimal
    Value(f64),
}

impl RatingAverage {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Insufficient => None,
            Self::Value(v) => Some(*v),
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::Insufficient)
    }

    pub fn render(&self, insufficient_message: &str) -> String {
        match self {
            Self::Insufficient => insufficient_message.to_owned(),
            Self::Value(v) => format!("{:.1}", v),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BookStatus {
    Ok,
    InsufficientReviews,
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Ok => write!(f, "OK"),
            BookStatus::InsufficientReviews => write!(f, "Insufficient Reviews"),
        }
    }
}

/// Mean rounded half-up to one decimal.
///
/// Works on the exact sum, `floor((20 * sum + n) / 2n)` is the number of
/// tenths, so ties like 4.25 or 4.45 never get lost in binary fractions.
pub fn mean_to_tenths(sum: i64, count: i64) -> f64 {
    debug_assert!(count > 0);

    let tenths = (20 * sum + count).div_euclid(2 * count);
    tenths as f64 / 10.
}

/// Folds already eligible ratings into the displayed average
pub fn average_of(ratings: &[i32], min_reviews: usize) -> RatingAverage {
    if ratings.is_empty() || ratings.len() < min_reviews {
        return RatingAverage::Insufficient;
    }

    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    RatingAverage::Value(mean_to_tenths(sum, ratings.len() as i64))
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
{
    /// Average rating of a book, only reviews of non-banned users count
    /// both for the mean and for the minimum amount of reviews.
    pub fn rating_average(&self, book_id: Id) -> Result<RatingAverage, Error> {
        self.require_book(book_id)?;

        let ratings: Vec<_> = self
            .eligible_reviews(book_id)?
            .iter()
            .map(|review| review.rating())
            .collect();

        let average = average_of(&ratings, self.config.min_reviews);
        log::debug!(
            "Book({}) has {} eligible review(s), average is {:?}",
            book_id,
            ratings.len(),
            average
        );

        Ok(average)
    }

    /// Amount of reviews of a book that count toward its average
    pub fn eligible_review_count(&self, book_id: Id) -> Result<usize, Error> {
        self.require_book(book_id)?;
        Ok(self.eligible_reviews(book_id)?.len())
    }

    pub fn status(&self, book_id: Id) -> Result<BookStatus, Error> {
        if self.eligible_review_count(book_id)? < self.config.min_reviews {
            Ok(BookStatus::InsufficientReviews)
        } else {
            Ok(BookStatus::Ok)
        }
    }

    /// Rating as shown to readers, with the configured message in place of
    /// an insufficient average
    pub fn rendered_rating(&self, book_id: Id) -> Result<String, Error> {
        let average = self.rating_average(book_id)?;
        Ok(average.render(&self.config.insufficient_message))
    }
}
