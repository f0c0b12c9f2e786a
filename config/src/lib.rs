use anyhow::{bail, Error};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_MIN_REVIEWS: usize = 3;
/// Widest review content the stores can hold, `VARCHAR(1000)` in Postgres
pub const MAX_CONTENT_LENGTH: usize = 1000;
pub const DEFAULT_INSUFFICIENT_MESSAGE: &str = "Reseñas Insuficientes";

/// Thresholds used when validating reviews and aggregating ratings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewsConfig {
    /// Eligible reviews needed before an average is shown
    pub min_reviews: usize,
    /// Maximum review content length, in characters, at most
    /// `MAX_CONTENT_LENGTH`
    pub max_content_length: usize,
    /// Rendered in place of an average when there aren't enough reviews
    pub insufficient_message: String,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            min_reviews: DEFAULT_MIN_REVIEWS,
            max_content_length: MAX_CONTENT_LENGTH,
            insufficient_message: DEFAULT_INSUFFICIENT_MESSAGE.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub psql_url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub reviews: ReviewsConfig,
    pub databases: HashMap<String, DatabaseConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut databases = HashMap::new();
        databases.insert(
            "library".into(),
            DatabaseConfig {
                psql_url: "postgres://postgres:@localhost/library".into(),
            },
        );

        Self {
            reviews: ReviewsConfig::default(),
            databases,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, Error> {
        let parsed: Self = toml::from_str(contents)?;

        if parsed.reviews.max_content_length > MAX_CONTENT_LENGTH {
            bail!(
                "max_content_length {} is over the storable {} characters",
                parsed.reviews.max_content_length,
                MAX_CONTENT_LENGTH
            );
        }

        Ok(parsed)
    }
}
