use serde::{Deserialize, Serialize};

use super::MovieId;

/// A catalog movie eligible to become a voting candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Catalog identifier
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Genre tags (e.g., "Sci-Fi", "Comedy")
    pub genres: Vec<String>,
    /// Release year, if known
    pub release_year: Option<i32>,
}

impl Movie {
    /// Creates a new catalog movie
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genres: Vec::new(),
            release_year: None,
        }
    }

    /// Adds a genre tag
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    /// Sets the release year
    pub fn with_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    /// True if the title or any genre contains the query, case-insensitively
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .genres
                .iter()
                .any(|g| g.to_lowercase().contains(&query))
    }
}
