use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieNight},
};

use super::{Catalog, NightStore};

/// In-memory movie night store
///
/// New records are inserted at the front so `list` returns newest first.
/// Suitable for a single process; all access goes through one RwLock, which is
/// coarser than the per-night serialization the lifecycle service layers on
/// top but keeps reads cheap and writes correct.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<MovieNight>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NightStore for MemoryStore {
    async fn create(&self, night: MovieNight) -> AppResult<MovieNight> {
        let mut records = self.records.write().await;

        if records.iter().any(|n| n.id == night.id) {
            return Err(AppError::Conflict(format!(
                "movie night {} already exists",
                night.id
            )));
        }
        if records.iter().any(|n| n.share_code == night.share_code) {
            return Err(AppError::Conflict(format!(
                "share code {} already in use",
                night.share_code
            )));
        }

        records.insert(0, night.clone());
        Ok(night)
    }

    async fn get(&self, id: Uuid) -> AppResult<MovieNight> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("movie night {}", id)))
    }

    async fn find_by_share_code(&self, code: &str) -> AppResult<Option<MovieNight>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|n| n.share_code == code).cloned())
    }

    async fn update(&self, night: MovieNight) -> AppResult<MovieNight> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|n| n.id == night.id)
            .ok_or_else(|| AppError::NotFound(format!("movie night {}", night.id)))?;
        *slot = night.clone();
        Ok(night)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound(format!("movie night {}", id)))?;
        records.remove(position);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<MovieNight>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }
}

/// In-memory movie catalog seeded with a fixed movie list
pub struct MemoryCatalog {
    movies: Vec<Movie>,
}

impl MemoryCatalog {
    /// Creates a catalog with the given movies
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Creates a catalog with the default seed data
    pub fn with_defaults() -> Self {
        Self::with_movies(vec![
            Movie::new("m1", "The Matrix")
                .with_genre("Sci-Fi")
                .with_genre("Action")
                .with_year(1999),
            Movie::new("m2", "Inception")
                .with_genre("Sci-Fi")
                .with_genre("Thriller")
                .with_year(2010),
            Movie::new("m3", "The Grand Budapest Hotel")
                .with_genre("Comedy")
                .with_year(2014),
            Movie::new("m4", "Parasite")
                .with_genre("Thriller")
                .with_genre("Drama")
                .with_year(2019),
            Movie::new("m5", "Spirited Away")
                .with_genre("Animation")
                .with_genre("Fantasy")
                .with_year(2001),
            Movie::new("m6", "Before Sunrise")
                .with_genre("Romance")
                .with_genre("Drama")
                .with_year(1995),
        ])
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn get_by_id(&self, movie_id: &str) -> AppResult<Option<Movie>> {
        Ok(self.movies.iter().find(|m| m.id == movie_id).cloned())
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        Ok(self
            .movies
            .iter()
            .filter(|m| m.matches(query))
            .cloned()
            .collect())
    }
}
