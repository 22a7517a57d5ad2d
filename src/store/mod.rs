/// Persistence and catalog abstractions
///
/// The voting core never holds ambient singleton state: a store is constructed
/// once per process (or per test), injected into the lifecycle service, and
/// torn down by dropping it. The in-memory implementations in `memory` mirror
/// the product's mock data layer.
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Movie, MovieNight},
};

pub mod memory;

pub use memory::{MemoryCatalog, MemoryStore};

/// Persistence store for movie night records
#[async_trait]
pub trait NightStore: Send + Sync {
    /// Inserts a new record; fails with `Conflict` on a duplicate id or share code
    async fn create(&self, night: MovieNight) -> AppResult<MovieNight>;

    /// Fetches a record by id; fails with `NotFound` if absent
    async fn get(&self, id: Uuid) -> AppResult<MovieNight>;

    /// Looks a record up by its public share code
    async fn find_by_share_code(&self, code: &str) -> AppResult<Option<MovieNight>>;

    /// Replaces an existing record; fails with `NotFound` if absent
    async fn update(&self, night: MovieNight) -> AppResult<MovieNight>;

    /// Removes a record; fails with `NotFound` if absent
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Lists all records, newest first
    async fn list(&self) -> AppResult<Vec<MovieNight>>;
}

/// Movie catalog lookup
///
/// Only consulted to validate candidates when they are added; a missing movie
/// surfaces as a warning to the caller, never as a hard failure.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches a movie by catalog id
    async fn get_by_id(&self, movie_id: &str) -> AppResult<Option<Movie>>;

    /// Searches movies by title or genre, case-insensitively
    async fn search(&self, query: &str) -> AppResult<Vec<Movie>>;
}
