use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    filter::GenreFilter,
    models::{Genre, Movie, UserAccount},
    pagination::{Page, PageRequest},
};

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

/// RepositoryError
///
/// An unexpected failure of the storage backend. Callers never match on the cause;
/// it is logged and surfaced as a generic server error.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository Trait
///
/// The read-only contract the catalog consumes. Implementations own all consistency
/// guarantees; the catalog only issues single read calls.
///
/// **Send + Sync + async_trait** are required so that `Arc<dyn Repository>` can be shared
/// across Axum's handler tasks.
#[async_trait]
pub trait Repository: Send + Sync {
    /// One page of movies matching `filter`, ordered per `request.sort()` with ties broken
    /// by ascending id. `total_elements` counts every movie matching the same filter.
    async fn find_movie_page(
        &self,
        filter: GenreFilter,
        request: &PageRequest,
    ) -> Result<Page<Movie>, RepositoryError>;

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>, RepositoryError>;

    /// Every genre, ordered by id.
    async fn find_genres(&self) -> Result<Vec<Genre>, RepositoryError>;

    // --- User/Auth ---
    async fn find_user(&self, id: Uuid) -> Result<Option<UserAccount>, RepositoryError>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;
