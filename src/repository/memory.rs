use async_trait::async_trait;
use std::{cmp::Ordering, sync::Arc};
use uuid::Uuid;

use super::{Repository, RepositoryError};
use crate::{
    filter::GenreFilter,
    models::{Genre, Movie, UserAccount},
    pagination::{Direction, Page, PageRequest, Sort, SortField},
};

/// InMemoryRepository
///
/// A `Repository` over owned, immutable data. Mirrors the Postgres ordering rules
/// (byte-wise title order, id as tie-breaker) so both backends page identically.
/// Backs the test suites; the server itself always runs on `PostgresRepository`.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    genres: Arc<Vec<Genre>>,
    movies: Arc<Vec<Movie>>,
    users: Arc<Vec<UserAccount>>,
}

impl InMemoryRepository {
    pub fn new(genres: Vec<Genre>, movies: Vec<Movie>, users: Vec<UserAccount>) -> Self {
        Self {
            genres: Arc::new(genres),
            movies: Arc::new(movies),
            users: Arc::new(users),
        }
    }
}

fn compare(sort: Sort, a: &Movie, b: &Movie) -> Ordering {
    let primary = match sort.field {
        SortField::Title => a.title.as_bytes().cmp(b.title.as_bytes()),
        SortField::Year => a.year.cmp(&b.year),
        SortField::Id => a.id.cmp(&b.id),
    };
    let primary = match sort.direction {
        Direction::Asc => primary,
        Direction::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_movie_page(
        &self,
        filter: GenreFilter,
        request: &PageRequest,
    ) -> Result<Page<Movie>, RepositoryError> {
        // 1. Filter
        let mut matching: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| filter.matches(m.genre.id))
            .collect();
        // 2. Order (stable for identical input)
        matching.sort_by(|a, b| compare(request.sort(), a, b));

        // 3. Slice; the total counts the whole filtered set.
        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>, RepositoryError> {
        Ok(self.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn find_genres(&self) -> Result<Vec<Genre>, RepositoryError> {
        let mut genres = self.genres.as_ref().clone();
        genres.sort_by_key(|g| g.id);
        Ok(genres)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}
