//! The catalog read operations: movie pages, movie detail and the genre list.
//!
//! Each function makes a single call into the repository and shapes the entities into
//! response DTOs. None of them check roles; callers wrap them in an `AuthorizationGate`.

use crate::{
    error::CatalogError,
    filter::GenreFilter,
    models::{GenreDto, MovieDetail, MovieSummary},
    pagination::{Page, PageRequest},
    repository::Repository,
};

/// find_movies
///
/// One page of movie summaries, optionally restricted to a genre. An index past the last
/// page returns empty content with the real total.
pub async fn find_movies(
    repo: &dyn Repository,
    filter: GenreFilter,
    request: PageRequest,
) -> Result<Page<MovieSummary>, CatalogError> {
    tracing::debug!(
        genre_id = ?filter.genre_id(),
        page = request.page(),
        size = request.size(),
        sort = %request.sort(),
        "listing movies"
    );

    let page = repo.find_movie_page(filter, &request).await?;
    Ok(page.map(MovieSummary::from))
}

/// find_movie
///
/// Full detail of a single movie, or `NotFound`.
pub async fn find_movie(repo: &dyn Repository, id: i64) -> Result<MovieDetail, CatalogError> {
    repo.find_movie(id)
        .await?
        .map(MovieDetail::from)
        .ok_or_else(|| CatalogError::NotFound(format!("movie {id} not found")))
}

/// find_genres
///
/// Every genre. Genres are small reference data and are returned unpaged.
pub async fn find_genres(repo: &dyn Repository) -> Result<Vec<GenreDto>, CatalogError> {
    let genres = repo.find_genres().await?;
    Ok(genres.into_iter().map(GenreDto::from).collect())
}
