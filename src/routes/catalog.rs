use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Catalog Router Module
///
/// Read-only catalog endpoints. Anonymous requests reach the handlers and are turned
/// away there with 401, so `Authorization` parsing and role checks stay in one place.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        // GET /movies?genreId=&page=&size=&sort=
        // Paged movie summaries, ordered by title unless `sort` says otherwise.
        .route("/movies", get(handlers::find_movies))
        // GET /movies/{id}
        // Full movie detail including its genre.
        .route("/movies/{id}", get(handlers::find_movie))
        // GET /genres
        // Every genre, unpaged.
        .route("/genres", get(handlers::find_genres))
}
