use crate::{
    AppState,
    auth::Principal,
    catalog,
    error::{CatalogError, ErrorBody},
    gate::AuthorizationGate,
    models::{GenreDto, MovieDetail, MovieSummary},
    pagination::{Page, PageRequest},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};

// --- Query Structs ---

/// MovieListParams
///
/// Query parameters of GET /movies. Numeric parameters given as an empty string
/// (`?genreId=`) count as absent.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieListParams {
    /// Only list movies of this genre.
    #[serde(rename = "genreId", default, deserialize_with = "empty_string_as_none")]
    pub genre_id: Option<i64>,
    /// Zero-based page index (default 0).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,
    /// Page size (default 20, clamped to 2000).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<i64>,
    /// `<title|year|id>[,asc|desc]` (default `title,asc`).
    pub sort: Option<String>,
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

// --- Handlers ---
//
// Every handler runs the authorization gate first and only then looks at its request
// parameters, so an anonymous request is answered with 401 even when it is malformed.

/// find_movies
///
/// [VISITOR | MEMBER] Lists movies ordered by title, optionally filtered by genre.
#[utoipa::path(
    get,
    path = "/movies",
    params(MovieListParams),
    responses(
        (status = 200, description = "Requested page of movies", body = Page<MovieSummary>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Missing role", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn find_movies(
    principal: Option<Principal>,
    State(state): State<AppState>,
    params: Result<Query<MovieListParams>, QueryRejection>,
) -> Result<Json<Page<MovieSummary>>, CatalogError> {
    let page = AuthorizationGate::catalog_read()
        .guard(principal.as_ref(), || async move {
            let Query(params) =
                params.map_err(|e| CatalogError::InvalidRequest(e.body_text()))?;
            let request =
                PageRequest::from_params(params.page, params.size, params.sort.as_deref())?;
            catalog::find_movies(&*state.repo, params.genre_id.into(), request).await
        })
        .await?;

    Ok(Json(page))
}

/// find_movie
///
/// [VISITOR | MEMBER] Retrieves the full detail of one movie.
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = i64, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Found", body = MovieDetail),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Missing role", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn find_movie(
    principal: Option<Principal>,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MovieDetail>, CatalogError> {
    let movie = AuthorizationGate::catalog_read()
        .guard(principal.as_ref(), || async move {
            let Path(id) = id.map_err(|e| CatalogError::InvalidRequest(e.body_text()))?;
            catalog::find_movie(&*state.repo, id).await
        })
        .await?;

    Ok(Json(movie))
}

/// find_genres
///
/// [VISITOR | MEMBER] Lists every genre. Not paginated.
#[utoipa::path(
    get,
    path = "/genres",
    responses(
        (status = 200, description = "All genres", body = [GenreDto]),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Missing role", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn find_genres(
    principal: Option<Principal>,
    State(state): State<AppState>,
) -> Result<Json<Vec<GenreDto>>, CatalogError> {
    let genres = AuthorizationGate::catalog_read()
        .guard(principal.as_ref(), || async move {
            catalog::find_genres(&*state.repo).await
        })
        .await?;

    Ok(Json(genres))
}
