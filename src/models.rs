use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Catalog Entities (Mapped to Database) ---

/// Genre
///
/// Read-only reference data from the `tb_genre` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Default)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Movie
///
/// A catalog entry from `tb_movie`, carrying its single genre by value.
/// Movies are maintained by an external administrative process and are never written here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub sub_title: String,
    pub year: i32,
    pub img_url: String,
    pub synopsis: String,
    pub genre: Genre,
}

/// UserAccount
///
/// A user known to the catalog, together with the raw role authorities granted to it
/// (e.g. `ROLE_VISITOR`). Resolved by the authentication extractor from a token subject.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub authorities: Vec<String>,
}

// --- Response Schemas (Output) ---

/// MovieSummary
///
/// The list view of a movie. Genre and synopsis are left out on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub sub_title: String,
    pub year: i32,
    pub img_url: String,
}

impl From<Movie> for MovieSummary {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            sub_title: movie.sub_title,
            year: movie.year,
            img_url: movie.img_url,
        }
    }
}

/// GenreDto
///
/// Serialized shape of a genre, both in `/genres` and nested inside `MovieDetail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct GenreDto {
    pub id: i64,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

/// MovieDetail
///
/// The full view of a single movie (GET /movies/{id}).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub sub_title: String,
    pub year: i32,
    pub img_url: String,
    pub synopsis: String,
    pub genre: GenreDto,
}

impl From<Movie> for MovieDetail {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            sub_title: movie.sub_title,
            year: movie.year,
            img_url: movie.img_url,
            synopsis: movie.synopsis,
            genre: movie.genre.into(),
        }
    }
}
