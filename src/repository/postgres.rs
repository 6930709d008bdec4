use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, query_builder::QueryBuilder};
use uuid::Uuid;

use super::{Repository, RepositoryError};
use crate::{
    filter::GenreFilter,
    models::{Genre, Movie, UserAccount},
    pagination::{Direction, Page, PageRequest, SortField},
};

const MOVIE_COLUMNS: &str = r#"
    SELECT
        m.id, m.title, m.sub_title, m.year, m.img_url, m.synopsis,
        g.id AS genre_id, g.name AS genre_name
    FROM tb_movie m
    JOIN tb_genre g ON g.id = m.genre_id
"#;

/// Flat row shape of the movie/genre join.
#[derive(Debug, FromRow)]
struct MovieRow {
    id: i64,
    title: String,
    sub_title: String,
    year: i32,
    img_url: String,
    synopsis: String,
    genre_id: i64,
    genre_name: String,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            sub_title: row.sub_title,
            year: row.year,
            img_url: row.img_url,
            synopsis: row.synopsis,
            genre: Genre {
                id: row.genre_id,
                name: row.genre_name,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
}

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends the genre predicate, if any, to a query whose base ends before `WHERE`.
fn push_genre_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: GenreFilter) {
    if let Some(genre_id) = filter.genre_id() {
        builder.push(" WHERE m.genre_id = ");
        builder.push_bind(genre_id);
    }
}

fn order_by_clause(request: &PageRequest) -> String {
    let sort = request.sort();
    // COLLATE "C" keeps title order byte-wise, independent of the server locale.
    let column = match sort.field {
        SortField::Title => r#"m.title COLLATE "C""#,
        SortField::Year => "m.year",
        SortField::Id => "m.id",
    };
    let direction = match sort.direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    };
    format!(" ORDER BY {column} {direction}, m.id ASC")
}

#[async_trait]
impl Repository for PostgresRepository {
    /// find_movie_page
    ///
    /// Runs the count and the page query with the same predicate so `total_elements`
    /// always agrees with the content. Only bound parameters reach the SQL text; the
    /// ORDER BY clause is built from a closed set of column names.
    async fn find_movie_page(
        &self,
        filter: GenreFilter,
        request: &PageRequest,
    ) -> Result<Page<Movie>, RepositoryError> {
        // 1. Total for the filter
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM tb_movie m");
        push_genre_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        // 2. The page itself
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(MOVIE_COLUMNS);
        push_genre_filter(&mut builder, filter);
        builder.push(order_by_clause(request));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(request.size()));
        builder.push(" OFFSET ");
        // OFFSET is a BIGINT; indexes past it yield an empty page anyway.
        builder.push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<MovieRow>()
            .fetch_all(&self.pool)
            .await?;

        let movies = rows.into_iter().map(Movie::from).collect();
        Ok(Page::new(movies, request, total.max(0) as u64))
    }

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>, RepositoryError> {
        let query = format!("{MOVIE_COLUMNS} WHERE m.id = $1");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    async fn find_genres(&self) -> Result<Vec<Genre>, RepositoryError> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM tb_genre ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    /// find_user
    ///
    /// Loads the user row and its role authorities (via `tb_user_role`).
    async fn find_user(&self, id: Uuid) -> Result<Option<UserAccount>, RepositoryError> {
        let Some(user) = sqlx::query_as::<_, UserRow>("SELECT id, email FROM tb_user WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let authorities = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.authority
            FROM tb_role r
            JOIN tb_user_role ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(UserAccount {
            id: user.id,
            email: user.email,
            authorities,
        }))
    }
}
