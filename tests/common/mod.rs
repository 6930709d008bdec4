#![allow(dead_code)]

use jsonwebtoken::{EncodingKey, Header, encode};
use movieflix::{
    AppConfig, AppState, InMemoryRepository,
    auth::{Claims, Principal, Role},
    models::{Genre, Movie, UserAccount},
};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

// --- Fixture Catalog ---
//
// Same rows as migrations/20250101000002_seed_catalog.sql.

pub const VISITOR_ID: Uuid = Uuid::from_u128(1);
pub const MEMBER_ID: Uuid = Uuid::from_u128(2);
/// A known account that holds no catalog role.
pub const ROLELESS_ID: Uuid = Uuid::from_u128(3);

pub const EXISTING_MOVIE_ID: i64 = 1;
pub const NON_EXISTING_MOVIE_ID: i64 = 100000;

pub const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

pub const UNFILTERED_ORDER: [&str; 9] = [
    "A Voz do Silêncio",
    "Bob Esponja",
    "Código de Conduta",
    "Kingsman",
    "O Labirinto do Fauno",
    "Parasita",
    "Sonic",
    "The Witch",
    "Um Lugar Silencioso",
];

pub fn genres() -> Vec<Genre> {
    [(1, "Comédia"), (2, "Drama"), (3, "Terror"), (4, "Fantasia")]
        .into_iter()
        .map(|(id, name)| Genre {
            id,
            name: name.to_string(),
        })
        .collect()
}

fn movie(id: i64, title: &str, sub_title: &str, year: i32, genre_id: i64) -> Movie {
    let genre = genres()
        .into_iter()
        .find(|g| g.id == genre_id)
        .expect("fixture genre");
    Movie {
        id,
        title: title.to_string(),
        sub_title: sub_title.to_string(),
        year,
        img_url: format!("https://img.movieflix.dev/{id}.jpg"),
        synopsis: format!("Sinopse de {title}."),
        genre,
    }
}

pub fn movies() -> Vec<Movie> {
    vec![
        movie(1, "Bob Esponja", "O Incrível Resgate", 2020, 1),
        movie(2, "Kingsman", "O Círculo Dourado", 2017, 1),
        movie(3, "Sonic", "O Filme", 2020, 1),
        movie(4, "A Voz do Silêncio", "Koe no Katachi", 2016, 2),
        movie(5, "Código de Conduta", "Law Abiding Citizen", 2009, 2),
        movie(6, "O Labirinto do Fauno", "El Laberinto del Fauno", 2006, 4),
        movie(7, "Um Lugar Silencioso", "A Quiet Place", 2018, 3),
        movie(8, "Parasita", "Gisaengchung", 2019, 2),
        movie(9, "The Witch", "A Bruxa", 2015, 3),
    ]
}

pub fn users() -> Vec<UserAccount> {
    vec![
        UserAccount {
            id: VISITOR_ID,
            email: "bob@gmail.com".to_string(),
            authorities: vec!["ROLE_VISITOR".to_string()],
        },
        UserAccount {
            id: MEMBER_ID,
            email: "ana@gmail.com".to_string(),
            authorities: vec!["ROLE_MEMBER".to_string()],
        },
        UserAccount {
            id: ROLELESS_ID,
            email: "carl@gmail.com".to_string(),
            authorities: vec!["ROLE_AUDITOR".to_string()],
        },
    ]
}

pub fn fixture_repo() -> InMemoryRepository {
    InMemoryRepository::new(genres(), movies(), users())
}

// --- Principals ---

pub fn visitor() -> Principal {
    Principal {
        id: VISITOR_ID,
        email: "bob@gmail.com".to_string(),
        roles: vec![Role::Visitor],
    }
}

pub fn member() -> Principal {
    Principal {
        id: MEMBER_ID,
        email: "ana@gmail.com".to_string(),
        roles: vec![Role::Member],
    }
}

pub fn roleless() -> Principal {
    Principal {
        id: ROLELESS_ID,
        email: "carl@gmail.com".to_string(),
        roles: vec![],
    }
}

// --- State and Tokens ---

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    }
}

pub fn test_state() -> AppState {
    AppState {
        repo: Arc::new(fixture_repo()),
        config: test_config(),
    }
}

/// Signs an HS256 token for `user_id` that expires `ttl_secs` from now
/// (negative values produce an already expired token).
pub fn create_token(user_id: Uuid, ttl_secs: i64, secret: &str) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + ttl_secs) as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}
