/// GenreFilter
///
/// Optional equality predicate on a movie's genre id. An id that names no genre is not an
/// error; it simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenreFilter(Option<i64>);

impl GenreFilter {
    pub fn any() -> Self {
        Self(None)
    }

    pub fn genre(id: i64) -> Self {
        Self(Some(id))
    }

    pub fn genre_id(&self) -> Option<i64> {
        self.0
    }

    pub fn matches(&self, genre_id: i64) -> bool {
        self.0.is_none_or(|wanted| wanted == genre_id)
    }
}

impl From<Option<i64>> for GenreFilter {
    fn from(genre_id: Option<i64>) -> Self {
        Self(genre_id)
    }
}
