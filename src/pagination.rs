use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CatalogError;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Larger requests are clamped rather than rejected.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// SortField
///
/// The movie attributes a page may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Title,
    Year,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Sort
///
/// A single-key ordering. Ties are always broken by ascending movie id so that
/// page boundaries stay stable between identical queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    pub fn by(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// parse
    ///
    /// Accepts `<field>[,asc|desc]`, e.g. `title`, `year,desc`. Matching is case-insensitive.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let mut parts = raw.split(',').map(str::trim);

        let field = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("title") => SortField::Title,
            Some("year") => SortField::Year,
            Some("id") => SortField::Id,
            _ => {
                return Err(CatalogError::InvalidRequest(format!(
                    "unsupported sort property in '{raw}'"
                )));
            }
        };

        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => Direction::Asc,
            Some("desc") => Direction::Desc,
            Some(other) => {
                return Err(CatalogError::InvalidRequest(format!(
                    "unsupported sort direction '{other}'"
                )));
            }
        };

        if parts.next().is_some() {
            return Err(CatalogError::InvalidRequest(format!(
                "malformed sort specification '{raw}'"
            )));
        }

        Ok(Self { field, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Title => "title",
            SortField::Year => "year",
            SortField::Id => "id",
        };
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{field},{direction}")
    }
}

/// PageRequest
///
/// A validated pagination request. Can only be built through `new`/`from_params`, so a
/// value of this type always has a non-negative index and a size in `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u32,
    sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: Sort) -> Result<Self, CatalogError> {
        if page < 0 {
            return Err(CatalogError::InvalidRequest(format!(
                "page index must not be negative (got {page})"
            )));
        }
        if size <= 0 {
            return Err(CatalogError::InvalidRequest(format!(
                "page size must be greater than zero (got {size})"
            )));
        }

        // Non-negative here, so the conversion is lossless.
        let page = page.unsigned_abs();
        let size = size.min(i64::from(MAX_PAGE_SIZE)) as u32;

        Ok(Self { page, size, sort })
    }

    /// from_params
    ///
    /// Builds a request from optional query parameters, applying the defaults
    /// (page 0, size 20, `title,asc`) for whatever is absent.
    pub fn from_params(
        page: Option<i64>,
        size: Option<i64>,
        sort: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Sort::parse(raw)?,
            None => Sort::default(),
        };
        Self::new(
            page.unwrap_or(0),
            size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
            sort,
        )
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Number of rows preceding this page. Saturates for indexes far past any real data.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(u64::from(self.size))
    }
}

/// Page
///
/// One slice of an ordered result set, serialized with the metadata clients use to
/// drive paging controls. Built once per query and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based page index.
    pub number: u64,
    /// Requested page size.
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(mut content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        content.truncate(request.size() as usize);

        let size = u64::from(request.size());
        let total_pages = total_elements.div_ceil(size);
        let number = request.page();

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
            content,
            total_elements,
            total_pages,
            number,
            size: request.size(),
        }
    }

    /// Converts the content while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
