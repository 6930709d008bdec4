mod common;

use common::{EXISTING_MOVIE_ID, NON_EXISTING_MOVIE_ID, UNFILTERED_ORDER, fixture_repo, movies};
use movieflix::{
    CatalogError, catalog,
    filter::GenreFilter,
    pagination::{Direction, PageRequest, Sort, SortField},
};

fn titles(page: &movieflix::pagination::Page<movieflix::models::MovieSummary>) -> Vec<&str> {
    page.content.iter().map(|m| m.title.as_str()).collect()
}

// --- MoviePage Query ---

#[tokio::test]
async fn test_unfiltered_first_page_is_ordered_by_title() {
    let repo = fixture_repo();

    let page = catalog::find_movies(&repo, GenreFilter::any(), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(
        &titles(&page)[..5],
        &[
            "A Voz do Silêncio",
            "Bob Esponja",
            "Código de Conduta",
            "Kingsman",
            "O Labirinto do Fauno",
        ]
    );
    assert_eq!(titles(&page), UNFILTERED_ORDER.to_vec());
    assert_eq!(page.total_elements, 9);
    assert_eq!(page.total_pages, 1);
    assert!(page.first && page.last);
}

#[tokio::test]
async fn test_genre_filter_keeps_title_order() {
    let repo = fixture_repo();

    let page = catalog::find_movies(&repo, GenreFilter::genre(1), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(titles(&page), vec!["Bob Esponja", "Kingsman", "Sonic"]);
    assert_eq!(page.total_elements, 3);
}

#[tokio::test]
async fn test_every_filtered_movie_belongs_to_the_genre() {
    let repo = fixture_repo();
    let all = movies();

    for genre_id in 1..=4 {
        let filter = GenreFilter::genre(genre_id);
        let page = catalog::find_movies(&repo, filter, PageRequest::default())
            .await
            .unwrap();

        let expected = all.iter().filter(|m| m.genre.id == genre_id).count();
        assert_eq!(page.total_elements, expected as u64);

        for summary in &page.content {
            let movie = all.iter().find(|m| m.id == summary.id).unwrap();
            assert_eq!(
                movie.genre.id, genre_id,
                "{} leaked into genre {}",
                movie.title, genre_id
            );
        }
    }
}

#[tokio::test]
async fn test_unknown_genre_yields_empty_page() {
    let repo = fixture_repo();

    let page = catalog::find_movies(&repo, GenreFilter::genre(999), PageRequest::default())
        .await
        .unwrap();

    assert!(page.empty);
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_page_content_never_exceeds_page_size() {
    let repo = fixture_repo();

    for size in 1..=10 {
        for index in 0..=10 {
            let request = PageRequest::new(index, size, Sort::default()).unwrap();
            let page = catalog::find_movies(&repo, GenreFilter::any(), request)
                .await
                .unwrap();

            assert!(page.content.len() <= size as usize);
            assert_eq!(page.total_elements, 9);
        }
    }
}

#[tokio::test]
async fn test_pages_walk_the_full_ordering_without_gaps() {
    let repo = fixture_repo();
    let mut seen = Vec::new();

    for index in 0..3 {
        let request = PageRequest::new(index, 4, Sort::default()).unwrap();
        let page = catalog::find_movies(&repo, GenreFilter::any(), request)
            .await
            .unwrap();
        assert_eq!(page.number, index as u64);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.last, index == 2);
        seen.extend(page.content.into_iter().map(|m| m.title));
    }

    assert_eq!(seen, UNFILTERED_ORDER.to_vec());
}

#[tokio::test]
async fn test_out_of_range_page_is_empty_with_correct_total() {
    let repo = fixture_repo();
    let request = PageRequest::new(50, 5, Sort::default()).unwrap();

    let page = catalog::find_movies(&repo, GenreFilter::genre(1), request)
        .await
        .unwrap();

    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.number, 50);
}

#[tokio::test]
async fn test_page_index_past_u32_range_is_still_an_empty_page() {
    let repo = fixture_repo();

    for index in [i64::from(u32::MAX), i64::from(u32::MAX) + 1, i64::MAX] {
        let request = PageRequest::new(index, 5, Sort::default()).unwrap();
        let page = catalog::find_movies(&repo, GenreFilter::any(), request)
            .await
            .unwrap();

        assert!(page.content.is_empty(), "index {index}");
        assert_eq!(page.total_elements, 9);
        assert_eq!(page.number, index as u64);
        assert!(!page.first);
        assert!(page.last);
    }
}

#[test]
fn test_offset_saturates_for_huge_index() {
    let request = PageRequest::new(i64::MAX, 2000, Sort::default()).unwrap();
    assert_eq!(request.offset(), u64::MAX);
}

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let repo = fixture_repo();
    let request = PageRequest::new(1, 3, Sort::default()).unwrap();

    let first = catalog::find_movies(&repo, GenreFilter::any(), request)
        .await
        .unwrap();
    let second = catalog::find_movies(&repo, GenreFilter::any(), request)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_sort_by_year_descending_breaks_ties_by_id() {
    let repo = fixture_repo();
    let request = PageRequest::new(0, 3, Sort::by(SortField::Year, Direction::Desc)).unwrap();

    let page = catalog::find_movies(&repo, GenreFilter::any(), request)
        .await
        .unwrap();

    // Bob Esponja (id 1) and Sonic (id 3) are both from 2020.
    assert_eq!(titles(&page), vec!["Bob Esponja", "Sonic", "Parasita"]);
}

// --- Pagination validation ---

#[test]
fn test_negative_page_is_invalid() {
    let result = PageRequest::new(-1, 10, Sort::default());
    assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
}

#[test]
fn test_non_positive_size_is_invalid() {
    assert!(matches!(
        PageRequest::new(0, 0, Sort::default()),
        Err(CatalogError::InvalidRequest(_))
    ));
    assert!(matches!(
        PageRequest::new(0, -5, Sort::default()),
        Err(CatalogError::InvalidRequest(_))
    ));
}

#[test]
fn test_oversized_page_is_clamped() {
    let request = PageRequest::new(0, 1_000_000, Sort::default()).unwrap();
    assert_eq!(request.size(), movieflix::pagination::MAX_PAGE_SIZE);
}

#[test]
fn test_params_defaults() {
    let request = PageRequest::from_params(None, None, None).unwrap();
    assert_eq!(request, PageRequest::default());
    assert_eq!(request.size(), 20);
    assert_eq!(request.sort(), Sort::by(SortField::Title, Direction::Asc));
}

#[test]
fn test_sort_parsing() {
    assert_eq!(
        Sort::parse("year,desc").unwrap(),
        Sort::by(SortField::Year, Direction::Desc)
    );
    assert_eq!(Sort::parse("Title").unwrap(), Sort::default());
    assert!(matches!(Sort::parse("synopsis"), Err(CatalogError::InvalidRequest(_))));
    assert!(matches!(Sort::parse("title,up"), Err(CatalogError::InvalidRequest(_))));
    assert!(matches!(Sort::parse("title,asc,x"), Err(CatalogError::InvalidRequest(_))));
}

// --- MovieDetail Lookup ---

#[tokio::test]
async fn test_find_movie_returns_full_detail() {
    let repo = fixture_repo();

    let detail = catalog::find_movie(&repo, EXISTING_MOVIE_ID).await.unwrap();

    assert_eq!(detail.id, EXISTING_MOVIE_ID);
    assert!(!detail.title.is_empty());
    assert!(!detail.sub_title.is_empty());
    assert!(detail.year > 0);
    assert!(!detail.img_url.is_empty());
    assert!(!detail.synopsis.is_empty());
    assert_eq!(detail.genre.id, 1);
    assert_eq!(detail.genre.name, "Comédia");
}

#[tokio::test]
async fn test_find_movie_not_found() {
    let repo = fixture_repo();

    let result = catalog::find_movie(&repo, NON_EXISTING_MOVIE_ID).await;

    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

// --- Genre Listing ---

#[tokio::test]
async fn test_find_genres_returns_every_genre() {
    let repo = fixture_repo();

    let genres = catalog::find_genres(&repo).await.unwrap();

    let ids: Vec<i64> = genres.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert!(genres.iter().all(|g| !g.name.is_empty()));
}
