//! In-memory catalog backing the books routes.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, BookRequest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No entry carries the requested id (`None` when the request had no id)
    #[error("Book not found")]
    NotFound(Option<i64>),
}

impl From<CatalogError> for catalog_http::AppError {
    fn from(err: CatalogError) -> Self {
        catalog_http::AppError::not_found(err.to_string())
    }
}

/// Ordered, process-local sequence of books.
///
/// Clones share the same sequence. Each call holds the lock for its whole
/// scan-and-mutate, but nothing spans two calls.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    books: Arc<RwLock<Vec<Book>>>,
}

impl CatalogStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(super::models::seed_books())
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// Every entry in insertion order.
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn find(&self, id: i64) -> Result<Book, CatalogError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(Some(id)))
    }

    /// Entries whose rating is exactly `rating`; no tolerance is applied.
    #[allow(clippy::float_cmp)]
    pub async fn filter_by_rating(&self, rating: f64) -> Vec<Book> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| book.rating == rating)
            .cloned()
            .collect()
    }

    pub async fn filter_by_publish(&self, year: i32) -> Vec<Book> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| book.publish == year)
            .cloned()
            .collect()
    }

    /// Append a new entry with id `last.id + 1`, or `0` when empty.
    ///
    /// The id comes from the last element, not the maximum, so deleting the
    /// tail entry makes its id available again.
    pub async fn append(&self, request: BookRequest) -> Book {
        let mut books = self.books.write().await;
        let id = books.last().map_or(0, |last| last.id + 1);
        let book = request.into_book(id);
        books.push(book.clone());
        book
    }

    /// Replace the first entry whose id matches `request.id`.
    pub async fn replace(&self, request: BookRequest) -> Result<Book, CatalogError> {
        let Some(id) = request.id else {
            return Err(CatalogError::NotFound(None));
        };

        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(Some(id)))?;
        *slot = request.into_book(id);
        Ok(slot.clone())
    }

    /// Remove the first entry with `id`, keeping the order of the rest.
    pub async fn remove(&self, id: i64) -> Result<Book, CatalogError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound(Some(id)))?;
        Ok(books.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: Option<i64>, title: &str) -> BookRequest {
        BookRequest {
            id,
            title: title.to_string(),
            author: "Abc".to_string(),
            description: "Some description".to_string(),
            rating: 4.5,
            publish: 2010,
        }
    }

    fn ids(books: &[Book]) -> Vec<i64> {
        books.iter().map(|b| b.id).collect()
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = CatalogStore::seeded();
        store.append(request(None, "X12")).await;
        assert_eq!(ids(&store.list().await), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn append_uses_last_element_plus_one() {
        let store = CatalogStore::seeded();
        let created = store.append(request(Some(99), "X12")).await;
        assert_eq!(created.id, 8);
        assert_eq!(store.find(8).await.unwrap().title, "X12");
    }

    #[tokio::test]
    async fn append_on_empty_catalog_starts_at_zero() {
        let store = CatalogStore::default();
        assert!(store.is_empty().await);
        assert_eq!(store.append(request(None, "first")).await.id, 0);
        assert_eq!(store.append(request(None, "second")).await.id, 1);
    }

    #[tokio::test]
    async fn deleting_the_tail_lets_its_id_be_reused() {
        let store = CatalogStore::seeded();
        store.remove(7).await.unwrap();
        assert_eq!(store.append(request(None, "X12")).await.id, 7);
    }

    #[tokio::test]
    async fn id_follows_last_element_not_maximum() {
        let store = CatalogStore::new(vec![
            request(None, "big").into_book(10),
            request(None, "small").into_book(3),
        ]);
        assert_eq!(store.append(request(None, "next")).await.id, 4);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = CatalogStore::seeded();
        assert_eq!(store.find(42).await, Err(CatalogError::NotFound(Some(42))));
        assert_eq!(
            store.replace(request(Some(42), "abc")).await,
            Err(CatalogError::NotFound(Some(42)))
        );
        assert_eq!(store.remove(42).await, Err(CatalogError::NotFound(Some(42))));
        assert_eq!(
            store.replace(request(None, "abc")).await,
            Err(CatalogError::NotFound(None))
        );
        assert_eq!(store.len().await, 7);
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_record_in_place() {
        let store = CatalogStore::seeded();
        let updated = store.replace(request(Some(3), "Renamed")).await.unwrap();
        assert_eq!(updated.id, 3);

        let books = store.list().await;
        assert_eq!(ids(&books), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(books[2].title, "Renamed");
        assert_eq!(books[2].rating, 4.5);
        assert_eq!(books[2].publish, 2010);
    }

    #[tokio::test]
    async fn remove_drops_exactly_one_entry() {
        let store = CatalogStore::seeded();
        let removed = store.remove(4).await.unwrap();
        assert_eq!(removed.id, 4);
        assert_eq!(ids(&store.list().await), vec![1, 2, 3, 5, 6, 7]);
    }

    #[tokio::test]
    async fn remove_stops_at_first_duplicate() {
        let store = CatalogStore::new(vec![
            request(None, "first").into_book(5),
            request(None, "second").into_book(5),
        ]);
        assert_eq!(store.remove(5).await.unwrap().title, "first");
        assert_eq!(store.list().await[0].title, "second");
    }

    #[tokio::test]
    async fn rating_filter_uses_exact_equality() {
        let store = CatalogStore::seeded();
        assert_eq!(ids(&store.filter_by_rating(4.0).await), vec![1, 6, 7]);
        assert!(store.filter_by_rating(4.000001).await.is_empty());
        assert_eq!(ids(&store.filter_by_rating(2.5).await), vec![5]);
    }

    #[tokio::test]
    async fn publish_filter_matches_year() {
        let store = CatalogStore::seeded();
        assert_eq!(ids(&store.filter_by_publish(2005).await), vec![3, 4]);
        assert!(store.filter_by_publish(2014).await.is_empty());
    }

    #[tokio::test]
    async fn clones_share_the_catalog() {
        let store = CatalogStore::seeded();
        let handle = store.clone();
        handle.remove(1).await.unwrap();
        assert_eq!(store.len().await, 6);
    }
}
