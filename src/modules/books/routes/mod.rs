use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use catalog_http::{ApiResult, Garde};

use super::models::{Book, BookIdParams, BookRequest, CreatedBook, PublishQuery, RatingQuery};
use super::store::CatalogStore;

/// HTTP routes of the books module, bound to `store`.
pub fn router(store: CatalogStore) -> Router {
    Router::new()
        .route("/books", get(read_all_books))
        .route("/books/", get(read_books_by_rating))
        .route("/books/publish/", get(read_books_by_publish))
        // Other methods fall through to the id handlers and fail id validation.
        .route(
            "/books/update_book",
            get(read_book).put(update_book).delete(delete_book),
        )
        .route("/books/{book_id}", get(read_book).delete(delete_book))
        .route("/create-book", post(create_book))
        .with_state(store)
}

async fn read_all_books(State(store): State<CatalogStore>) -> Json<Vec<Book>> {
    Json(store.list().await)
}

async fn read_book(
    State(store): State<CatalogStore>,
    Garde(Path(params)): Garde<Path<BookIdParams>>,
) -> ApiResult<Json<Book>> {
    let book = store.find(params.book_id).await?;
    Ok(Json(book))
}

async fn read_books_by_rating(
    State(store): State<CatalogStore>,
    Garde(Query(query)): Garde<Query<RatingQuery>>,
) -> Json<Vec<Book>> {
    Json(store.filter_by_rating(query.book_rating).await)
}

async fn read_books_by_publish(
    State(store): State<CatalogStore>,
    Garde(Query(query)): Garde<Query<PublishQuery>>,
) -> Json<Vec<Book>> {
    Json(store.filter_by_publish(query.published).await)
}

async fn create_book(
    State(store): State<CatalogStore>,
    Garde(Json(request)): Garde<Json<BookRequest>>,
) -> (StatusCode, Json<CreatedBook>) {
    let book = store.append(request).await;
    tracing::info!(book_id = book.id, title = %book.title, "book created");

    (
        StatusCode::CREATED,
        Json(CreatedBook {
            message: "Book created successfully".to_string(),
            book,
        }),
    )
}

async fn update_book(
    State(store): State<CatalogStore>,
    Garde(Json(request)): Garde<Json<BookRequest>>,
) -> ApiResult<StatusCode> {
    let book = store.replace(request).await?;
    tracing::info!(book_id = book.id, "book updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(
    State(store): State<CatalogStore>,
    Garde(Path(params)): Garde<Path<BookIdParams>>,
) -> ApiResult<StatusCode> {
    store.remove(params.book_id).await?;
    tracing::info!(book_id = params.book_id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
