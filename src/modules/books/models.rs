use garde::Validate;
use serde::{Deserialize, Serialize};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the catalog on create
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: f64,
    /// Publication year
    pub publish: i32,
}

/// Write payload for create and update.
///
/// `id` is ignored on create and selects the record to replace on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[garde(skip)]
    #[serde(default)]
    pub id: Option<i64>,
    #[garde(length(chars, min = 3, max = 100))]
    pub title: String,
    #[garde(length(chars, min = 3, max = 50))]
    pub author: String,
    #[garde(length(chars, min = 3, max = 500))]
    pub description: String,
    #[garde(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[garde(range(min = 1999, max = 2024))]
    pub publish: i32,
}

impl BookRequest {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
            publish: self.publish,
        }
    }
}

/// Path parameters of `/books/{book_id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct BookIdParams {
    #[garde(range(min = 1))]
    pub book_id: i64,
}

/// Query of the rating filter.
#[derive(Debug, Deserialize, Validate)]
pub struct RatingQuery {
    #[garde(custom(rating_filter_bounds))]
    pub book_rating: f64,
}

/// Open interval (-1, 5.01); NaN fails both comparisons.
fn rating_filter_bounds(value: &f64, _ctx: &()) -> garde::Result {
    if *value > -1.0 && *value < 5.01 {
        Ok(())
    } else {
        Err(garde::Error::new(
            "must be greater than -1 and less than 5.01",
        ))
    }
}

/// Query of the publish-year filter. Narrower than the write bound on purpose.
#[derive(Debug, Deserialize, Validate)]
pub struct PublishQuery {
    #[garde(range(min = 1999, max = 2014))]
    pub published: i32,
}

/// Body returned by a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedBook {
    pub message: String,
    pub book: Book,
}

/// The fixed entries a fresh catalog starts with.
pub fn seed_books() -> Vec<Book> {
    const SEED: [(f64, i32); 7] = [
        (4.0, 2001),
        (4.5, 2003),
        (3.0, 2005),
        (5.0, 2005),
        (2.5, 2007),
        (4.0, 2008),
        (4.0, 2009),
    ];

    SEED.iter()
        .zip(1i64..)
        .map(|(&(rating, publish), id)| Book {
            id,
            title: format!("CS {}", 1100 + id),
            author: "Hasan".to_string(),
            description: if id == 1 {
                "This is hasan great book".to_string()
            } else {
                format!("This is hasan {id} great book")
            },
            rating,
            publish,
        })
        .collect()
}
