use serde::{Deserialize, Serialize};

/// Server-assigned book identifier.
pub type BookId = i64;

/// A book record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: BookId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub page_count: Option<i64>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating or replacing a book.
///
/// Produced from the form; blank optional fields are `None` and go out as
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: Option<f64>,
    pub publish_date: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<i64>,
    pub publisher: Option<String>,
    pub edition: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
}

impl BookDraft {
    /// Attach a server id, as the backend does on create.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            price: self.price,
            publish_date: self.publish_date,
            language: self.language,
            page_count: self.page_count,
            publisher: self.publisher,
            edition: self.edition,
            cover_image_url: self.cover_image_url,
            description: self.description,
        }
    }
}
