use super::models::{Book, BookDraft};

/// Raw text of every field on the book form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub publish_date: String,
    pub language: String,
    pub page_count: String,
    pub publisher: String,
    pub edition: String,
    pub cover_image_url: String,
    pub description: String,
}

impl BookForm {
    /// Read the form into a draft.
    ///
    /// Every field is trimmed. Blank numeric fields, and numeric text that
    /// does not parse, become `None`; `validate_form` tells the two apart.
    pub fn to_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            price: self.price.trim().parse::<f64>().ok(),
            publish_date: non_blank(&self.publish_date),
            language: non_blank(&self.language),
            page_count: self.page_count.trim().parse::<i64>().ok(),
            publisher: non_blank(&self.publisher),
            edition: non_blank(&self.edition),
            cover_image_url: non_blank(&self.cover_image_url),
            description: non_blank(&self.description),
        }
    }

    /// Fill every field from a stored record; absent values become empty.
    pub fn populate(&mut self, book: &Book) {
        *self = Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            price: book.price.map(|p| p.to_string()).unwrap_or_default(),
            publish_date: book.publish_date.clone().unwrap_or_default(),
            language: book.language.clone().unwrap_or_default(),
            page_count: book.page_count.map(|p| p.to_string()).unwrap_or_default(),
            publisher: book.publisher.clone().unwrap_or_default(),
            edition: book.edition.clone().unwrap_or_default(),
            cover_image_url: book.cover_image_url.clone().unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
