//! Text rendering of the book table and of a single record.

use comfy_table::{presets::UTF8_FULL, Table};

use super::models::Book;
use crate::utils::{or_missing, price_or_missing, MISSING};

/// Text of the inline row shown when the list could not be fetched.
pub const LOAD_ERROR_ROW: &str = "Error: could not load data.";

const COLUMNS: [&str; 7] = [
    "ID",
    "Title",
    "Author",
    "ISBN",
    "Price",
    "Publish Date",
    "Publisher",
];

/// What the book table currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BookTable {
    /// Nothing fetched yet.
    #[default]
    Pending,
    Rows(Vec<Book>),
    /// The last list request failed; an inline error row replaces the rows.
    LoadFailed,
}

impl BookTable {
    pub fn books(&self) -> &[Book] {
        match self {
            BookTable::Rows(books) => books,
            _ => &[],
        }
    }

    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(COLUMNS);

        match self {
            BookTable::Pending => {}
            BookTable::Rows(books) => {
                for book in books {
                    table.add_row(book_row(book));
                }
            }
            BookTable::LoadFailed => {
                table.add_row(vec![LOAD_ERROR_ROW.to_string()]);
            }
        }

        table.to_string()
    }
}

fn book_row(book: &Book) -> Vec<String> {
    vec![
        book.id.to_string(),
        book.title.clone(),
        book.author.clone(),
        book.isbn.clone(),
        price_or_missing(book.price),
        or_missing(book.publish_date.as_deref()),
        or_missing(book.publisher.as_deref()),
    ]
}

/// Two-column field/value rendering of a single record.
pub fn render_book(book: &Book) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(["Field", "Value"]);

    let rows: [(&str, String); 12] = [
        ("ID", book.id.to_string()),
        ("Title", book.title.clone()),
        ("Author", book.author.clone()),
        ("ISBN", book.isbn.clone()),
        ("Price", price_or_missing(book.price)),
        ("Publish Date", or_missing(book.publish_date.as_deref())),
        ("Language", or_missing(book.language.as_deref())),
        (
            "Pages",
            book.page_count
                .map(|p| p.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        ),
        ("Publisher", or_missing(book.publisher.as_deref())),
        ("Edition", or_missing(book.edition.as_deref())),
        ("Cover Image", or_missing(book.cover_image_url.as_deref())),
        ("Description", or_missing(book.description.as_deref())),
    ];

    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }

    table.to_string()
}
