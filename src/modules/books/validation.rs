//! Client-side checks run before any book is sent to the backend.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use time::{Date, Month};
use url::Url;

use super::form::BookForm;
use super::models::BookDraft;

/// ISBN-10 or ISBN-13, ASCII digits only (`\d` would admit any Unicode digit).
static ISBN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{10}|[0-9]{13})$").expect("valid ISBN pattern"));

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})$").expect("valid date pattern")
});

/// The first rule a book failed. `Display` is the text shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a title.")]
    MissingTitle,

    #[error("Please enter an author.")]
    MissingAuthor,

    #[error("Please enter an ISBN.")]
    MissingIsbn,

    #[error("The ISBN must be 10 or 13 digits.")]
    InvalidIsbn,

    #[error("Please enter a price.")]
    MissingPrice,

    #[error("Please enter a valid price.")]
    InvalidPrice,

    #[error("The price must be greater than 0.")]
    NonPositivePrice,

    #[error("Please enter a valid page count.")]
    InvalidPageCount,

    #[error("Please enter a publish date.")]
    MissingPublishDate,

    #[error("The publish date must be a date in YYYY-MM-DD format.")]
    InvalidPublishDate,

    #[error("The cover image URL is not valid.")]
    InvalidCoverUrl,
}

/// Check a draft against every rule, reporting the first failure in form
/// order.
pub fn validate(book: &BookDraft) -> Result<(), ValidationError> {
    check_identity(book)?;
    check_price(book.price)?;
    check_page_count(book.page_count)?;
    check_publication(book)
}

/// Read and check a submitted form, returning the draft to send.
///
/// Numeric text that does not parse is reported at its own position in the
/// form, so an empty title still wins over an unreadable price.
pub fn validate_form(form: &BookForm) -> Result<BookDraft, ValidationError> {
    let draft = form.to_draft();

    check_identity(&draft)?;
    if draft.price.is_none() && !form.price.trim().is_empty() {
        return Err(ValidationError::InvalidPrice);
    }
    check_price(draft.price)?;
    if draft.page_count.is_none() && !form.page_count.trim().is_empty() {
        return Err(ValidationError::InvalidPageCount);
    }
    check_page_count(draft.page_count)?;
    check_publication(&draft)?;

    Ok(draft)
}

fn check_identity(book: &BookDraft) -> Result<(), ValidationError> {
    if book.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if book.author.trim().is_empty() {
        return Err(ValidationError::MissingAuthor);
    }
    if book.isbn.trim().is_empty() {
        return Err(ValidationError::MissingIsbn);
    }
    if !is_valid_isbn(&book.isbn) {
        return Err(ValidationError::InvalidIsbn);
    }
    Ok(())
}

fn check_price(price: Option<f64>) -> Result<(), ValidationError> {
    match price {
        None => Err(ValidationError::MissingPrice),
        Some(price) if !price.is_finite() => Err(ValidationError::InvalidPrice),
        Some(price) if price <= 0.0 => Err(ValidationError::NonPositivePrice),
        Some(_) => Ok(()),
    }
}

fn check_page_count(page_count: Option<i64>) -> Result<(), ValidationError> {
    if matches!(page_count, Some(pages) if pages <= 0) {
        return Err(ValidationError::InvalidPageCount);
    }
    Ok(())
}

/// Publish date, then cover URL.
fn check_publication(book: &BookDraft) -> Result<(), ValidationError> {
    match book.publish_date.as_deref().map(str::trim) {
        None | Some("") => return Err(ValidationError::MissingPublishDate),
        Some(date) if !is_valid_date(date) => return Err(ValidationError::InvalidPublishDate),
        Some(_) => {}
    }

    if let Some(url) = book.cover_image_url.as_deref() {
        if !url.trim().is_empty() && !is_valid_url(url) {
            return Err(ValidationError::InvalidCoverUrl);
        }
    }

    Ok(())
}

pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_PATTERN.is_match(isbn)
}

/// `YYYY-MM-DD` that also names a real calendar day.
pub fn is_valid_date(date: &str) -> bool {
    let Some(caps) = DATE_PATTERN.captures(date) else {
        return false;
    };

    let year: i32 = match caps["year"].parse() {
        Ok(year) => year,
        Err(_) => return false,
    };
    let month = match caps["month"].parse::<u8>().map(Month::try_from) {
        Ok(Ok(month)) => month,
        _ => return false,
    };
    let day: u8 = match caps["day"].parse() {
        Ok(day) => day,
        Err(_) => return false,
    };

    Date::from_calendar_date(year, month, day).is_ok()
}

/// Absolute URL with a scheme, e.g. `https://covers.example.com/1.jpg`.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url.trim()).is_ok()
}
