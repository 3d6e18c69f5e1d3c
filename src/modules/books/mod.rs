//! Book catalog: record model, form, validation, REST access and the form
//! controller that ties them together.

pub mod api;
pub mod controller;
pub mod form;
pub mod models;
pub mod validation;
pub mod view;

use bookshelf_http::ClientError;
use thiserror::Error;

pub use api::{BookApi, RestBookApi};
pub use controller::{FormController, FormMode, Notice, NoticeKind};
pub use form::BookForm;
pub use models::{Book, BookDraft, BookId};
pub use validation::{validate, validate_form, ValidationError};
pub use view::BookTable;

/// Why a controller operation did not succeed.
///
/// `Display` is the notice text the user sees.
#[derive(Error, Debug)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A create/read/update/delete call failed; `message` is the server's
    /// text or the operation's fallback.
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: ClientError,
    },

    #[error("Failed to load the book list.")]
    Load {
        #[source]
        source: ClientError,
    },
}
