//! Form controller: reads the book form, validates it, calls the backend and
//! keeps the table, the notice line and the create/edit mode in sync.

use bookshelf_http::ClientError;

use super::api::BookApi;
use super::form::BookForm;
use super::models::{Book, BookDraft, BookId};
use super::validation::validate_form;
use super::view::BookTable;
use super::BookError;

const CREATE_LABEL: &str = "Register book";
const UPDATE_LABEL: &str = "Update book";

/// Whether submitting the form creates a record or replaces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BookId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// The single status line under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Drives one book form against a [`BookApi`].
///
/// Every view is a fresh fetch; nothing is cached between calls apart from
/// what is currently on screen.
pub struct FormController<A> {
    api: A,
    form: BookForm,
    editing_id: Option<BookId>,
    notice: Option<Notice>,
    table: BookTable,
}

impl<A: BookApi> FormController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: BookForm::default(),
            editing_id: None,
            notice: None,
            table: BookTable::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn table(&self) -> &BookTable {
        &self.table
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn editing_id(&self) -> Option<BookId> {
        self.editing_id
    }

    pub fn mode(&self) -> FormMode {
        match self.editing_id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => CREATE_LABEL,
            FormMode::Edit(_) => UPDATE_LABEL,
        }
    }

    /// The cancel action is only offered while editing.
    pub fn cancel_visible(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Fetch the list and replace the table. On failure the table shows the
    /// inline error row.
    pub async fn load_books(&mut self) -> Result<(), BookError> {
        match self.api.list().await {
            Ok(books) => {
                tracing::debug!(count = books.len(), "book list loaded");
                self.table = BookTable::Rows(books);
                Ok(())
            }
            Err(source) => {
                tracing::error!(error = %source, "failed to load book list");
                self.table = BookTable::LoadFailed;
                let error = BookError::Load { source };
                self.notice = Some(Notice::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Read and validate the form, then create or update depending on the
    /// mode. Nothing is sent when validation fails.
    pub async fn submit(&mut self) -> Result<Book, BookError> {
        let draft = match validate_form(&self.form) {
            Ok(draft) => draft,
            Err(invalid) => {
                tracing::debug!(reason = %invalid, "form rejected by validation");
                self.notice = Some(Notice::error(invalid.to_string()));
                return Err(invalid.into());
            }
        };

        match self.editing_id {
            Some(id) => self.update_book(id, draft).await,
            None => self.create_book(draft).await,
        }
    }

    pub async fn create_book(&mut self, draft: BookDraft) -> Result<Book, BookError> {
        match self.api.create(&draft).await {
            Ok(book) => {
                tracing::info!(book_id = book.id, "book registered");
                self.finish_mutation("Book registered successfully.").await;
                Ok(book)
            }
            Err(source) => Err(self.request_failed(source, "Failed to register the book.")),
        }
    }

    pub async fn update_book(&mut self, id: BookId, draft: BookDraft) -> Result<Book, BookError> {
        match self.api.update(id, &draft).await {
            Ok(book) => {
                tracing::info!(book_id = id, "book updated");
                self.finish_mutation("Book updated successfully.").await;
                Ok(book)
            }
            Err(source) => Err(self.request_failed(source, "Failed to update the book.")),
        }
    }

    /// Delete after `confirm` agrees. Returns `Ok(false)` when the user
    /// declined, in which case no request is made.
    pub async fn delete_book<F>(&mut self, id: BookId, confirm: F) -> Result<bool, BookError>
    where
        F: FnOnce(BookId) -> bool,
    {
        if !confirm(id) {
            tracing::debug!(book_id = id, "delete declined");
            return Ok(false);
        }

        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(book_id = id, "book deleted");
                self.finish_mutation("Book deleted successfully.").await;
                Ok(true)
            }
            Err(source) => Err(self.request_failed(source, "Failed to delete the book.")),
        }
    }

    /// Load one record into the form and switch to edit mode for it.
    pub async fn edit_book(&mut self, id: BookId) -> Result<Book, BookError> {
        match self.api.get(id).await {
            Ok(book) => {
                self.form.populate(&book);
                self.editing_id = Some(id);
                tracing::debug!(book_id = id, "editing book");
                Ok(book)
            }
            Err(source) => Err(self.request_failed(source, "The book does not exist.")),
        }
    }

    /// Clear the form, leave edit mode and hide the notice.
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.editing_id = None;
        self.notice = None;
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    async fn finish_mutation(&mut self, success: &str) {
        self.reset_form();
        self.notice = Some(Notice::success(success));
        // A failed reload replaces the notice and shows the error row.
        let _ = self.load_books().await;
    }

    fn request_failed(&mut self, source: ClientError, fallback: &str) -> BookError {
        let message = source
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        tracing::error!(
            error = %source,
            status_code = ?source.status(),
            %message,
            "book request failed"
        );
        self.notice = Some(Notice::error(message.clone()));
        BookError::Request { message, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::ValidationError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeState {
        books: Vec<Book>,
        next_id: BookId,
        calls: Vec<String>,
        fail_with: Option<(u16, String)>,
        fail_list: bool,
    }

    /// In-memory backend that records every call.
    #[derive(Default)]
    struct FakeApi {
        state: Mutex<FakeState>,
    }

    impl FakeApi {
        fn with_books(books: Vec<Book>) -> Self {
            let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
            Self {
                state: Mutex::new(FakeState {
                    books,
                    next_id,
                    ..FakeState::default()
                }),
            }
        }

        fn fail_next(&self, status: u16, body: &str) {
            self.state.lock().unwrap().fail_with = Some((status, body.to_string()));
        }

        fn fail_list(&self) {
            self.state.lock().unwrap().fail_list = true;
        }

        fn calls(&self) -> Vec<String> {
            self.state.lock().unwrap().calls.clone()
        }

        fn books(&self) -> Vec<Book> {
            self.state.lock().unwrap().books.clone()
        }

        fn record(&self, call: String) -> Result<std::sync::MutexGuard<'_, FakeState>, ClientError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            match state.fail_with.take() {
                Some((status, body)) => Err(ClientError::api(status, &body)),
                None => Ok(state),
            }
        }
    }

    #[async_trait]
    impl BookApi for FakeApi {
        async fn list(&self) -> Result<Vec<Book>, ClientError> {
            let state = self.record("GET /api/books".to_string())?;
            if state.fail_list {
                return Err(ClientError::api(503, ""));
            }
            Ok(state.books.clone())
        }

        async fn get(&self, id: BookId) -> Result<Book, ClientError> {
            let state = self.record(format!("GET /api/books/{id}"))?;
            state
                .books
                .iter()
                .find(|b| b.id == id)
                .cloned()
                .ok_or_else(|| ClientError::api(404, ""))
        }

        async fn create(&self, draft: &BookDraft) -> Result<Book, ClientError> {
            let mut state = self.record("POST /api/books".to_string())?;
            let book = draft.clone().into_book(state.next_id);
            state.next_id += 1;
            state.books.push(book.clone());
            Ok(book)
        }

        async fn update(&self, id: BookId, draft: &BookDraft) -> Result<Book, ClientError> {
            let mut state = self.record(format!("PUT /api/books/{id}"))?;
            let slot = state
                .books
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| ClientError::api(404, r#"{"message": "no such book"}"#))?;
            *slot = draft.clone().into_book(id);
            Ok(slot.clone())
        }

        async fn delete(&self, id: BookId) -> Result<(), ClientError> {
            let mut state = self.record(format!("DELETE /api/books/{id}"))?;
            state.books.retain(|b| b.id != id);
            Ok(())
        }
    }

    fn stored(id: BookId, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            isbn: "9780441478125".to_string(),
            price: Some(15000.0),
            publish_date: Some("1969-03-01".to_string()),
            language: Some("en".to_string()),
            page_count: Some(304),
            publisher: Some("Ace".to_string()),
            edition: None,
            cover_image_url: None,
            description: None,
        }
    }

    fn fill_valid(form: &mut BookForm) {
        form.title = "The Dispossessed".to_string();
        form.author = "Ursula K. Le Guin".to_string();
        form.isbn = "9780061054884".to_string();
        form.price = "16500".to_string();
        form.publish_date = "1974-05-01".to_string();
    }

    #[tokio::test]
    async fn load_books_fills_table() {
        let mut controller = FormController::new(FakeApi::with_books(vec![stored(1, "Left Hand")]));

        controller.load_books().await.unwrap();

        assert_eq!(controller.table().books().len(), 1);
        assert!(controller.notice().is_none());
    }

    #[tokio::test]
    async fn failed_load_shows_error_row() {
        let api = FakeApi::with_books(vec![stored(1, "Left Hand")]);
        api.fail_list();
        let mut controller = FormController::new(api);

        let err = controller.load_books().await.unwrap_err();

        assert!(matches!(err, BookError::Load { .. }));
        assert_eq!(controller.table(), &BookTable::LoadFailed);
        let notice = controller.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.text, "Failed to load the book list.");
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let mut controller = FormController::new(FakeApi::default());
        fill_valid(controller.form_mut());
        controller.form_mut().isbn = "978-0061054884".to_string();

        let err = controller.submit().await.unwrap_err();

        assert!(matches!(
            err,
            BookError::Validation(ValidationError::InvalidIsbn)
        ));
        assert!(controller.api().calls().is_empty());
        assert_eq!(controller.form().isbn, "978-0061054884");
        assert_eq!(
            controller.notice().unwrap().text,
            "The ISBN must be 10 or 13 digits."
        );
    }

    #[tokio::test]
    async fn empty_title_wins_over_unparsable_price() {
        let mut controller = FormController::new(FakeApi::default());
        fill_valid(controller.form_mut());
        controller.form_mut().title = String::new();
        controller.form_mut().price = "cheap".to_string();
        controller.form_mut().page_count = "many".to_string();

        let err = controller.submit().await.unwrap_err();

        assert!(matches!(
            err,
            BookError::Validation(ValidationError::MissingTitle)
        ));
        assert_eq!(controller.notice().unwrap().text, "Please enter a title.");
        assert!(controller.api().calls().is_empty());

        controller.form_mut().title = "The Dispossessed".to_string();
        let err = controller.submit().await.unwrap_err();
        assert!(matches!(
            err,
            BookError::Validation(ValidationError::InvalidPrice)
        ));
        assert_eq!(controller.form().price, "cheap");
    }

    #[tokio::test]
    async fn submit_creates_then_resets_and_reloads() {
        let mut controller = FormController::new(FakeApi::default());
        fill_valid(controller.form_mut());

        let book = controller.submit().await.unwrap();

        assert_eq!(book.title, "The Dispossessed");
        assert_eq!(
            controller.api().calls(),
            vec!["POST /api/books", "GET /api/books"]
        );
        assert!(controller.form().is_empty());
        assert_eq!(controller.mode(), FormMode::Create);
        assert_eq!(controller.table().books().len(), 1);
        assert_eq!(
            controller.notice(),
            Some(&Notice::success("Book registered successfully."))
        );
    }

    #[tokio::test]
    async fn failed_create_keeps_form_and_shows_server_message() {
        let api = FakeApi::default();
        api.fail_next(409, r#"{"message": "ISBN already registered"}"#);
        let mut controller = FormController::new(api);
        fill_valid(controller.form_mut());
        let before = controller.form().clone();

        let err = controller.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "ISBN already registered");
        match &err {
            BookError::Request { source, .. } => assert_eq!(source.status(), Some(409)),
            other => panic!("expected a request error, got {other:?}"),
        }
        assert_eq!(controller.form(), &before);
        assert_eq!(controller.api().calls(), vec!["POST /api/books"]);
        assert_eq!(
            controller.notice(),
            Some(&Notice::error("ISBN already registered"))
        );
    }

    #[tokio::test]
    async fn failed_create_without_message_uses_fallback() {
        let api = FakeApi::default();
        api.fail_next(500, "Internal Server Error");
        let mut controller = FormController::new(api);
        fill_valid(controller.form_mut());

        controller.submit().await.unwrap_err();

        assert_eq!(
            controller.notice().unwrap().text,
            "Failed to register the book."
        );
    }

    #[tokio::test]
    async fn edit_switches_mode_and_submit_updates() {
        let mut controller = FormController::new(FakeApi::with_books(vec![stored(4, "Left Hand")]));
        assert_eq!(controller.submit_label(), "Register book");
        assert!(!controller.cancel_visible());

        controller.edit_book(4).await.unwrap();

        assert_eq!(controller.mode(), FormMode::Edit(4));
        assert_eq!(controller.submit_label(), "Update book");
        assert!(controller.cancel_visible());
        assert_eq!(controller.form().title, "Left Hand");
        assert_eq!(controller.form().price, "15000");

        controller.form_mut().title = "The Left Hand of Darkness".to_string();
        controller.submit().await.unwrap();

        assert_eq!(
            controller.api().calls(),
            vec!["GET /api/books/4", "PUT /api/books/4", "GET /api/books"]
        );
        assert_eq!(controller.api().books()[0].title, "The Left Hand of Darkness");
        assert_eq!(controller.mode(), FormMode::Create);
        assert!(controller.form().is_empty());
        assert_eq!(
            controller.notice().unwrap().text,
            "Book updated successfully."
        );
    }

    #[tokio::test]
    async fn failed_update_stays_in_edit_mode() {
        let mut controller = FormController::new(FakeApi::with_books(vec![stored(4, "Left Hand")]));
        controller.edit_book(4).await.unwrap();
        controller
            .api()
            .fail_next(400, r#"{"error": {"message": "price too high"}}"#);

        controller.submit().await.unwrap_err();

        assert_eq!(controller.mode(), FormMode::Edit(4));
        assert_eq!(controller.form().title, "Left Hand");
        assert_eq!(controller.notice().unwrap().text, "price too high");
    }

    #[tokio::test]
    async fn edit_missing_book_reports_fallback() {
        let mut controller = FormController::new(FakeApi::default());

        controller.edit_book(99).await.unwrap_err();

        assert_eq!(controller.mode(), FormMode::Create);
        assert_eq!(controller.notice().unwrap().text, "The book does not exist.");
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut controller = FormController::new(FakeApi::with_books(vec![stored(2, "Earthsea")]));
        let mut asked = None;

        let deleted = controller
            .delete_book(2, |id| {
                asked = Some(id);
                false
            })
            .await
            .unwrap();

        assert!(!deleted);
        assert_eq!(asked, Some(2));
        assert!(controller.api().calls().is_empty());
        assert_eq!(controller.api().books().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_resets_and_reloads() {
        let mut controller = FormController::new(FakeApi::with_books(vec![
            stored(2, "Earthsea"),
            stored(3, "Tehanu"),
        ]));
        controller.edit_book(3).await.unwrap();

        let deleted = controller.delete_book(2, |_| true).await.unwrap();

        assert!(deleted);
        assert_eq!(
            controller.api().calls(),
            vec!["GET /api/books/3", "DELETE /api/books/2", "GET /api/books"]
        );
        assert_eq!(controller.mode(), FormMode::Create);
        assert!(controller.form().is_empty());
        assert_eq!(controller.table().books().len(), 1);
        assert_eq!(
            controller.notice().unwrap().text,
            "Book deleted successfully."
        );
    }

    #[tokio::test]
    async fn failed_delete_shows_server_message() {
        let api = FakeApi::with_books(vec![stored(2, "Earthsea")]);
        api.fail_next(403, r#"{"message": "book is on loan"}"#);
        let mut controller = FormController::new(api);

        controller.delete_book(2, |_| true).await.unwrap_err();

        assert_eq!(controller.notice().unwrap().text, "book is on loan");
        assert_eq!(controller.api().calls(), vec!["DELETE /api/books/2"]);
    }

    #[tokio::test]
    async fn cancel_edit_returns_to_create_mode() {
        let mut controller = FormController::new(FakeApi::with_books(vec![stored(5, "Lavinia")]));
        controller.edit_book(5).await.unwrap();

        controller.cancel_edit();

        assert_eq!(controller.mode(), FormMode::Create);
        assert!(controller.form().is_empty());
        assert!(controller.notice().is_none());
    }
}
