use async_trait::async_trait;
use bookshelf_http::{ApiClient, ClientError, Method};

use super::models::{Book, BookDraft, BookId};

const BOOKS_PATH: &str = "/api/books";

/// CRUD operations the form controller needs from a book backend.
#[async_trait]
pub trait BookApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>, ClientError>;

    async fn get(&self, id: BookId) -> Result<Book, ClientError>;

    async fn create(&self, draft: &BookDraft) -> Result<Book, ClientError>;

    async fn update(&self, id: BookId, draft: &BookDraft) -> Result<Book, ClientError>;

    async fn delete(&self, id: BookId) -> Result<(), ClientError>;
}

/// [`BookApi`] backed by the `/api/books` REST resource.
#[derive(Debug, Clone)]
pub struct RestBookApi {
    client: ApiClient,
}

impl RestBookApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

fn book_path(id: BookId) -> String {
    format!("{}/{}", BOOKS_PATH, id)
}

#[async_trait]
impl BookApi for RestBookApi {
    async fn list(&self) -> Result<Vec<Book>, ClientError> {
        self.client.get_json(BOOKS_PATH).await
    }

    async fn get(&self, id: BookId) -> Result<Book, ClientError> {
        self.client.get_json(&book_path(id)).await
    }

    async fn create(&self, draft: &BookDraft) -> Result<Book, ClientError> {
        self.client
            .send_json(Method::POST, BOOKS_PATH, draft)
            .await
    }

    async fn update(&self, id: BookId, draft: &BookDraft) -> Result<Book, ClientError> {
        self.client
            .send_json(Method::PUT, &book_path(id), draft)
            .await
    }

    async fn delete(&self, id: BookId) -> Result<(), ClientError> {
        self.client.delete(&book_path(id)).await
    }
}
