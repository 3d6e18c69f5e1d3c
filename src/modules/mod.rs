pub mod books;

use bookshelf_http::ApiClient;
use bookshelf_kernel::settings::Settings;

use books::{FormController, RestBookApi};

/// Build a form controller talking to the configured backend
pub fn book_controller(settings: &Settings) -> anyhow::Result<FormController<RestBookApi>> {
    let client = ApiClient::new(&settings.api)?;
    tracing::info!(
        base_url = %client.base_url(),
        environment = ?settings.environment,
        "book controller ready"
    );
    Ok(FormController::new(RestBookApi::new(client)))
}
