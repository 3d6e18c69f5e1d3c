use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use bookshelf_app::books::{
    view::render_book, BookError, BookForm, BookId, FormController, NoticeKind, RestBookApi,
};
use bookshelf_kernel::settings::Settings;

/// Manage book records on a bookshelf REST backend
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    /// Base URL of the backend, overriding `api.base_url`
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every book
    List,
    /// Show every field of one book
    Show { id: BookId },
    /// Register a new book
    Add(BookFields),
    /// Change fields of an existing book; fields not given keep their value
    Edit {
        id: BookId,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book
    Delete {
        id: BookId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Form fields as typed on the command line.
#[derive(Debug, Args)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    publish_date: Option<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    page_count: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    edition: Option<String>,
    #[arg(long)]
    cover_image_url: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl BookFields {
    /// Overwrite the form fields that were given.
    fn apply(self, form: &mut BookForm) {
        let pairs = [
            (self.title, &mut form.title),
            (self.author, &mut form.author),
            (self.isbn, &mut form.isbn),
            (self.price, &mut form.price),
            (self.publish_date, &mut form.publish_date),
            (self.language, &mut form.language),
            (self.page_count, &mut form.page_count),
            (self.publisher, &mut form.publisher),
            (self.edition, &mut form.edition),
            (self.cover_image_url, &mut form.cover_image_url),
            (self.description, &mut form.description),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    if let Some(base_url) = cli.base_url {
        settings.api.base_url = base_url;
    }

    // Settings choose the log filter and format; nothing can be logged before
    // this point.
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::debug!(
        env = ?settings.environment,
        base_url = %settings.api.base_url,
        log_format = ?settings.telemetry.log_format,
        "bookshelf CLI starting"
    );

    let mut controller = bookshelf_app::book_controller(&settings)
        .with_context(|| "failed to set up the book backend client")?;

    let outcome = run(cli.command, &mut controller).await;
    print_notice(&controller);

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            tracing::debug!(error = ?error, "command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(command: Command, controller: &mut FormController<RestBookApi>) -> Result<(), BookError> {
    match command {
        Command::List => {
            let loaded = controller.load_books().await;
            println!("{}", controller.table().render());
            loaded
        }
        Command::Show { id } => {
            let book = controller.edit_book(id).await?;
            println!("{}", render_book(&book));
            Ok(())
        }
        Command::Add(fields) => {
            fields.apply(controller.form_mut());
            controller.submit().await?;
            println!("{}", controller.table().render());
            Ok(())
        }
        Command::Edit { id, fields } => {
            controller.edit_book(id).await?;
            fields.apply(controller.form_mut());
            controller.submit().await?;
            println!("{}", controller.table().render());
            Ok(())
        }
        Command::Delete { id, yes } => {
            let deleted = controller
                .delete_book(id, |id| yes || confirm_on_stdin(id))
                .await?;
            if deleted {
                println!("{}", controller.table().render());
            } else {
                println!("Delete cancelled.");
            }
            Ok(())
        }
    }
}

fn print_notice(controller: &FormController<RestBookApi>) {
    if let Some(notice) = controller.notice() {
        match notice.kind {
            NoticeKind::Success => println!("{}", notice.text),
            NoticeKind::Error => eprintln!("error: {}", notice.text),
        }
    }
}

/// Ask on stderr, read the answer from stdin. Anything but y/yes declines.
fn confirm_on_stdin(id: BookId) -> bool {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "Really delete the book with ID = {id}? [y/N] ");
    let _ = stderr.flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
