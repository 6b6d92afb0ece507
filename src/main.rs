use rusty_library_registry::{
    adapters::JsonFileStore,
    application::library::{LibraryService, Result},
    config::AppConfig,
    domain::{Statistics, commands::*},
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_library_registry=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Data file: {}", config.data_file.display());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Library run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.data_file);
    let mut service = if store.exists() {
        LibraryService::open(store)?
    } else {
        tracing::info!("No data file yet, starting with an empty library");
        LibraryService::new(store)
    };

    if service.library().is_empty() {
        seed(&mut service)?;
    }

    for book in service.library().books() {
        println!("{}\n", book);
    }

    match service.statistics() {
        Statistics::Empty => println!("No books in the library"),
        Statistics::Summary {
            most_popular_genre,
            most_popular_year,
        } => {
            println!("Most popular genre: {}", most_popular_genre);
            println!("Most popular year: {}", most_popular_year);
        }
    }

    service.save()
}

/// 初回起動用のサンプルデータ
fn seed(service: &mut LibraryService<JsonFileStore>) -> Result<()> {
    service.add_book(AddBook {
        name: "1984".to_string(),
        isbn: 1234567890,
        author: "Orwell".to_string(),
        genre: "Dystopia".to_string(),
        year: "1949".to_string(),
    })?;
    let dune = service.add_book(AddBook {
        name: "Dune".to_string(),
        isbn: 1234567890123,
        author: "Herbert".to_string(),
        genre: "Sci-Fi".to_string(),
        year: "1965".to_string(),
    })?;

    let alice = service.register_reader(RegisterReader {
        name: "Alice".to_string(),
    })?;
    service.issue_book(IssueBook {
        reader_id: alice,
        isbn: dune,
    })
}
