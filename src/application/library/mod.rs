mod errors;
mod library_service;

pub use errors::{LibraryApplicationError, Result};
pub use library_service::LibraryService;
