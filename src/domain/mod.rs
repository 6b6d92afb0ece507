pub mod book;
pub mod commands;
pub mod errors;
pub mod library;
pub mod reader;
pub mod statistics;
pub mod value_objects;

pub use book::{Availability, Book};
pub use errors::*;
pub use library::{Library, Removal};
pub use reader::Reader;
pub use statistics::Statistics;
pub use value_objects::*;
