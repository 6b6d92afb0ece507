pub mod codec;
pub mod errors;
pub mod snapshot;

pub use codec::{decode, encode, read_from, write_to};
pub use errors::PersistenceError;
pub use snapshot::{BookRecord, LibrarySnapshot, ReaderRecord};
