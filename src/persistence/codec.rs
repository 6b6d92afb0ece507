use std::io::{Read, Write};

use crate::domain::Library;

use super::{LibrarySnapshot, PersistenceError};

/// ライブラリ全体をJSONドキュメントに変換する
pub fn encode(library: &Library) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&LibrarySnapshot::capture(
        library,
    ))?)
}

/// JSONドキュメントからライブラリを復元する
pub fn decode(json: &str) -> Result<Library, PersistenceError> {
    let snapshot: LibrarySnapshot = serde_json::from_str(json)?;
    snapshot.restore()
}

pub fn write_to<W: Write>(library: &Library, writer: W) -> Result<(), PersistenceError> {
    serde_json::to_writer_pretty(writer, &LibrarySnapshot::capture(library))?;
    Ok(())
}

pub fn read_from<R: Read>(reader: R) -> Result<Library, PersistenceError> {
    let snapshot: LibrarySnapshot = serde_json::from_reader(reader)?;
    snapshot.restore()
}
