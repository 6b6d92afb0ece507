#![allow(dead_code)]

use rusty_library_registry::adapters::JsonFileStore;
use rusty_library_registry::domain::commands::*;
use tempfile::TempDir;

/// テスト用の一時ディレクトリとJSONファイルストアを作成
///
/// TempDirはドロップ時にディレクトリごと削除されるため、
/// テスト中は呼び出し側で保持しておくこと。
pub fn temp_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("library.json"));
    (dir, store)
}

pub fn add_book(name: &str, isbn: u64, genre: &str, year: &str) -> AddBook {
    AddBook {
        name: name.to_string(),
        isbn,
        author: "Author".to_string(),
        genre: genre.to_string(),
        year: year.to_string(),
    }
}

pub fn register(name: &str) -> RegisterReader {
    RegisterReader {
        name: name.to_string(),
    }
}
