use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::Library;
use crate::persistence;
use crate::ports::library_store::{LibraryStore as LibraryStoreTrait, Result};

/// LibraryStoreのJSONファイル実装
///
/// ライブラリ全体を1つのJSONファイルに保存する。
/// 保存時は同じディレクトリの一時ファイルに書き込んでからリネームするため、
/// 読み手は常に古いか新しいかのどちらかの完全なドキュメントを見る。
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_document(&self, library: &Library, temp_path: &Path) -> Result<()> {
        let file = File::create(temp_path)?;
        let mut writer = BufWriter::new(file);
        persistence::write_to(library, &mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(temp_path, &self.path)?;
        Ok(())
    }
}

impl LibraryStoreTrait for JsonFileStore {
    fn save(&self, library: &Library) -> Result<()> {
        let temp_path = self.temp_path();

        if let Err(e) = self.write_document(library, &temp_path) {
            // 書きかけの一時ファイルは残さない
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::debug!(path = %temp_path.display(), error = %cleanup, "Temporary file not removed");
            }
            return Err(e);
        }

        tracing::debug!(
            path = %self.path.display(),
            books = library.book_count(),
            readers = library.reader_count(),
            "Library saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<Library> {
        let file = File::open(&self.path)?;
        let library = persistence::read_from(BufReader::new(file))?;

        tracing::debug!(path = %self.path.display(), "Library loaded");
        Ok(library)
    }
}
