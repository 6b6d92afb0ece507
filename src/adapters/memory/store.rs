use std::cell::RefCell;

use crate::domain::Library;
use crate::persistence::{self, PersistenceError};
use crate::ports::library_store::{LibraryStore as LibraryStoreTrait, Result};

/// LibraryStoreのインメモリ実装
///
/// 最後に保存したJSONドキュメントを保持する。
/// ファイルを使わずに保存・復元の経路をテストするために使う。
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: RefCell<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のドキュメントから作成する
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
        }
    }

    /// 最後に保存されたドキュメント
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl LibraryStoreTrait for InMemoryStore {
    fn save(&self, library: &Library) -> Result<()> {
        let document = persistence::encode(library)?;
        *self.document.borrow_mut() = Some(document);
        Ok(())
    }

    fn load(&self) -> Result<Library> {
        match self.document.borrow().as_deref() {
            Some(document) => persistence::decode(document),
            None => Err(PersistenceError::NothingSaved),
        }
    }
}
