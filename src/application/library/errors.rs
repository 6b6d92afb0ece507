use thiserror::Error;

use crate::domain::{LendingError, ReaderIdError, ValidationError};
use crate::persistence::PersistenceError;

/// ライブラリアプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 入力値の検証エラー（ISBNの桁数など）
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 読者IDを払い出せない
    #[error("Reader id error: {0}")]
    ReaderId(#[from] ReaderIdError),

    /// 貸出・返却のエラー
    #[error("Lending error: {0}")]
    Lending(#[from] LendingError),

    /// 保存先のエラー
    #[error("Library store error")]
    StoreError(#[source] PersistenceError),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;
