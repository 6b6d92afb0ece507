use thiserror::Error;

use crate::domain::ValidationError;

/// 永続化のエラー
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 保存データの検証エラー（ISBNの桁数など）
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// is_available と reader_name の組み合わせが矛盾している
    #[error(
        "Inconsistent state for book {isbn}: is_available = {is_available}, reader_name = {reader_name:?}"
    )]
    InconsistentBookState {
        isbn: u64,
        is_available: bool,
        reader_name: Option<String>,
    },

    /// まだ一度も保存されていない
    #[error("Nothing has been saved yet")]
    NothingSaved,
}
