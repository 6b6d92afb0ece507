use thiserror::Error;

use super::{Isbn, ReaderId};

/// 生成時の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// ISBNの桁数が10でも13でもない
    #[error("Invalid ISBN: {isbn}")]
    InvalidIsbn { isbn: u64 },
    /// 符号なし整数として読めないISBN（負数・小数など）
    #[error("Malformed ISBN: {raw}")]
    MalformedIsbn { raw: String },
    /// 読者IDは正の整数
    #[error("Invalid reader id: {id}")]
    InvalidReaderId { id: u64 },
}

/// 読者IDの採番エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderIdError {
    /// これ以上大きいIDが存在しない
    #[error("Reader ids exhausted (last issued: {last_issued})")]
    Exhausted { last_issued: u64 },
}

/// 貸出状態の不正な遷移
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// 既に貸出中
    #[error("Book {isbn} already issued")]
    AlreadyIssued { isbn: Isbn },
    /// 貸出されていない書籍の返却
    #[error("Book {isbn} is not issued")]
    NotIssued { isbn: Isbn },
    /// 読者が借りていない書籍の返却
    #[error("Reader {reader_id} does not have book {isbn}")]
    NotBorrowedByReader { reader_id: ReaderId, isbn: Isbn },
}

/// 参照先が存在しない
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("Book {0} not found")]
    BookNotFound(Isbn),
    #[error("Reader {0} not found")]
    ReaderNotFound(ReaderId),
    /// 返却時はどちらが欠けているかを区別しない
    #[error("Book {isbn} or reader {reader_id} not found")]
    BookOrReaderNotFound { reader_id: ReaderId, isbn: Isbn },
}

/// 貸出・返却操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}
