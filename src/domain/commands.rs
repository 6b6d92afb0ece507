use super::{Isbn, ReaderId};

/// コマンド：書籍を登録する
///
/// ISBNは未検証の値で受け取り、登録時に検証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddBook {
    pub name: String,
    pub isbn: u64,
    pub author: String,
    pub genre: String,
    pub year: String,
}

/// コマンド：読者を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterReader {
    pub name: String,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueBook {
    pub reader_id: ReaderId,
    pub isbn: Isbn,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnBook {
    pub reader_id: ReaderId,
    pub isbn: Isbn,
}
