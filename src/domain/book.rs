use std::fmt;

use super::{Isbn, StateError, ValidationError};

/// 書籍の貸出状態
///
/// 型安全な状態パターン：
/// - 貸出可能なら借り手は存在しない
/// - 貸出中なら借り手の名前が必ず存在する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    IssuedTo(String),
}

/// Book - 貸出可能な1冊の書籍
///
/// ISBNは生成時に検証され、以後変更されない。
/// 貸出状態は`issue`と`return_book`でのみ遷移する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    name: String,
    isbn: Isbn,
    author: String,
    genre: String,
    year: String,
    availability: Availability,
}

impl Book {
    /// 書籍を作成する（貸出可能な状態）
    ///
    /// # エラー
    /// ISBNが10桁でも13桁でもない場合は`ValidationError::InvalidIsbn`を返す
    pub fn new(
        name: impl Into<String>,
        isbn: u64,
        author: impl Into<String>,
        genre: impl Into<String>,
        year: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: name.into(),
            isbn: Isbn::new(isbn)?,
            author: author.into(),
            genre: genre.into(),
            year: year.into(),
            availability: Availability::Available,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn isbn(&self) -> Isbn {
        self.isbn
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn is_available(&self) -> bool {
        matches!(self.availability, Availability::Available)
    }

    /// 借り手の名前（貸出可能ならNone）
    pub fn reader_name(&self) -> Option<&str> {
        match &self.availability {
            Availability::Available => None,
            Availability::IssuedTo(name) => Some(name),
        }
    }

    /// 書籍を貸し出す
    ///
    /// # エラー
    /// 既に貸出中の場合は`StateError::AlreadyIssued`を返す
    pub fn issue(&mut self, reader_name: impl Into<String>) -> Result<(), StateError> {
        if !self.is_available() {
            return Err(StateError::AlreadyIssued { isbn: self.isbn });
        }

        self.availability = Availability::IssuedTo(reader_name.into());
        Ok(())
    }

    /// 書籍を返却する
    ///
    /// # エラー
    /// 貸出中でない場合は`StateError::NotIssued`を返す
    pub fn return_book(&mut self) -> Result<(), StateError> {
        if self.is_available() {
            return Err(StateError::NotIssued { isbn: self.isbn });
        }

        self.availability = Availability::Available;
        Ok(())
    }

    /// 永続化された状態で上書きする（遷移ガードを通さない）
    pub(crate) fn restore_availability(&mut self, availability: Availability) {
        self.availability = availability;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Book name: {}", self.name)?;
        writeln!(f, "ISBN: {}", self.isbn)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Genre: {}", self.genre)?;
        writeln!(f, "Year: {}", self.year)?;
        match &self.availability {
            Availability::Available => write!(f, "Status: available"),
            Availability::IssuedTo(reader) => write!(f, "Status: issued to {}", reader),
        }
    }
}
