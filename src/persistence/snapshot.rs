use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::domain::{Availability, Book, Isbn, Library, Reader, ReaderId, ValidationError};

use super::PersistenceError;

/// 書籍1冊の保存形式
///
/// ISBNは任意のJSON数値として受け取り、復元時に検証する。
/// 負数や小数もJSONの構文エラーではなく`ValidationError`になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(alias = "name")]
    pub book_name: String,
    pub isbn: Number,
    pub author: String,
    pub genre: String,
    pub year: String,
    pub is_available: bool,
    pub reader_name: Option<String>,
}

/// 読者1人の保存形式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderRecord {
    pub id: u64,
    pub name: String,
    pub borrowed_books: Vec<Number>,
}

/// ライブラリ全体の保存形式
///
/// 1つのJSONドキュメントに`books`と`readers`の2つの配列を持つ。
/// 読み込み時は`items` / `borrowers`も受け付ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(alias = "items")]
    pub books: Vec<BookRecord>,
    #[serde(alias = "borrowers")]
    pub readers: Vec<ReaderRecord>,
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            book_name: book.name().to_string(),
            isbn: book.isbn().value().into(),
            author: book.author().to_string(),
            genre: book.genre().to_string(),
            year: book.year().to_string(),
            is_available: book.is_available(),
            reader_name: book.reader_name().map(str::to_string),
        }
    }
}

impl From<&Reader> for ReaderRecord {
    fn from(reader: &Reader) -> Self {
        Self {
            id: reader.id().value(),
            name: reader.name().to_string(),
            borrowed_books: reader
                .borrowed_books()
                .iter()
                .map(|isbn| isbn.value().into())
                .collect(),
        }
    }
}

/// JSON数値をISBNの候補値に変換する（桁数の検証は`Isbn::new`）
fn isbn_value(number: &Number) -> Result<u64, ValidationError> {
    number.as_u64().ok_or_else(|| ValidationError::MalformedIsbn {
        raw: number.to_string(),
    })
}

impl BookRecord {
    /// 通常の生成経路（ISBN検証あり）で作り直し、貸出状態を上書きする
    fn into_book(self) -> Result<Book, PersistenceError> {
        let isbn = isbn_value(&self.isbn)?;
        let availability = match (self.is_available, self.reader_name) {
            (true, None) => Availability::Available,
            (false, Some(reader_name)) => Availability::IssuedTo(reader_name),
            (is_available, reader_name) => {
                return Err(PersistenceError::InconsistentBookState {
                    isbn,
                    is_available,
                    reader_name,
                });
            }
        };

        let mut book = Book::new(self.book_name, isbn, self.author, self.genre, self.year)?;
        book.restore_availability(availability);
        Ok(book)
    }
}

impl ReaderRecord {
    fn into_reader(self) -> Result<Reader, PersistenceError> {
        let id = ReaderId::new(self.id)?;
        let borrowed_books = self
            .borrowed_books
            .iter()
            .map(|number| isbn_value(number).and_then(Isbn::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Reader::restore(id, self.name, borrowed_books))
    }
}

impl LibrarySnapshot {
    /// ライブラリの現在の状態を写し取る
    pub fn capture(library: &Library) -> Self {
        Self {
            books: library.books().map(BookRecord::from).collect(),
            readers: library.readers().map(ReaderRecord::from).collect(),
        }
    }

    /// 保存形式からライブラリを復元する
    ///
    /// - 書籍は`Book::new`を通して再検証する
    /// - 貸出状態は遷移ガードを通さずに復元する
    /// - 読者IDはそのまま使い（0は拒否）、採番器をその最大値まで進める
    /// - 同じIDの読者レコードが複数あれば最後のものを残す
    ///
    /// 書籍と読者の関係の矛盾は拒否せず、警告ログだけを出す。
    pub fn restore(self) -> Result<Library, PersistenceError> {
        let mut library = Library::new();

        for record in self.books {
            let book = record.into_book()?;
            let isbn = book.isbn();
            if library.add_book(book).is_some() {
                tracing::warn!(isbn = isbn.value(), "Duplicate book record, keeping the last one");
            }
        }

        for record in self.readers {
            let reader = record.into_reader()?;
            let reader_id = reader.id();
            if library.add_reader(reader).is_some() {
                tracing::warn!(
                    reader_id = reader_id.value(),
                    "Duplicate reader record, keeping the last one"
                );
            }
        }

        for (reader_id, isbn) in library.inconsistent_loans() {
            tracing::warn!(
                reader_id = reader_id.value(),
                isbn = isbn.value(),
                "Restored loan does not match the book's holder"
            );
        }

        tracing::debug!(
            books = library.book_count(),
            readers = library.reader_count(),
            "Library restored from snapshot"
        );

        Ok(library)
    }
}
