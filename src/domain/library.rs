use std::collections::{BTreeMap, HashMap};

use super::book::Book;
use super::reader::Reader;
use super::statistics::{Statistics, most_common};
use super::{
    Isbn, LendingError, NotFoundError, ReaderId, ReaderIdError, ReaderIdGenerator, StateError,
};

/// 削除操作の結果
///
/// 存在しないキーの削除はエラーではなく`NotFound`として返す。
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<T> {
    Removed(T),
    NotFound,
}

impl<T> Removal<T> {
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Removal::NotFound)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Removal::Removed(value) => Some(value),
            Removal::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Removal<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Removal::NotFound, Removal::Removed)
    }
}

/// Library集約 - 蔵書と読者の登録簿
///
/// 書籍と読者の双方向の関係（書籍の借り手名 ⇔ 読者の貸出一覧）は
/// この集約だけが更新する。
///
/// 不変条件：
/// - 読者の貸出一覧にあるISBNはすべて、その読者の名前で貸出中の書籍を指す
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: HashMap<Isbn, Book>,
    // 初回登録順。上書きされても位置は変わらない
    book_order: Vec<Isbn>,
    readers: BTreeMap<ReaderId, Reader>,
    reader_ids: ReaderIdGenerator,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書籍を登録する
    ///
    /// 同じISBNが既にあれば上書きし、置き換えた書籍を返す（後勝ち）。
    pub fn add_book(&mut self, book: Book) -> Option<Book> {
        let isbn = book.isbn();
        let replaced = self.books.insert(isbn, book);
        if replaced.is_none() {
            self.book_order.push(isbn);
        }
        replaced
    }

    pub fn remove_book(&mut self, isbn: Isbn) -> Removal<Book> {
        let removed = self.books.remove(&isbn);
        if removed.is_some() {
            self.book_order.retain(|b| *b != isbn);
        }
        removed.into()
    }

    /// 新しいIDで読者を作成する（登録は`add_reader`で行う）
    ///
    /// # エラー
    /// IDを払い出せない場合は`ReaderIdError::Exhausted`を返す
    pub fn create_reader(&mut self, name: impl Into<String>) -> Result<Reader, ReaderIdError> {
        Ok(Reader::new(self.reader_ids.next_id()?, name))
    }

    /// 読者を登録する
    ///
    /// 同じIDが既にあれば上書きし、置き換えた読者を返す（後勝ち）。
    /// 以後の採番がこのIDと衝突しないよう採番器を進める。
    pub fn add_reader(&mut self, reader: Reader) -> Option<Reader> {
        self.reader_ids.observe(reader.id());
        self.readers.insert(reader.id(), reader)
    }

    pub fn remove_reader(&mut self, id: ReaderId) -> Removal<Reader> {
        self.readers.remove(&id).into()
    }

    pub fn book(&self, isbn: Isbn) -> Option<&Book> {
        self.books.get(&isbn)
    }

    pub fn reader(&self, id: ReaderId) -> Option<&Reader> {
        self.readers.get(&id)
    }

    /// 初回登録順に書籍を返す
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.book_order
            .iter()
            .filter_map(|isbn| self.books.get(isbn))
    }

    /// ID昇順に読者を返す
    pub fn readers(&self) -> impl Iterator<Item = &Reader> {
        self.readers.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.readers.is_empty()
    }

    /// 書籍を読者に貸し出す
    ///
    /// ビジネスルール：
    /// - 書籍と読者が登録されていること
    /// - 書籍が貸出可能であること
    ///
    /// # エラー
    /// - `NotFoundError::BookNotFound` / `NotFoundError::ReaderNotFound`
    /// - `StateError::AlreadyIssued`
    pub fn issue_book(&mut self, reader_id: ReaderId, isbn: Isbn) -> Result<(), LendingError> {
        let book = self
            .books
            .get_mut(&isbn)
            .ok_or(NotFoundError::BookNotFound(isbn))?;
        let reader = self
            .readers
            .get_mut(&reader_id)
            .ok_or(NotFoundError::ReaderNotFound(reader_id))?;

        // 状態遷移は書籍自身に任せる
        book.issue(reader.name())?;
        reader.record_borrow(isbn);
        Ok(())
    }

    /// 読者から書籍を返却する
    ///
    /// ビジネスルール：
    /// - 書籍と読者が登録されていること
    /// - その読者が実際に借りている書籍であること
    ///
    /// # エラー
    /// - `NotFoundError::BookOrReaderNotFound`
    /// - `StateError::NotBorrowedByReader` / `StateError::NotIssued`
    pub fn return_book(&mut self, reader_id: ReaderId, isbn: Isbn) -> Result<(), LendingError> {
        let (Some(book), Some(reader)) = (
            self.books.get_mut(&isbn),
            self.readers.get_mut(&reader_id),
        ) else {
            return Err(NotFoundError::BookOrReaderNotFound { reader_id, isbn }.into());
        };

        if !reader.has_borrowed(isbn) {
            return Err(StateError::NotBorrowedByReader { reader_id, isbn }.into());
        }

        book.return_book()?;
        reader.record_return(isbn);
        Ok(())
    }

    /// 最も多いジャンルと出版年を集計する
    ///
    /// 同数の場合は登録順で先に現れた値を選ぶ。
    pub fn statistics(&self) -> Statistics {
        let genre = most_common(self.books().map(Book::genre));
        let year = most_common(self.books().map(Book::year));

        match (genre, year) {
            (Some(genre), Some(year)) => Statistics::Summary {
                most_popular_genre: genre.to_string(),
                most_popular_year: year.to_string(),
            },
            _ => Statistics::Empty,
        }
    }

    /// 不変条件を満たさない貸出の組（読者ID, ISBN）を列挙する
    pub fn inconsistent_loans(&self) -> Vec<(ReaderId, Isbn)> {
        self.readers()
            .flat_map(|reader| {
                reader
                    .borrowed_books()
                    .iter()
                    .filter(move |isbn| {
                        self.book(**isbn)
                            .and_then(Book::reader_name)
                            .is_none_or(|holder| holder != reader.name())
                    })
                    .map(move |isbn| (reader.id(), *isbn))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUNE: u64 = 1234567890123;
    const NINETEEN_EIGHTY_FOUR: u64 = 1234567890;

    fn isbn(value: u64) -> Isbn {
        Isbn::new(value).unwrap()
    }

    fn book(isbn: u64, genre: &str, year: &str) -> Book {
        Book::new("Title", isbn, "Author", genre, year).unwrap()
    }

    fn library_with_alice() -> (Library, ReaderId) {
        let mut library = Library::new();
        library.add_book(Book::new("Dune", DUNE, "Herbert", "Sci-Fi", "1965").unwrap());
        let alice = library.create_reader("Alice").unwrap();
        let alice_id = alice.id();
        library.add_reader(alice);
        (library, alice_id)
    }

    // 登録・削除のテスト
    #[test]
    fn test_add_and_remove_book() {
        let mut library = Library::new();
        assert!(library.add_book(book(DUNE, "Sci-Fi", "1965")).is_none());
        assert_eq!(library.book_count(), 1);

        let removed = library.remove_book(isbn(DUNE));
        assert!(removed.is_removed());
        assert_eq!(removed.into_option().unwrap().isbn(), isbn(DUNE));
        assert_eq!(library.book_count(), 0);
    }

    #[test]
    fn test_remove_missing_book_is_not_found() {
        let mut library = Library::new();
        assert_eq!(library.remove_book(isbn(DUNE)), Removal::NotFound);
    }

    #[test]
    fn test_add_book_last_write_wins() {
        let mut library = Library::new();
        library.add_book(book(DUNE, "Sci-Fi", "1965"));
        library.add_book(book(NINETEEN_EIGHTY_FOUR, "Dystopia", "1949"));

        let replaced = library.add_book(book(DUNE, "Classic", "1966"));
        assert_eq!(replaced.unwrap().genre(), "Sci-Fi");
        assert_eq!(library.book_count(), 2);
        assert_eq!(library.book(isbn(DUNE)).unwrap().genre(), "Classic");

        // 上書きしても登録順は保たれる
        let order: Vec<Isbn> = library.books().map(Book::isbn).collect();
        assert_eq!(order, vec![isbn(DUNE), isbn(NINETEEN_EIGHTY_FOUR)]);
    }

    #[test]
    fn test_create_reader_assigns_increasing_ids() {
        let mut library = Library::new();
        let alice = library.create_reader("Alice").unwrap();
        let bob = library.create_reader("Bob").unwrap();
        assert_eq!(alice.id().value(), 1);
        assert_eq!(bob.id().value(), 2);
        assert!(alice.borrowed_books().is_empty());
    }

    #[test]
    fn test_separate_libraries_have_independent_ids() {
        let mut first = Library::new();
        let mut second = Library::new();
        first.create_reader("Alice").unwrap();
        assert_eq!(second.create_reader("Bob").unwrap().id().value(), 1);
    }

    #[test]
    fn test_add_and_remove_reader() {
        let (mut library, alice_id) = library_with_alice();
        assert_eq!(library.reader_count(), 1);

        let removed = library.remove_reader(alice_id);
        assert_eq!(removed.into_option().unwrap().name(), "Alice");
        assert!(library.remove_reader(alice_id).is_not_found());
    }

    #[test]
    fn test_add_reader_from_other_library_advances_ids() {
        let mut other = Library::new();
        for _ in 0..4 {
            let _ = other.create_reader("Someone").unwrap();
        }
        let stranger = other.create_reader("Stranger").unwrap();
        assert_eq!(stranger.id().value(), 5);

        let mut library = Library::new();
        library.add_reader(stranger);
        assert_eq!(library.create_reader("Alice").unwrap().id().value(), 6);
    }

    #[test]
    fn test_add_reader_last_write_wins() {
        let (mut library, alice_id) = library_with_alice();

        let replaced = library.add_reader(Reader::new(alice_id, "Alicia"));
        assert_eq!(replaced.unwrap().name(), "Alice");
        assert_eq!(library.reader_count(), 1);
        assert_eq!(library.reader(alice_id).unwrap().name(), "Alicia");
    }

    #[test]
    fn test_create_reader_fails_when_ids_exhausted() {
        let mut library = Library::new();
        library.add_reader(Reader::new(ReaderId::from_u64(u64::MAX), "Last"));

        assert_eq!(
            library.create_reader("Next").unwrap_err(),
            ReaderIdError::Exhausted {
                last_issued: u64::MAX
            }
        );
        assert_eq!(library.reader_count(), 1);
    }

    // 貸出・返却のテスト
    #[test]
    fn test_issue_and_return_scenario() {
        let (mut library, alice_id) = library_with_alice();
        let bob = library.create_reader("Bob").unwrap();
        let bob_id = bob.id();
        library.add_reader(bob);

        library.issue_book(alice_id, isbn(DUNE)).unwrap();
        let dune = library.book(isbn(DUNE)).unwrap();
        assert!(!dune.is_available());
        assert_eq!(dune.reader_name(), Some("Alice"));
        assert_eq!(library.reader(alice_id).unwrap().borrowed_books(), &[isbn(DUNE)]);

        // 別の読者への二重貸出は失敗
        let result = library.issue_book(bob_id, isbn(DUNE));
        assert_eq!(
            result.unwrap_err(),
            LendingError::State(StateError::AlreadyIssued { isbn: isbn(DUNE) })
        );
        assert!(library.reader(bob_id).unwrap().borrowed_books().is_empty());

        library.return_book(alice_id, isbn(DUNE)).unwrap();
        assert!(library.book(isbn(DUNE)).unwrap().is_available());
        assert!(library.reader(alice_id).unwrap().borrowed_books().is_empty());
        assert!(library.inconsistent_loans().is_empty());
    }

    #[test]
    fn test_issue_unknown_book() {
        let (mut library, alice_id) = library_with_alice();
        let missing = isbn(NINETEEN_EIGHTY_FOUR);
        let result = library.issue_book(alice_id, missing);
        assert_eq!(
            result.unwrap_err(),
            LendingError::NotFound(NotFoundError::BookNotFound(missing))
        );
    }

    #[test]
    fn test_issue_unknown_reader() {
        let (mut library, _) = library_with_alice();
        let missing = ReaderId::from_u64(99);
        let result = library.issue_book(missing, isbn(DUNE));
        assert_eq!(
            result.unwrap_err(),
            LendingError::NotFound(NotFoundError::ReaderNotFound(missing))
        );
        assert!(library.book(isbn(DUNE)).unwrap().is_available());
    }

    #[test]
    fn test_return_unknown_book_or_reader() {
        let (mut library, alice_id) = library_with_alice();

        let missing_book = isbn(NINETEEN_EIGHTY_FOUR);
        assert_eq!(
            library.return_book(alice_id, missing_book).unwrap_err(),
            LendingError::NotFound(NotFoundError::BookOrReaderNotFound {
                reader_id: alice_id,
                isbn: missing_book,
            })
        );

        let missing_reader = ReaderId::from_u64(42);
        assert_eq!(
            library.return_book(missing_reader, isbn(DUNE)).unwrap_err(),
            LendingError::NotFound(NotFoundError::BookOrReaderNotFound {
                reader_id: missing_reader,
                isbn: isbn(DUNE),
            })
        );
    }

    #[test]
    fn test_return_book_not_borrowed_by_reader() {
        let (mut library, alice_id) = library_with_alice();
        let bob = library.create_reader("Bob").unwrap();
        let bob_id = bob.id();
        library.add_reader(bob);

        library.issue_book(alice_id, isbn(DUNE)).unwrap();

        // Bobは借りていないので返却できない
        let result = library.return_book(bob_id, isbn(DUNE));
        assert_eq!(
            result.unwrap_err(),
            LendingError::State(StateError::NotBorrowedByReader {
                reader_id: bob_id,
                isbn: isbn(DUNE),
            })
        );
        assert_eq!(library.book(isbn(DUNE)).unwrap().reader_name(), Some("Alice"));
    }

    #[test]
    fn test_return_available_book_fails() {
        let (mut library, alice_id) = library_with_alice();
        let result = library.return_book(alice_id, isbn(DUNE));
        assert!(matches!(
            result.unwrap_err(),
            LendingError::State(StateError::NotBorrowedByReader { .. })
        ));
    }

    // 集計のテスト
    #[test]
    fn test_statistics_empty_library() {
        assert_eq!(Library::new().statistics(), Statistics::Empty);
    }

    #[test]
    fn test_statistics_most_popular_genre() {
        let mut library = Library::new();
        library.add_book(book(1000000001, "A", "2000"));
        library.add_book(book(1000000002, "B", "2001"));
        library.add_book(book(1000000003, "A", "2001"));

        let stats = library.statistics();
        assert_eq!(stats.most_popular_genre(), Some("A"));
        assert_eq!(stats.most_popular_year(), Some("2001"));
    }

    #[test]
    fn test_statistics_ties_follow_insertion_order() {
        let mut library = Library::new();
        library.add_book(book(1000000002, "B", "1999"));
        library.add_book(book(1000000001, "A", "2000"));

        let stats = library.statistics();
        assert_eq!(stats.most_popular_genre(), Some("B"));
        assert_eq!(stats.most_popular_year(), Some("1999"));
    }

    #[test]
    fn test_statistics_readers_only_is_empty() {
        let mut library = Library::new();
        let alice = library.create_reader("Alice").unwrap();
        library.add_reader(alice);
        assert!(library.statistics().is_empty());
    }

    #[test]
    fn test_inconsistent_loans_detects_removed_book() {
        let (mut library, alice_id) = library_with_alice();
        library.issue_book(alice_id, isbn(DUNE)).unwrap();
        let _ = library.remove_book(isbn(DUNE));

        assert_eq!(library.inconsistent_loans(), vec![(alice_id, isbn(DUNE))]);
    }
}
