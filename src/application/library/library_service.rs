use crate::domain::{
    Book, Isbn, LendingError, Library, Reader, ReaderId, Removal, Statistics, commands::*,
};
use crate::ports::LibraryStore;

use super::errors::{LibraryApplicationError, Result};

/// ライブラリのユースケース
///
/// 集約（Library）と保存先（LibraryStore）をまとめて所有する。
/// ビジネスルールは集約側にあり、ここでは呼び出しとログ出力、
/// 保存先とのやり取りだけを行う。
#[derive(Debug)]
pub struct LibraryService<S> {
    library: Library,
    store: S,
}

impl<S: LibraryStore> LibraryService<S> {
    /// 空のライブラリで開始する
    pub fn new(store: S) -> Self {
        Self {
            library: Library::new(),
            store,
        }
    }

    /// 保存先からライブラリを読み込んで開始する
    ///
    /// # エラー
    /// - StoreError: 読み込み失敗、または保存データが不正
    pub fn open(store: S) -> Result<Self> {
        let library = store.load().map_err(LibraryApplicationError::StoreError)?;

        tracing::info!(
            books = library.book_count(),
            readers = library.reader_count(),
            "Library opened"
        );

        Ok(Self { library, store })
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_library(self) -> Library {
        self.library
    }

    /// 書籍を登録する
    ///
    /// 同じISBNの書籍があれば置き換える（後勝ち）。
    ///
    /// # 戻り値
    /// 登録した書籍のISBN
    pub fn add_book(&mut self, cmd: AddBook) -> Result<Isbn> {
        let book = Book::new(cmd.name, cmd.isbn, cmd.author, cmd.genre, cmd.year)?;
        let isbn = book.isbn();

        if self.library.add_book(book).is_some() {
            tracing::warn!(isbn = isbn.value(), "Existing book replaced");
        } else {
            tracing::info!(isbn = isbn.value(), "Book added");
        }

        Ok(isbn)
    }

    /// 読者を作成して登録する
    ///
    /// # 戻り値
    /// 採番された読者ID
    ///
    /// # エラー
    /// IDを払い出せない場合は`LibraryApplicationError::ReaderId`
    pub fn register_reader(&mut self, cmd: RegisterReader) -> Result<ReaderId> {
        let reader = self.library.create_reader(cmd.name)?;
        let reader_id = reader.id();
        let _ = self.library.add_reader(reader);

        tracing::info!(reader_id = reader_id.value(), "Reader registered");
        Ok(reader_id)
    }

    pub fn remove_book(&mut self, isbn: Isbn) -> Removal<Book> {
        let removal = self.library.remove_book(isbn);
        tracing::info!(isbn = isbn.value(), removed = removal.is_removed(), "Remove book");
        removal
    }

    pub fn remove_reader(&mut self, reader_id: ReaderId) -> Removal<Reader> {
        let removal = self.library.remove_reader(reader_id);
        tracing::info!(
            reader_id = reader_id.value(),
            removed = removal.is_removed(),
            "Remove reader"
        );
        removal
    }

    /// 書籍を貸し出す
    ///
    /// ビジネスルール（集約が検証する）：
    /// - 書籍と読者が登録されていること
    /// - 書籍が貸出可能であること
    pub fn issue_book(&mut self, cmd: IssueBook) -> Result<()> {
        let result = self.library.issue_book(cmd.reader_id, cmd.isbn);
        log_lending("issue", cmd.reader_id, cmd.isbn, &result);
        Ok(result?)
    }

    /// 書籍を返却する
    ///
    /// ビジネスルール（集約が検証する）：
    /// - 書籍と読者が登録されていること
    /// - その読者が借りている書籍であること
    pub fn return_book(&mut self, cmd: ReturnBook) -> Result<()> {
        let result = self.library.return_book(cmd.reader_id, cmd.isbn);
        log_lending("return", cmd.reader_id, cmd.isbn, &result);
        Ok(result?)
    }

    pub fn statistics(&self) -> Statistics {
        self.library.statistics()
    }

    /// 現在のライブラリ全体を保存先に書き込む
    pub fn save(&self) -> Result<()> {
        self.store
            .save(&self.library)
            .map_err(LibraryApplicationError::StoreError)?;

        tracing::info!(
            books = self.library.book_count(),
            readers = self.library.reader_count(),
            "Library saved"
        );
        Ok(())
    }
}

fn log_lending(
    action: &'static str,
    reader_id: ReaderId,
    isbn: Isbn,
    result: &std::result::Result<(), LendingError>,
) {
    match result {
        Ok(()) => tracing::info!(
            action,
            reader_id = reader_id.value(),
            isbn = isbn.value(),
            "Lending succeeded"
        ),
        Err(e) => tracing::warn!(
            action,
            reader_id = reader_id.value(),
            isbn = isbn.value(),
            error = %e,
            "Lending rejected"
        ),
    }
}
