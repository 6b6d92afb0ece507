use super::{Isbn, ReaderId};

/// Reader - 登録された読者
///
/// 借りている書籍のISBNを貸出順に保持する。
/// 公開された変更メソッドはなく、貸出一覧はLibraryだけが更新する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reader {
    id: ReaderId,
    name: String,
    borrowed_books: Vec<Isbn>,
}

impl Reader {
    /// 採番済みのIDで読者を作成する
    ///
    /// IDの払い出しは`Library::create_reader`が行う。
    pub(crate) fn new(id: ReaderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            borrowed_books: Vec::new(),
        }
    }

    /// 永続化された状態から復元する
    pub(crate) fn restore(id: ReaderId, name: String, borrowed_books: Vec<Isbn>) -> Self {
        Self {
            id,
            name,
            borrowed_books,
        }
    }

    pub fn id(&self) -> ReaderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn borrowed_books(&self) -> &[Isbn] {
        &self.borrowed_books
    }

    pub fn has_borrowed(&self, isbn: Isbn) -> bool {
        self.borrowed_books.contains(&isbn)
    }

    pub(crate) fn record_borrow(&mut self, isbn: Isbn) {
        self.borrowed_books.push(isbn);
    }

    /// 最初に見つかった1件だけを取り除く
    pub(crate) fn record_return(&mut self, isbn: Isbn) {
        if let Some(pos) = self.borrowed_books.iter().position(|b| *b == isbn) {
            self.borrowed_books.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isbn(value: u64) -> Isbn {
        Isbn::new(value).unwrap()
    }

    #[test]
    fn test_new_reader_has_no_books() {
        let reader = Reader::new(ReaderId::from_u64(1), "Alice");
        assert_eq!(reader.id(), ReaderId::from_u64(1));
        assert_eq!(reader.name(), "Alice");
        assert!(reader.borrowed_books().is_empty());
    }

    #[test]
    fn test_record_borrow_and_return() {
        let mut reader = Reader::new(ReaderId::from_u64(1), "Alice");
        reader.record_borrow(isbn(1234567890));
        reader.record_borrow(isbn(1234567890123));
        assert!(reader.has_borrowed(isbn(1234567890)));

        reader.record_return(isbn(1234567890));
        assert_eq!(reader.borrowed_books(), &[isbn(1234567890123)]);
    }

    #[test]
    fn test_record_return_removes_first_occurrence_only() {
        let mut reader = Reader::restore(
            ReaderId::from_u64(3),
            "Bob".to_string(),
            vec![isbn(1234567890), isbn(1234567890)],
        );
        reader.record_return(isbn(1234567890));
        assert_eq!(reader.borrowed_books(), &[isbn(1234567890)]);
    }

    #[test]
    fn test_record_return_unknown_isbn_is_noop() {
        let mut reader = Reader::new(ReaderId::from_u64(1), "Alice");
        reader.record_borrow(isbn(1234567890));
        reader.record_return(isbn(1234567890123));
        assert_eq!(reader.borrowed_books(), &[isbn(1234567890)]);
    }
}
