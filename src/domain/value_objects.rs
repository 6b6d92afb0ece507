use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ReaderIdError, ValidationError};

/// ISBNとして許可される桁数
pub const ISBN_DIGIT_LENGTHS: [u32; 2] = [10, 13];

/// ISBN - 書籍の識別コード
///
/// 不変条件：10桁または13桁の数値
/// 型システムでこの制約を強制し、不正な桁数のISBNを作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub struct Isbn(u64);

impl Isbn {
    /// 桁数を検証して作成する
    ///
    /// # エラー
    /// 桁数が10でも13でもない場合は`ValidationError::InvalidIsbn`を返す
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if !ISBN_DIGIT_LENGTHS.contains(&digit_count(value)) {
            return Err(ValidationError::InvalidIsbn { isbn: value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Isbn {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Isbn> for u64 {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 10進数での桁数（0は1桁）
fn digit_count(value: u64) -> u32 {
    value.checked_ilog10().map_or(1, |n| n + 1)
}

/// 読者ID - 正の整数、ライブラリ内で一意
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReaderId(u64);

impl ReaderId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// 保存データなど外部の値から作成する（0は不可）
    ///
    /// # エラー
    /// 0の場合は`ValidationError::InvalidReaderId`を返す
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::InvalidReaderId { id: value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 読者IDの採番器
///
/// ライブラリが所有する単調増加カウンタ。最初に払い出すIDは1。
/// 復元したIDを`observe`で通知すると、以降の採番はそれより大きい値になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderIdGenerator {
    last_issued: u64,
}

impl ReaderIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次のIDを払い出す
    ///
    /// # エラー
    /// 最大値まで払い出し済みの場合は`ReaderIdError::Exhausted`を返す
    pub fn next_id(&mut self) -> Result<ReaderId, ReaderIdError> {
        let next = self
            .last_issued
            .checked_add(1)
            .ok_or(ReaderIdError::Exhausted {
                last_issued: self.last_issued,
            })?;
        self.last_issued = next;
        Ok(ReaderId(next))
    }

    /// 既存のIDを通知し、衝突しないようにカウンタを進める
    pub fn observe(&mut self, id: ReaderId) {
        self.last_issued = self.last_issued.max(id.0);
    }

    /// これまでに払い出した（または通知された）最大のID
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }
}
