use crate::domain::Library;
use crate::persistence::PersistenceError;

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// ライブラリ保存先ポート
///
/// ライブラリ全体を1つのドキュメントとして保存・読み込みする。
/// 部分的な書き込みは行わない。
pub trait LibraryStore {
    /// ライブラリ全体を保存する
    ///
    /// 保存は完全なドキュメント単位で行われ、前回の内容を置き換える。
    fn save(&self, library: &Library) -> Result<()>;

    /// 保存されたライブラリを読み込む
    ///
    /// 読み込んだ読者IDより大きいIDから採番が再開される。
    fn load(&self) -> Result<Library>;
}
